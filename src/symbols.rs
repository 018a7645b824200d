//! The restricted symbol table expressions are evaluated against.
//!
//! A [`SymbolTable`] maps names to either constants or native functions. It is
//! the only thing an expression can reach: a name that is not in the table does
//! not exist as far as the evaluator is concerned.

use core::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::Real;
use crate::constants;
use crate::error::{ExprError, Result};
use crate::functions;

/// Maximum number of symbols a table can hold. Must be a power of two.
pub const MAX_SYMBOLS: usize = 128;

/// Maximum length of a symbol name in bytes.
pub const MAX_SYMBOL_NAME: usize = 32;

/// Fixed-capacity symbol name.
pub type SymbolName = heapless::String<MAX_SYMBOL_NAME>;

/// Number of arguments a function accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// Between `min` and `max` arguments, inclusive.
    Range(usize, usize),
    /// `n` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Returns true if a call with `count` arguments is acceptable.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

fn arguments(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Exact(1) => write!(f, "exactly one argument"),
            Arity::Exact(n) => write!(f, "exactly {} {}", n, arguments(n)),
            Arity::Range(min, max) => write!(f, "from {} to {} arguments", min, max),
            Arity::AtLeast(n) => write!(f, "at least {} {}", n, arguments(n)),
        }
    }
}

bitflags! {
    /// Behaviour flags attached to a native function.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct FunctionFlags: u8 {
        /// A lone argument is an iterable whose items become the argument
        /// slice. With several arguments each one is a scalar.
        const ITERABLE = 1 << 0;
        /// The first argument is an iterable and any later ones are scalars.
        const LEADING_ITERABLE = 1 << 1;
    }
}

/// Implementation signature shared by every native function.
pub type NativeFn = dyn Fn(&[Real]) -> Result<Real> + Send + Sync;

/// A function implemented in Rust and callable from expressions.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: SymbolName,
    pub arity: Arity,
    pub flags: FunctionFlags,
    pub implementation: Arc<NativeFn>,
}

impl NativeFunction {
    /// Checks a call's argument count, as written in the expression.
    pub fn check_arity(&self, count: usize) -> Result<()> {
        if self.arity.accepts(count) {
            return Ok(());
        }
        Err(ExprError::InvalidFunctionCall {
            name: self.name.to_string(),
            expected: self.arity,
            found: count,
        })
    }

    /// Returns true if the first of `count` arguments must be an iterable.
    pub fn takes_iterable(&self, count: usize) -> bool {
        count > 0
            && (self.flags.contains(FunctionFlags::LEADING_ITERABLE)
                || (self.flags.contains(FunctionFlags::ITERABLE) && count == 1))
    }

    pub fn call(&self, args: &[Real]) -> Result<Real> {
        (self.implementation)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// An entry of the symbol table.
#[derive(Clone, Debug)]
pub enum Symbol {
    Constant(Real),
    Function(NativeFunction),
}

/// Fixed-capacity mapping of names to constants and functions.
///
/// # Examples
///
/// ```
/// use webcalc::engine::interp;
/// use webcalc::symbols::{Arity, SymbolTable};
///
/// let mut symbols = SymbolTable::empty();
/// symbols.register_constant("answer", 42.0).unwrap();
/// symbols
///     .register_native_function("double", Arity::Exact(1), |args| Ok(args[0] * 2.0))
///     .unwrap();
///
/// assert_eq!(interp("double(answer)", Some(&symbols)).unwrap(), 84.0);
/// assert!(interp("sqrt(4)", Some(&symbols)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: heapless::FnvIndexMap<SymbolName, Symbol, MAX_SYMBOLS>,
}

fn symbol_name(name: &str) -> Result<SymbolName> {
    let mut key = SymbolName::new();
    key.push_str(name).map_err(|_| {
        ExprError::Other(format!(
            "Symbol name too long: '{}' (maximum is {} bytes)",
            name, MAX_SYMBOL_NAME
        ))
    })?;
    Ok(key)
}

impl SymbolTable {
    /// Creates the default table: the math library plus the general built-ins.
    pub fn new() -> Self {
        let mut table = Self::empty();
        // Fewer than MAX_SYMBOLS entries, every name shorter than MAX_SYMBOL_NAME
        table
            .register_defaults()
            .expect("default symbols fit the table");
        table
    }

    /// Creates a table with no symbols at all.
    pub fn empty() -> Self {
        Self {
            symbols: heapless::FnvIndexMap::new(),
        }
    }

    fn insert(&mut self, name: &str, symbol: Symbol) -> Result<()> {
        let key = symbol_name(name)?;
        match self.symbols.insert(key, symbol) {
            Ok(_) => Ok(()),
            Err(_) => Err(ExprError::CapacityExceeded("symbols")),
        }
    }

    /// Registers a named constant, replacing any symbol with the same name.
    pub fn register_constant(&mut self, name: &str, value: Real) -> Result<()> {
        self.insert(name, Symbol::Constant(value))
    }

    /// Registers a native function.
    ///
    /// List arguments passed to the function are rejected; see
    /// [`register_iterable_function`](Self::register_iterable_function) for
    /// functions that consume sequences.
    pub fn register_native_function<F>(&mut self, name: &str, arity: Arity, implementation: F) -> Result<()>
    where
        F: Fn(&[Real]) -> Result<Real> + Send + Sync + 'static,
    {
        self.register_function(name, arity, FunctionFlags::empty(), implementation)
    }

    /// Registers a native function that also accepts a single iterable.
    ///
    /// `f([1, 2, 3])` passes the items `1, 2, 3`, `f(1, 2)` passes two scalars,
    /// and `f(1)` fails because a number is not iterable.
    pub fn register_iterable_function<F>(&mut self, name: &str, arity: Arity, implementation: F) -> Result<()>
    where
        F: Fn(&[Real]) -> Result<Real> + Send + Sync + 'static,
    {
        self.register_function(name, arity, FunctionFlags::ITERABLE, implementation)
    }

    fn register_function<F>(
        &mut self,
        name: &str,
        arity: Arity,
        flags: FunctionFlags,
        implementation: F,
    ) -> Result<()>
    where
        F: Fn(&[Real]) -> Result<Real> + Send + Sync + 'static,
    {
        let function = NativeFunction {
            name: symbol_name(name)?,
            arity,
            flags,
            implementation: Arc::new(implementation),
        };
        self.insert(name, Symbol::Function(function))
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        let key = symbol_name(name).ok()?;
        self.symbols.get(&key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(|key| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn register_defaults(&mut self) -> Result<()> {
        use Arity::{AtLeast, Exact, Range};

        self.register_constant("pi", constants::PI)?;
        self.register_constant("e", constants::E)?;
        self.register_constant("tau", constants::TAU)?;
        self.register_constant("inf", Real::INFINITY)?;
        self.register_constant("nan", Real::NAN)?;

        let unary: [(&str, fn(&[Real]) -> Result<Real>); 33] = [
            ("sqrt", functions::sqrt),
            ("cbrt", functions::cbrt),
            ("exp", functions::exp),
            ("exp2", functions::exp2),
            ("expm1", functions::expm1),
            ("log10", functions::log10),
            ("log2", functions::log2),
            ("log1p", functions::log1p),
            ("sin", functions::sin),
            ("cos", functions::cos),
            ("tan", functions::tan),
            ("asin", functions::asin),
            ("acos", functions::acos),
            ("atan", functions::atan),
            ("sinh", functions::sinh),
            ("cosh", functions::cosh),
            ("tanh", functions::tanh),
            ("asinh", functions::asinh),
            ("acosh", functions::acosh),
            ("atanh", functions::atanh),
            ("fabs", functions::fabs),
            ("floor", functions::floor),
            ("ceil", functions::ceil),
            ("trunc", functions::trunc),
            ("factorial", functions::factorial),
            ("degrees", functions::degrees),
            ("radians", functions::radians),
            ("erf", functions::erf),
            ("erfc", functions::erfc),
            ("gamma", functions::gamma),
            ("lgamma", functions::lgamma),
            ("isqrt", functions::isqrt),
            ("abs", functions::abs),
        ];
        for (name, f) in unary {
            self.register_native_function(name, Exact(1), f)?;
        }
        self.register_native_function("isfinite", Exact(1), functions::isfinite)?;
        self.register_native_function("isinf", Exact(1), functions::isinf)?;
        self.register_native_function("isnan", Exact(1), functions::isnan)?;

        self.register_native_function("log", Range(1, 2), functions::log)?;
        self.register_native_function("round", Range(1, 2), functions::round)?;
        self.register_native_function("perm", Range(1, 2), functions::perm)?;

        self.register_native_function("atan2", Exact(2), functions::atan2)?;
        self.register_native_function("pow", Exact(2), functions::pow)?;
        self.register_native_function("fmod", Exact(2), functions::fmod)?;
        self.register_native_function("copysign", Exact(2), functions::copysign)?;
        self.register_native_function("remainder", Exact(2), functions::remainder)?;
        self.register_native_function("ldexp", Exact(2), functions::ldexp)?;
        self.register_native_function("comb", Exact(2), functions::comb)?;
        self.register_native_function("nextafter", Exact(2), functions::nextafter)?;

        self.register_native_function("hypot", AtLeast(0), functions::hypot)?;
        self.register_native_function("gcd", AtLeast(0), functions::gcd)?;
        self.register_native_function("lcm", AtLeast(0), functions::lcm)?;

        self.register_iterable_function("min", AtLeast(1), functions::min)?;
        self.register_iterable_function("max", AtLeast(1), functions::max)?;
        // sum(iterable, start)
        self.register_function("sum", Range(1, 2), FunctionFlags::LEADING_ITERABLE, functions::sum)?;
        self.register_iterable_function("fsum", Exact(1), functions::fsum)?;
        self.register_iterable_function("prod", Exact(1), functions::prod)?;
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
