use crate::Real;
use crate::error::{ExprError, Result};
use crate::eval::arith::{floor_div, modulo, power, true_div, xor};
use crate::symbols::{NativeFunction, Symbol, SymbolTable};
use crate::types::{AstExpr, BinaryOperator, UnaryOperator};

/// Evaluates an AST against a symbol table.
///
/// Names resolve only through `symbols`; anything the table does not define
/// is an [`ExprError::UnknownName`].
///
/// # Examples
///
/// ```
/// use webcalc::engine::parse_expression;
/// use webcalc::eval::eval_ast;
/// use webcalc::symbols::SymbolTable;
///
/// let ast = parse_expression("sum([1, 2, 3]) * pi").unwrap();
/// let value = eval_ast(&ast, &SymbolTable::new()).unwrap();
/// assert!((value - 6.0 * std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn eval_ast(ast: &AstExpr, symbols: &SymbolTable) -> Result<Real> {
    match ast {
        AstExpr::Constant(value) => Ok(*value),
        AstExpr::Variable(name) => eval_variable(name, symbols),
        AstExpr::Function { name, args } => eval_function(name, args, symbols),
        AstExpr::List(_) => Err(ExprError::NotANumber { type_name: "list" }),
        AstExpr::UnaryOp { op, operand } => {
            let value = eval_ast(operand, symbols)?;
            Ok(match op {
                UnaryOperator::Neg => -value,
                UnaryOperator::Pos => value,
            })
        }
        AstExpr::BinaryOp { op, left, right } => {
            let left = eval_ast(left, symbols)?;
            let right = eval_ast(right, symbols)?;
            apply_binary(*op, left, right)
        }
    }
}

fn apply_binary(op: BinaryOperator, left: Real, right: Real) -> Result<Real> {
    match op {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Sub => Ok(left - right),
        BinaryOperator::Mul => Ok(left * right),
        BinaryOperator::Div => true_div(left, right),
        BinaryOperator::FloorDiv => floor_div(left, right),
        BinaryOperator::Mod => modulo(left, right),
        BinaryOperator::Pow => power(left, right),
        BinaryOperator::BitXor => xor(left, right),
    }
}

fn eval_variable(name: &str, symbols: &SymbolTable) -> Result<Real> {
    match symbols.get(name) {
        Some(Symbol::Constant(value)) => Ok(*value),
        Some(Symbol::Function(_)) => Err(ExprError::NotANumber {
            type_name: "builtin_function_or_method",
        }),
        None => Err(ExprError::UnknownName {
            name: name.to_string(),
        }),
    }
}

fn eval_function(name: &str, args: &[AstExpr], symbols: &SymbolTable) -> Result<Real> {
    let function = match symbols.get(name) {
        Some(Symbol::Function(function)) => function,
        Some(Symbol::Constant(_)) => {
            return Err(ExprError::NotCallable {
                name: name.to_string(),
            });
        }
        None => {
            return Err(ExprError::UnknownName {
                name: name.to_string(),
            });
        }
    };

    // Arity counts the arguments as written, before any list is flattened
    function.check_arity(args.len())?;
    let values = eval_arguments(function, args, symbols)?;
    function.call(&values)
}

fn eval_arguments(function: &NativeFunction, args: &[AstExpr], symbols: &SymbolTable) -> Result<Vec<Real>> {
    let mut values = Vec::with_capacity(args.len());
    let mut rest = args;
    if function.takes_iterable(args.len()) {
        if let Some((first, tail)) = args.split_first() {
            spread_iterable(first, symbols, &mut values)?;
            rest = tail;
        }
    }
    for arg in rest {
        values.push(eval_ast(arg, symbols)?);
    }
    Ok(values)
}

/// Pushes the items of an iterable argument; a number is not iterable.
fn spread_iterable(arg: &AstExpr, symbols: &SymbolTable, values: &mut Vec<Real>) -> Result<()> {
    let AstExpr::List(items) = arg else {
        let value = eval_ast(arg, symbols)?;
        let type_name = if value.is_finite() && value.fract() == 0.0 { "int" } else { "float" };
        return Err(ExprError::Other(format!("'{}' object is not iterable", type_name)));
    };
    for item in items {
        values.push(eval_ast(item, symbols)?);
    }
    Ok(())
}
