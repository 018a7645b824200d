//! Integration tests for the webcalc library
//! These tests exercise the calculator pipeline at increasing levels of complexity

use webcalc::calculator::Calculator;
use webcalc::engine::{interp, parse_expression};
use webcalc::error::ExprError;
use webcalc::eval::eval_ast;
use webcalc::symbols::{Arity, SymbolTable};
use webcalc::{Real, Rewrites, assert_approx_eq, constants};

fn check(calc: &Calculator, cases: &[(&str, &str)]) {
    for (input, expected) in cases {
        assert_eq!(calc.evaluate(input), *expected, "input: {input:?}");
    }
}

/// Level 1: Plain arithmetic
#[test]
fn test_basic_arithmetic() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("2+3", "5"),
            ("2 + 3 * 4", "14"),
            ("(2 + 3) * 4", "20"),
            ("10 - 2 - 3", "5"),
            ("7 / 2", "3.5"),
            ("8 / 2", "4"),
            ("0.1 + 0.2", "0.3"),
            ("1 / 3", "0.3333333333"),
            ("2 / 3", "0.6666666667"),
            ("-5 + 2", "-3"),
            ("--5", "5"),
            ("+7", "7"),
            ("1e3 + 1", "1001"),
            (".5 * 4", "2"),
        ],
    );
}

/// Level 2: Python-style operators
#[test]
fn test_python_operators() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("7 // 2", "3"),
            ("-7 // 2", "-4"),
            ("7 % 3", "1"),
            ("-7 % 3", "2"),
            ("7 % -3", "-2"),
            ("5.5 % 2", "1.5"),
            ("2 ** 10", "1024"),
            ("2 ^ 10", "8"),
            ("2 ^ 3", "1"),
            ("1 + 2 ^ 3", "0"),
            ("2 ^ 3 * 4", "14"),
            ("-2 ^ 3", "-3"),
            ("2 ** 3 ** 2", "512"),
            ("-2 ** 2", "-4"),
            ("(-2) ** 2", "4"),
            ("2 ** -1", "0.5"),
            ("4 ** 0.5", "2"),
        ],
    );
}

/// Level 3: Functions and constants from the restricted table
#[test]
fn test_functions_and_constants() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("sqrt(16)", "4"),
            ("sqrt(2)", "1.414213562"),
            ("pi", "3.141592654"),
            ("e", "2.718281828"),
            ("tau / 2 - pi", "0"),
            ("sin(0)", "0"),
            ("cos(0)", "1"),
            ("degrees(pi)", "180"),
            ("log(100, 10)", "2"),
            ("log10(1000)", "3"),
            ("log2(1024)", "10"),
            ("factorial(5)", "120"),
            ("factorial(20)", "2432902008176640000"),
            ("floor(-2.5)", "-3"),
            ("ceil(2.1)", "3"),
            ("abs(-3)", "3"),
            ("round(2.5)", "2"),
            ("round(3.5)", "4"),
            ("round(3.14159, 2)", "3.14"),
            ("hypot(3, 4)", "5"),
            ("gcd(12, 18)", "6"),
            ("comb(5, 2)", "10"),
            ("min(3, 1, 2)", "1"),
            ("max([4, 9, 2])", "9"),
            ("sum([1, 2, 3])", "6"),
            ("sum([1, 2, 3], 10)", "16"),
            ("fsum([0.1, 0.2, 0.3])", "0.6"),
            ("prod((2, 3, 4))", "24"),
        ],
    );
}

/// Level 4: Keypad substitutions
#[test]
fn test_keypad_substitutions() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("√9", "3"),
            ("√(16) + 1", "5"),
            ("√√16", "2"),
            ("2 * √9", "6"),
            ("π", "3.141592654"),
            ("2 * π", "6.283185307"),
            ("√π", "1.772453851"),
            ("50%", "0.5"),
            ("200 * 15%", "30"),
            ("10 % 3", "1"),
            ("10%3", "1"),
            ("12.5% + 1", "1.125"),
        ],
    );
}

/// Level 5: Error messages
#[test]
fn test_error_messages() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("1 / 0", "Error: Division by zero"),
            ("1 // 0", "Error: Division by zero"),
            ("5 % 0", "Error: Division by zero"),
            ("0 ** -1", "Error: Division by zero"),
            ("sqrt(-1)", "Error: math domain error"),
            ("log(0)", "Error: math domain error"),
            ("acos(2)", "Error: math domain error"),
            ("factorial(-1)", "Error: factorial() not defined for negative values"),
            ("2 +", "Error: Invalid expression"),
            ("(1 + 2", "Error: Invalid expression"),
            ("1 + 2)", "Error: Invalid expression"),
            ("", "Error: Invalid expression"),
            ("1 +* 2", "Error: Invalid expression"),
            ("2π", "Error: Invalid expression"),
            ("1, 2", "Error: Invalid expression"),
            ("$", "Error: Invalid expression"),
            ("foo", "Error: name 'foo' is not defined"),
            ("__import__(1)", "Error: name '__import__' is not defined"),
            ("pi(2)", "Error: 'pi' is not callable"),
            ("sqrt", "Error: must be real number, not builtin_function_or_method"),
            ("[1, 2] + 1", "Error: must be real number, not list"),
            ("(-8) ** (1/3)", "Error: must be real number, not complex"),
            ("inf", "Error: Invalid operation"),
            ("nan", "Error: Invalid operation"),
            ("1e308 * 10", "Error: Invalid operation"),
            ("10.0 ** 400", "Error: (34, 'Numerical result out of range')"),
            ("2.5 ^ 1", "Error: unsupported operand type(s) for ^: 'float' and 'int'"),
            ("1 ^ 0.5", "Error: unsupported operand type(s) for ^: 'int' and 'float'"),
            ("sum(1, 2)", "Error: 'int' object is not iterable"),
            ("max(5)", "Error: 'int' object is not iterable"),
            ("fsum(0.5)", "Error: 'float' object is not iterable"),
            ("max([])", "Error: max() arg is an empty sequence"),
        ],
    );
}

/// Level 6: Wrong argument counts
#[test]
fn test_arity_errors() {
    let calc = Calculator::new();
    check(
        &calc,
        &[
            ("sqrt()", "Error: sqrt() takes exactly one argument (0 given)"),
            ("sqrt(1, 2)", "Error: sqrt() takes exactly one argument (2 given)"),
            ("atan2(1)", "Error: atan2() takes exactly 2 arguments (1 given)"),
            ("log(1, 2, 3)", "Error: log() takes from 1 to 2 arguments (3 given)"),
        ],
    );
}

/// Level 7: The engine without the calculator front end
#[test]
fn test_engine_directly() {
    assert_eq!(interp("2 + 3", None).unwrap(), 5.0);
    assert_approx_eq!(interp("sin(pi / 6)", None).unwrap(), 0.5);
    assert_approx_eq!(interp("pi", None).unwrap(), constants::PI, constants::TEST_PRECISION);

    // No keypad substitutions here
    assert!(interp("√9", None).is_err());
    assert!(matches!(interp("1 / 0", None), Err(ExprError::DivideByZero)));

    // Non-finite results pass through
    assert!(interp("inf", None).unwrap().is_infinite());

    let symbols = SymbolTable::new();
    let ast = parse_expression("2 ** 8 - 1").unwrap();
    assert_eq!(eval_ast(&ast, &symbols).unwrap(), 255.0);
}

/// Level 8: Custom symbol tables
#[test]
fn test_custom_symbol_table() {
    let mut symbols = SymbolTable::new();
    symbols.register_constant("answer", 42.0).unwrap();
    symbols
        .register_native_function("double", Arity::Exact(1), |args| Ok(args[0] * 2.0))
        .unwrap();
    symbols
        .register_iterable_function("mean", Arity::AtLeast(1), |args| {
            Ok(args.iter().sum::<Real>() / args.len() as Real)
        })
        .unwrap();

    let calc = Calculator::builder().symbols(symbols).build();
    check(
        &calc,
        &[
            ("answer", "42"),
            ("double(answer)", "84"),
            ("mean([1, 2, 3, 6])", "3"),
            ("mean(1, 2)", "1.5"),
            ("mean(4)", "Error: 'int' object is not iterable"),
            ("double()", "Error: double() takes exactly one argument (0 given)"),
        ],
    );

    let bare = Calculator::builder().symbols(SymbolTable::empty()).build();
    assert_eq!(bare.evaluate("pi"), "Error: name 'pi' is not defined");
    assert_eq!(bare.evaluate("1 + 1"), "2");
}

/// Level 9: Builder settings
#[test]
fn test_calculator_settings() {
    let plain = Calculator::builder().rewrites(Rewrites::STRIP_SPACES).build();
    assert_eq!(plain.evaluate("√9"), "Error: Invalid expression");
    assert_eq!(plain.evaluate("50 % 8"), "2");

    let coarse = Calculator::builder().precision(4).build();
    assert_eq!(coarse.evaluate("pi"), "3.142");
    assert_eq!(coarse.evaluate("2 ** 40"), "1099511627776");

    let shallow = Calculator::builder().max_depth(5).build();
    assert_eq!(shallow.evaluate("((((((((1))))))))"), "Error: Invalid expression");
    assert_eq!(shallow.evaluate("(1)"), "1");
    assert_eq!(shallow.evaluate("1+1+1"), "3");
    assert_eq!(shallow.evaluate("1+1+1+1+1+1+1+1"), "Error: Invalid expression");
}

/// Level 10: Oversized and deeply nested input fails cleanly
#[test]
fn test_hostile_input() {
    let calc = Calculator::new();
    for input in [
        format!("{}4", "√".repeat(200_000)),
        format!("{}4", "√".repeat(3_000)),
        format!("{}4{}", "√(".repeat(3_000), ")".repeat(3_000)),
        format!("{}1", "1+".repeat(4_999)),
        format!("{}1", "2**".repeat(3_000)),
        "(".repeat(20_000),
    ] {
        assert_eq!(calc.evaluate(&input), "Error: Invalid expression", "input of {} bytes", input.len());
    }
    assert_eq!(calc.evaluate(&format!("{}1", "1+".repeat(150))), "151");
}

/// Evaluation is shareable across threads
#[test]
fn test_calculator_is_shareable() {
    let calc = std::sync::Arc::new(Calculator::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let calc = calc.clone();
            std::thread::spawn(move || calc.evaluate(&format!("{i} * 10")))
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["0", "10", "20", "30"]);
}
