//! Lowering tests for the supported Python subset.

mod common;

use common::{input_of, inputs_of, lower, lower_into, operator, output_of};
use pypiler_core::{Error, LoweringErrorKind, LoweringOptions, RedefinitionPolicy};
use pypiler_graph::{Constant, GraphLowering, OperatorRegistry};
use pypiler_syntax::{FunctionRef, InlineLocator, PythonParser};

#[test]
fn test_boundary_exposes_parameters_and_returns() {
    let registry = lower("def add(x, y):\n    return x + y\n");
    let add = operator(&registry, "add");

    assert!(add.is_lowered());
    assert_eq!(add.parameters(), ["x", "y"]);
    assert_eq!(add.returns(), ["output"]);
    assert_eq!(output_of(add, "add", "x"), "x");
    assert_eq!(output_of(add, "add", "y"), "y");
    assert_eq!(input_of(add, "add", "output"), "(x + y) 2:12");
    assert!(add.validate().is_ok());
}

#[test]
fn test_binary_operator_operands() {
    let registry = lower("def add(x, y):\n    return x + y\n");
    let add = operator(&registry, "add");

    assert_eq!(inputs_of(add, "(x + y) 2:12"), ["inputL", "inputR", "operator"]);
    assert_eq!(input_of(add, "(x + y) 2:12", "inputL"), "x");
    assert_eq!(input_of(add, "(x + y) 2:12", "inputR"), "y");
    assert_eq!(input_of(add, "(x + y) 2:12", "operator"), "OpConst<+>");
    assert!(registry.is_placeholder("+"));
}

#[test]
fn test_keyword_call_matches_operator_shape() {
    let source = "\
def via_operator(a, b):
    return a + b

def via_call(a, b):
    return plus(inputL=a, inputR=b)
";
    let registry = lower(source);
    let binary = operator(&registry, "via_operator");
    let call = operator(&registry, "via_call");

    assert_eq!(
        inputs_of(binary, "(a + b) 2:12"),
        inputs_of(call, "(plus(inputL=a, inputR=b)) 5:12")
    );
    assert_eq!(input_of(call, "(plus(inputL=a, inputR=b)) 5:12", "inputL"), "a");
    assert_eq!(
        input_of(call, "(plus(inputL=a, inputR=b)) 5:12", "operator"),
        "OpConst<plus>"
    );
}

#[test]
fn test_constants_are_interned_per_operator() {
    let source = "\
def f(x):
    a = g(p=x, q=1)
    b = g(p=a, q=1)
    return b
";
    let registry = lower(source);
    let f = operator(&registry, "f");

    let literal = f.find_carrier("Literal<1>").unwrap();
    let callee = f.find_carrier("OpConst<g>").unwrap();
    assert_eq!(f.carrier(literal).destinations.len(), 2);
    assert_eq!(f.carrier(callee).destinations.len(), 2);

    let constants: Vec<_> = f
        .operations()
        .filter_map(|(_, operation)| operation.constant.clone())
        .collect();
    assert_eq!(
        constants,
        [
            Constant::Literal("1".into()),
            Constant::Operator("g".into())
        ]
    );
}

#[test]
fn test_constants_are_not_shared_across_operators() {
    let source = "\
def f(x):
    return x + 1

def g(y):
    return y + 1
";
    let registry = lower(source);

    assert!(operator(&registry, "f").find_operation("Literal<1>").is_some());
    assert!(operator(&registry, "g").find_operation("Literal<1>").is_some());
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_assignment_names_the_result_carrier() {
    let registry = lower("def f(a, b):\n    c = a + b\n    return c\n");
    let f = operator(&registry, "f");

    assert_eq!(output_of(f, "(a + b) 2:9", "output"), "c");
    assert_eq!(input_of(f, "f", "output"), "c");
    assert!(f.find_carrier("(a + b) 2:9").is_none());
}

#[test]
fn test_assignment_through_parentheses() {
    let registry = lower("def f(a, b):\n    c = (a + b)\n    return c\n");
    let f = operator(&registry, "f");

    assert_eq!(output_of(f, "(a + b) 2:10", "output"), "c");
}

#[test]
fn test_name_assignment_applies_alias() {
    let registry = lower("def f(x):\n    y = x\n    return y\n");
    let f = operator(&registry, "f");

    assert_eq!(input_of(f, "(y) 2:5", "input"), "x");
    assert_eq!(input_of(f, "(y) 2:5", "operator"), "OpConst<=>");
    assert_eq!(output_of(f, "(y) 2:5", "output"), "y");
    assert!(registry.contains(pypiler_graph::ALIAS_OPERATOR));
}

#[test]
fn test_literal_assignment_applies_alias() {
    let registry = lower("def f():\n    y = 1\n    return y\n");
    let f = operator(&registry, "f");

    assert_eq!(input_of(f, "(y) 2:5", "input"), "Literal<1>");
    assert_eq!(input_of(f, "f", "output"), "y");
}

#[test]
fn test_tuple_assignment_and_multiple_returns() {
    let registry = lower("def f(x):\n    a, b = x, 1\n    return a, b\n");
    let f = operator(&registry, "f");

    assert_eq!(input_of(f, "(a) 2:5", "input"), "x");
    assert_eq!(input_of(f, "(b) 2:8", "input"), "Literal<1>");
    assert_eq!(f.returns(), ["output0", "output1"]);
    assert_eq!(input_of(f, "f", "output0"), "a");
    assert_eq!(input_of(f, "f", "output1"), "b");
}

#[test]
fn test_bare_return_binds_nothing() {
    let registry = lower("def f(x):\n    return\n");
    let f = operator(&registry, "f");

    assert_eq!(f.parameters(), ["x"]);
    assert!(f.returns().is_empty());
}

#[test]
fn test_docstrings_and_pass_are_ignored() {
    let source = "\
def f(x):
    \"\"\"Returns its argument.\"\"\"
    pass
    ...
    return x
";
    let registry = lower(source);
    let f = operator(&registry, "f");

    assert_eq!(f.operations().count(), 1);
    assert_eq!(input_of(f, "f", "output"), "x");
}

#[test]
fn test_conditional_expression() {
    let registry = lower("def f(c, a, b):\n    return a if c else b\n");
    let f = operator(&registry, "f");
    let operation = "(a if c else b) 2:12";

    assert_eq!(
        inputs_of(f, operation),
        ["inputTrue", "condition", "inputFalse", "operator"]
    );
    assert_eq!(input_of(f, operation, "condition"), "c");
    assert_eq!(input_of(f, operation, "operator"), "OpConst<conditional>");
    assert!(registry.contains(pypiler_graph::CONDITIONAL_OPERATOR));
}

#[test]
fn test_unary_operators() {
    let registry = lower("def neg(x):\n    return -x\n\ndef inv(x):\n    return not x\n");

    assert_eq!(inputs_of(operator(&registry, "neg"), "(-x) 2:12"), ["input", "operator"]);
    assert_eq!(input_of(operator(&registry, "inv"), "(not x) 5:12", "input"), "x");
    assert!(registry.contains("-"));
    assert!(registry.contains("not"));
}

#[test]
fn test_comparison_and_boolean_operators() {
    let registry = lower("def f(a, b):\n    c = a not in b\n    return c and a\n");
    let f = operator(&registry, "f");

    assert_eq!(input_of(f, "(a not in b) 2:9", "operator"), "OpConst<not in>");
    assert_eq!(input_of(f, "(c and a) 3:12", "inputL"), "c");
    assert!(registry.contains("not in"));
    assert!(registry.contains("and"));
}

#[test]
fn test_nested_calls_chain_carriers() {
    let registry = lower("def f(x):\n    return outer(v=inner(w=x))\n");
    let f = operator(&registry, "f");

    assert_eq!(
        input_of(f, "(outer(v=inner(w=x))) 2:12", "v"),
        "(inner(w=x)) 2:20"
    );
    assert_eq!(input_of(f, "(inner(w=x)) 2:20", "w"), "x");
}

#[test]
fn test_attribute_callee_names_operator() {
    let registry = lower("def f(a):\n    return math.sqrt(x=a)\n");

    assert!(registry.is_placeholder("math.sqrt"));
}

#[test]
fn test_expression_statement_is_lowered() {
    let registry = lower("def f(x):\n    log(v=x)\n    return x\n");
    let f = operator(&registry, "f");

    assert_eq!(output_of(f, "(log(v=x)) 2:5", "output"), "(log(v=x)) 2:5");
}

#[test]
fn test_recursive_call_resolves() {
    let registry = lower("def fact(n):\n    return fact(n=n)\n");
    let fact = operator(&registry, "fact");

    assert!(fact.is_lowered());
    assert_eq!(input_of(fact, "(fact(n=n)) 2:12", "operator"), "OpConst<fact>");
}

#[test]
fn test_forward_reference_is_filled_in_later() {
    let mut registry = OperatorRegistry::new();
    lower_into(&mut registry, "def f(x):\n    return later(v=x)\n").unwrap();
    assert!(registry.is_placeholder("later"));

    lower_into(&mut registry, "def later(v):\n    return v\n").unwrap();
    assert!(!registry.is_placeholder("later"));
    assert_eq!(operator(&registry, "later").parameters(), ["v"]);
}

#[test]
fn test_redefinition_replaces_by_default() {
    let mut registry = OperatorRegistry::new();
    lower_into(&mut registry, "def f(x):\n    return x\n").unwrap();
    lower_into(&mut registry, "def f(y):\n    return y\n").unwrap();

    assert_eq!(operator(&registry, "f").parameters(), ["y"]);
}

#[test]
fn test_redefinition_can_be_rejected() {
    let options = LoweringOptions::new(RedefinitionPolicy::Reject);
    let mut registry = OperatorRegistry::with_options(options);
    lower_into(&mut registry, "def f(x):\n    return x\n").unwrap();

    let result = lower_into(&mut registry, "def f(y):\n    return y\n");
    match result {
        Err(Error::Lowering(error)) => {
            assert_eq!(error.kind, LoweringErrorKind::Redefinition("f".into()));
            assert_eq!((error.line(), error.column()), (1, 5));
        }
        other => panic!("expected a redefinition error, got {other:?}"),
    }
    assert_eq!(operator(&registry, "f").parameters(), ["x"]);
}

#[test]
fn test_failed_lowering_keeps_previous_operator() {
    let mut registry = OperatorRegistry::new();
    lower_into(&mut registry, "def f(x):\n    return x\n").unwrap();

    let result = lower_into(&mut registry, "def f(y):\n    if y:\n        pass\n");
    assert!(result.is_err());
    assert_eq!(operator(&registry, "f").parameters(), ["x"]);
}

#[test]
fn test_lower_function_from_module() {
    let locator = InlineLocator::new("def first(a):\n    return a\n\ndef second(b):\n    return -b\n");
    let mut registry = OperatorRegistry::new();
    let mut lowering = GraphLowering::new(&mut registry);

    let second = lowering
        .lower_function(&locator, &PythonParser::new(), &FunctionRef::new("second"))
        .unwrap();
    assert_eq!(second.name(), "second");
    assert_eq!(second.parameters(), ["b"]);

    let missing =
        lowering.lower_function(&locator, &PythonParser::new(), &FunctionRef::new("third"));
    assert!(matches!(missing, Err(Error::Locate(_))));

    assert!(lowering.registry().lookup("first").is_none());
}

#[test]
fn test_lower_source_returns_names_in_order() {
    let mut registry = OperatorRegistry::new();
    let names = lower_into(
        &mut registry,
        "import math\n\ndef b(x):\n    return x\n\ndef a(y):\n    return y\n",
    )
    .unwrap();

    assert_eq!(names, ["b", "a"]);
}
