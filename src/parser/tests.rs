//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Let, declare-assign, return and expression statements
//! - Operator precedence and associativity
//! - If expressions, function literals and calls
//! - Error recovery and diagnostics
//! - Comment and strict-literal options

use crate::{
    ast::{
        ast::{Expr, Node, Program, Stmt},
        expressions::{FunctionLiteral, IfExpr},
    },
    lexer::{lexer::Lexer, tokens::TokenKind},
    options::ParseOptions,
};

use super::parser::{parse, parse_with_options, Parser};

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source.to_string(), Some("test.gs".to_string()));
    assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
    program
}

fn parse_errors(source: &str) -> (Program, Vec<String>) {
    let (program, errors) = parse(source.to_string(), Some("test.gs".to_string()));
    assert!(!errors.is_empty(), "expected errors for {:?}", source);
    (program, errors)
}

fn single_expr(program: &Program) -> &Expr {
    assert_eq!(program.statements.len(), 1, "statements: {}", program);
    match &program.statements[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn as_function(expr: &Expr) -> &FunctionLiteral {
    match expr {
        Expr::Function(function) => function,
        other => panic!("expected function literal, got {:?}", other),
    }
}

fn as_if(expr: &Expr) -> &IfExpr {
    match expr {
        Expr::If(if_expr) => if_expr,
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_parse_basic_program() {
    let source = "
let x = 5
let y = \"hello\"
let add = fn(a, b) { a + b }
if (x < 10) { x } else { y }
return add(x, 15)
!true
";
    let program = parse_ok(source);

    assert_eq!(program.statements.len(), 6);
    assert!(matches!(program.statements[0], Stmt::Let(_)));
    assert!(matches!(program.statements[1], Stmt::Let(_)));
    assert!(matches!(program.statements[2], Stmt::Let(_)));
    assert!(matches!(program.statements[3], Stmt::Expression(_)));
    assert!(matches!(program.statements[4], Stmt::Return(_)));
    assert!(matches!(program.statements[5], Stmt::Expression(_)));
}

#[test]
fn test_let_without_terminator() {
    let program = parse_ok("let x = 5");

    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Stmt::Let(stmt) => {
            assert_eq!(stmt.name.value, "x");
            match &stmt.value {
                Expr::Integer(literal) => assert_eq!(literal.value, 5),
                other => panic!("expected integer, got {:?}", other),
            }
            assert_eq!(stmt.span.range(), 0..9);
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_let_statements() {
    let tests = [
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y;", "foobar", "y"),
        ("let greeting = \"hi\";", "greeting", "\"hi\""),
    ];

    for (source, name, value) in tests {
        let program = parse_ok(source);
        match &program.statements[0] {
            Stmt::Let(stmt) => {
                assert_eq!(stmt.name.value, name);
                assert_eq!(stmt.value.to_string(), value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_declare_assign_is_a_let() {
    let program = parse_ok("x ;= 5\nlet y ;= x");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "let x = 5;");
    assert_eq!(program.statements[1].to_string(), "let y = x;");
}

#[test]
fn test_return_statements() {
    let program = parse_ok("return 5; return add(1, 2);");

    assert_eq!(program.statements.len(), 2);
    for stmt in &program.statements {
        assert!(matches!(stmt, Stmt::Return(_)));
    }
    assert_eq!(program.statements[1].to_string(), "return add(1, 2);");
}

#[test]
fn test_literal_expressions() {
    let program = parse_ok("foobar; 5; \"text\"; true; false;");

    assert_eq!(program.statements.len(), 5);
    let kinds: Vec<_> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(stmt) => match &stmt.expression {
                Expr::Identifier(_) => "identifier",
                Expr::Integer(_) => "integer",
                Expr::String(_) => "string",
                Expr::Boolean(_) => "boolean",
                _ => "other",
            },
            _ => "statement",
        })
        .collect();

    assert_eq!(
        kinds,
        vec!["identifier", "integer", "string", "boolean", "boolean"]
    );
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let program = parse_ok("a + b * c");

    match single_expr(&program) {
        Expr::Infix(infix) => {
            assert_eq!(infix.operator, "+");
            assert!(matches!(infix.left.as_ref(), Expr::Identifier(ident) if ident.value == "a"));
            match infix.right.as_ref() {
                Expr::Infix(right) => {
                    assert_eq!(right.operator, "*");
                    assert_eq!(right.left.to_string(), "b");
                    assert_eq!(right.right.to_string(), "c");
                }
                other => panic!("expected infix on the right, got {:?}", other),
            }
        }
        other => panic!("expected infix expression, got {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    let tests = [
        ("a + b * c", "(a + (b * c))"),
        ("a + b || c * d", "((a + b) || (c * d))"),
        ("a - b - c", "((a - b) - c)"),
        ("a * b / c % d", "(((a * b) / c) % d)"),
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a < b == c > d", "((a < b) == (c > d))"),
        ("a != b == c", "((a != b) == c)"),
        ("a && b || c && d", "((a && b) || (c && d))"),
        ("a || b && c == d", "(a || (b && (c == d)))"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("\"a\" .. \"b\" .. c", "((\"a\" .. \"b\") .. c)"),
        ("a .. b * c", "(a .. (b * c))"),
        ("3 + 4; -5 * 5", "(3 + 4)\n((-5) * 5)"),
    ];

    for (source, expected) in tests {
        let program = parse_ok(source);
        assert_eq!(program.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_if_else_expression() {
    let program = parse_ok("if (x < y) { x } else { y }");
    let if_expr = as_if(single_expr(&program));

    assert_eq!(if_expr.condition.to_string(), "(x < y)");
    assert_eq!(if_expr.consequence.len(), 1);
    assert_eq!(if_expr.consequence.body[0].to_string(), "x");

    let alternative = if_expr.alternative.as_ref().expect("alternative block");
    assert_eq!(alternative.len(), 1);
    assert_eq!(alternative.body[0].to_string(), "y");

    assert_eq!(program.to_string(), "if (x < y) { x } else { y }");
}

#[test]
fn test_if_without_else() {
    let program = parse_ok("if (ready) { go() }");
    let if_expr = as_if(single_expr(&program));

    assert!(if_expr.alternative.is_none());
    assert_eq!(program.to_string(), "if (ready) { go() }");
}

#[test]
fn test_if_as_let_value() {
    let program = parse_ok("let max = if (a > b) { a } else { b };");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(
        program.to_string(),
        "let max = if (a > b) { a } else { b };"
    );
}

#[test]
fn test_function_literal() {
    let program = parse_ok("fn(x, y) { x + y }");
    let function = as_function(single_expr(&program));

    let parameters: Vec<&str> = function
        .parameters
        .iter()
        .map(|parameter| parameter.value.as_str())
        .collect();
    assert_eq!(parameters, vec!["x", "y"]);
    assert_eq!(function.body.len(), 1);
    assert_eq!(function.body.body[0].to_string(), "(x + y)");
    assert_eq!(function.span.range(), 0..18);
    assert_eq!(single_expr(&program).get_span().range(), 0..18);
}

#[test]
fn test_function_parameter_counts() {
    let tests = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (source, expected) in tests {
        let program = parse_ok(source);
        let function = as_function(single_expr(&program));
        let parameters: Vec<&str> = function
            .parameters
            .iter()
            .map(|parameter| parameter.value.as_str())
            .collect();
        assert_eq!(parameters, expected, "source: {}", source);
        assert!(function.body.is_empty());
    }
}

#[test]
fn test_typed_parameters_are_not_consumed() {
    let (_, errors) = parse_errors("fn(x: int) { x }");

    assert_eq!(
        errors[0],
        "expected next token to be CloseParen, got Colon instead"
    );
}

#[test]
fn test_call_expression() {
    let program = parse_ok("add(1, 2 * 3, 4 + 5);");

    match single_expr(&program) {
        Expr::Call(call) => {
            assert_eq!(call.callee.to_string(), "add");
            assert_eq!(call.arguments.len(), 3);
            assert_eq!(call.arguments[0].to_string(), "1");
            assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
            assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
        }
        other => panic!("expected call expression, got {:?}", other),
    }
}

#[test]
fn test_call_on_function_literal() {
    let program = parse_ok("fn(x) { x }(5)");

    match single_expr(&program) {
        Expr::Call(call) => {
            assert!(matches!(call.callee.as_ref(), Expr::Function(_)));
            assert_eq!(call.arguments.len(), 1);
        }
        other => panic!("expected call expression, got {:?}", other),
    }
    assert_eq!(program.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_error_recovery_continues_parsing() {
    let (program, errors) = parse_errors("let = 5; let y = 10;");

    assert_eq!(
        errors,
        vec![
            "expected next token to be Identifier, got Assign instead".to_string(),
            "no prefix parse function for Assign found".to_string(),
        ]
    );
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "5");
    assert_eq!(program.statements[1].to_string(), "let y = 10;");
}

#[test]
fn test_let_requires_assignment() {
    let (_, errors) = parse_errors("let x 5");

    assert_eq!(
        errors[0],
        "expected next token to be Assign, got Integer instead"
    );
}

#[test]
fn test_no_prefix_parse_function() {
    let (program, errors) = parse_errors("+ 5");

    assert_eq!(errors, vec!["no prefix parse function for Plus found".to_string()]);
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.statements[0].to_string(), "5");
}

#[test]
fn test_illegal_tokens_surface_as_parse_errors() {
    let (_, errors) = parse_errors("a & b");

    assert!(errors.contains(&"no prefix parse function for Illegal found".to_string()));
}

#[test]
fn test_integer_out_of_range() {
    let (program, errors) = parse_errors("99999999999999999999");

    assert_eq!(
        errors,
        vec!["could not parse \"99999999999999999999\" as integer".to_string()]
    );
    assert!(program.is_empty());
}

#[test]
fn test_missing_close_paren() {
    let (_, errors) = parse_errors("(1 + 2");

    assert_eq!(
        errors,
        vec!["expected next token to be CloseParen, got EOF instead".to_string()]
    );
}

#[test]
fn test_errors_inside_block_keep_block() {
    let (program, errors) = parse_errors("fn(x) { let = 1; x }");

    assert_eq!(errors.len(), 2);
    assert_eq!(program.statements.len(), 1);
    let function = as_function(single_expr(&program));
    assert_eq!(function.body.len(), 2);
    assert_eq!(function.body.body[1].to_string(), "x");
}

#[test]
fn test_unclosed_block_runs_to_eof() {
    let program = parse_ok("if (x) { y");
    let if_expr = as_if(single_expr(&program));

    assert_eq!(if_expr.consequence.len(), 1);
    assert!(if_expr.alternative.is_none());
}

#[test]
fn test_whitespace_and_comments_only() {
    let source = "  # note\n ## block\n comment ##  \n";

    let program = parse_ok(source);
    assert!(program.is_empty());
    assert!(program.comments.is_empty());

    let (program, errors) = parse_with_options(
        source.to_string(),
        None,
        ParseOptions::default().emit_comments(),
    );
    assert!(errors.is_empty());
    assert!(program.is_empty());
    assert_eq!(program.comments.len(), 2);
    assert_eq!(program.comments[0].kind, TokenKind::CommentSingle);
    assert_eq!(program.comments[1].kind, TokenKind::CommentMulti);
}

#[test]
fn test_emitted_comments_do_not_disturb_statements() {
    let (program, errors) = parse_with_options(
        "let x = 1 # one\nx + ## inline ## 2".to_string(),
        None,
        ParseOptions::default().emit_comments(),
    );

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let x = 1;\n(x + 2)");
    assert_eq!(program.comments.len(), 2);
    assert_eq!(program.comments[0].value, "# one");
}

#[test]
fn test_strict_literals_report_unterminated_string() {
    let source = "let s = \"abc";

    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1);

    let (program, errors) =
        parse_with_options(source.to_string(), None, ParseOptions::default().strict());
    assert_eq!(program.statements.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "unterminated string literal");
    assert_eq!(errors[0].get_position().0, 8);
}

#[test]
fn test_strict_literals_report_unterminated_comment() {
    let (program, errors) = parse_with_options(
        "x ## open".to_string(),
        None,
        ParseOptions::default().strict(),
    );

    assert_eq!(program.statements.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "unterminated block comment");
}

#[test]
fn test_parser_accessors() {
    let lexer = Lexer::new("let = 1".to_string(), Some("test.gs".to_string()));
    let mut parser = Parser::new(lexer, ParseOptions::default());

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Assign);

    let program = parser.parse_program();
    assert_eq!(program.statements.len(), 1);
    assert_eq!(parser.errors().len(), 2);
    assert_eq!(parser.diagnostics()[0].get_position().0, 4);
    assert_eq!(parser.diagnostics()[0].get_position().1.as_str(), "test.gs");
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}

#[test]
fn test_comparison_in_if_condition() {
    let program = parse_ok("if (x < y) { x } else { y }\nif (a > b) { a }");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[1].to_string(), "if (a > b) { a }");
}

#[test]
fn test_inner_block_error_keeps_outer_block() {
    let (program, errors) = parse_errors("fn() { (fn() { a } }");

    assert_eq!(
        errors,
        vec!["expected next token to be CloseParen, got CloseCurly instead".to_string()]
    );
    assert_eq!(program.statements.len(), 1);
    let function = as_function(single_expr(&program));
    assert!(function.body.is_empty());
}

#[test]
fn test_block_closes_after_dangling_operator() {
    let (program, errors) = parse_errors("if (x) { 1 + } let y = 2");

    assert_eq!(
        errors,
        vec!["no prefix parse function for CloseCurly found".to_string()]
    );
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[1].to_string(), "let y = 2;");
}
