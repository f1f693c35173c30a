// Integration tests for the parser

use yac::parser::ast::{Expression, InfixOperator, Node, Statement};
use yac::parser::diagnostics::DiagnosticKind;
use yac::parser::token::TokenKind;
use yac::{parse, tokenize};

fn assert_no_errors(source: &str) -> yac::ParseOutput {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "unexpected diagnostics for {:?}: {:#?}",
        source,
        output.messages()
    );
    output
}

#[test]
fn test_operator_precedence_rendering() {
    let cases = [
        ("i = -a * b;", "i = ((-a) * b);"),
        ("i = !-a;", "i = (!(-a));"),
        ("i = a + b + c;", "i = ((a + b) + c);"),
        ("i = a + b - c;", "i = ((a + b) - c);"),
        ("i = a * b * c;", "i = ((a * b) * c);"),
        ("i = a * b / c;", "i = ((a * b) / c);"),
        ("i = a + b / c;", "i = (a + (b / c));"),
        ("i = a + b * c + d / e - f;", "i = (((a + (b * c)) + (d / e)) - f);"),
        ("i = (3 + 4) * (-5 * 5);", "i = ((3 + 4) * ((-5) * 5));"),
        ("i = 5 > 4 == 3 < 4;", "i = ((5 > 4) == (3 < 4));"),
        ("i = 5 < 4 != 3 > 4;", "i = ((5 < 4) != (3 > 4));"),
        (
            "i = 3 + 4 * 5 == 3 * 1 + 4 * 5;",
            "i = ((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));",
        ),
        ("i = true;", "i = true;"),
        ("i = false;", "i = false;"),
        ("i = 3 > 5 == false;", "i = ((3 > 5) == false);"),
        ("i = 3 < 5 == true;", "i = ((3 < 5) == true);"),
        ("i =1 + (2 + 3) + 4;", "i = ((1 + (2 + 3)) + 4);"),
        ("i =(5 + 5) * 2;", "i = ((5 + 5) * 2);"),
        ("i =2 / (5 + 5);", "i = (2 / (5 + 5));"),
        ("i =-(5 + 5);", "i = (-(5 + 5));"),
        ("i =!(true == true);", "i = (!(true == true));"),
        ("i = a + add(b * c) + d;", "i = ((a + add((b * c))) + d);"),
        (
            "i = add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
            "i = add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));",
        ),
        ("i = add(a + b + c * d / f + g);", "i = add((((a + b) + ((c * d) / f)) + g));"),
    ];

    for (input, expected) in cases {
        let output = assert_no_errors(input);
        assert_eq!(output.program.to_source_string(), expected, "input: {input}");
    }
}

#[test]
fn test_let_statement_count() {
    let output = assert_no_errors("let x = 5;\nlet y = 10;\nlet foobar = 838383;\n");
    assert_eq!(output.program.statements.len(), 3);

    let names: Vec<&str> = output
        .program
        .statements
        .iter()
        .map(|s| match s {
            Statement::Let(stmt) => stmt.name.name.as_str(),
            other => panic!("Expected let statement, got {:?}", other),
        })
        .collect();
    assert_eq!(names, ["x", "y", "foobar"]);
}

#[test]
fn test_call_expression_structure() {
    let output = assert_no_errors("a=add(1, 2 * 3, 4 + 5);");
    assert_eq!(output.program.statements.len(), 1);

    let Statement::Assignment(stmt) = &output.program.statements[0] else {
        panic!("Expected assignment, got {:?}", output.program.statements[0]);
    };
    assert_eq!(stmt.name.name, "a");

    let Expression::Call(call) = &stmt.value else {
        panic!("Expected call expression, got {:?}", stmt.value);
    };
    assert!(matches!(&*call.function, Expression::Identifier(id) if id.name == "add"));
    assert_eq!(call.arguments.len(), 3);
    assert!(matches!(&call.arguments[0], Expression::Integer(lit) if lit.value == 1));
    assert!(matches!(
        &call.arguments[1],
        Expression::Infix(infix) if infix.operator == InfixOperator::Asterisk
    ));
    assert!(matches!(
        &call.arguments[2],
        Expression::Infix(infix) if infix.operator == InfixOperator::Plus
    ));
}

#[test]
fn test_if_else_shape() {
    let output = assert_no_errors("if (x < y) { x=1; } else { x=10; }");
    assert_eq!(output.program.statements.len(), 1);

    let Statement::If(stmt) = &output.program.statements[0] else {
        panic!("Expected if statement, got {:?}", output.program.statements[0]);
    };
    match &stmt.condition {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, InfixOperator::Lt);
            assert_eq!(infix.left.to_string(), "x");
            assert_eq!(infix.right.to_string(), "y");
        }
        other => panic!("Expected infix condition, got {:?}", other),
    }

    assert_eq!(stmt.consequence.statements.len(), 1);
    assert!(matches!(stmt.consequence.statements[0], Statement::Assignment(_)));
    assert_eq!(stmt.consequence.statements[0].to_string(), "x = 1;");

    let alternative = stmt.alternative.as_ref().expect("missing else block");
    assert_eq!(alternative.statements.len(), 1);
    assert!(matches!(alternative.statements[0], Statement::Assignment(_)));
    assert_eq!(alternative.statements[0].to_string(), "x = 10;");
}

#[test]
fn test_if_else_across_lines() {
    let source = "if (x < y)\n{\n\tx=1;\n}\nelse {\n\tx=10;\n}\n";
    let output = assert_no_errors(source);
    assert_eq!(
        output.program.to_string(),
        "if (x < y) { x = 1; } else { x = 10; }"
    );
}

#[test]
fn test_token_literals_match_start_tokens() {
    let output = assert_no_errors("let a = 1; return -a; b = a * 2; if (a) { } fn(x) { }");
    let literals: Vec<&str> = output
        .program
        .statements
        .iter()
        .map(|s| s.token_literal())
        .collect();
    assert_eq!(literals, ["let", "return", "b", "if", "fn"]);
}

#[test]
fn test_malformed_input_terminates() {
    let source = "let x = add(1, 2 * (3 + 4));\nif (x > 1) { y = fn(a, b) { return a; }; } else { y = -x; }\nreturn !y;";
    assert_no_errors(source);

    // Every truncation and every single-character deletion must still parse
    // to completion.
    let chars: Vec<char> = source.chars().collect();
    for end in 0..=chars.len() {
        let truncated: String = chars[..end].iter().collect();
        let _ = parse(&truncated);
    }
    for skip in 0..chars.len() {
        let damaged: String = chars
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| *c)
            .collect();
        let _ = parse(&damaged);
    }
}

#[test]
fn test_garbage_input() {
    for source in [
        "",
        ";;;",
        "}}}{{{",
        "let",
        "let x",
        "let x =",
        "return",
        "if",
        "if (",
        "fn(",
        "fn(a,",
        "a = add(1,",
        "@@@ $$$",
        "((((((((((",
        "x = 1 +;",
        "else { }",
    ] {
        let output = parse(source);
        assert!(
            output.program.statements.len() <= 1,
            "{source:?} produced {:?}",
            output.program
        );
    }
}

#[test]
fn test_partial_program_keeps_good_statements() {
    let output = parse("let a = 1;\nlet = 2;\nlet c = 3;\nd = ;\nreturn a;");
    assert_eq!(output.program.to_string(), "let a = 1;let c = 3;return a;");
    assert_eq!(output.diagnostics.len(), 2);
    for message in output.messages() {
        assert!(message.starts_with("Parse error at line "));
    }
}

#[test]
fn test_diagnostics_point_at_source() {
    let output = parse("let a = 1;\nlet = 2;");
    assert_eq!(
        output.messages(),
        ["Parse error at line 2, column 5: expected next token to be IDENT, got = instead"]
    );

    let output = parse("if (a) {\n  b = 1;");
    assert!(output.program.is_empty());
    assert_eq!(
        output.messages(),
        ["Parse error at line 2, column 9: expected '}' to close block opened at 1:8, reached end of input"]
    );

    let output = parse("x = 1;\n  y = 2 @ 3;");
    assert_eq!(
        output.messages(),
        [
            "Parse error at line 2, column 9: expected next token to be ;, got ILLEGAL instead",
            "Parse error at line 2, column 9: illegal character \"@\"",
        ]
    );
}

#[test]
fn test_deep_nesting_does_not_crash() {
    let deep_minus = format!("x = {}1;", "-".repeat(100_000));
    let deep_group = format!("x = {}", "(".repeat(100_000));

    for source in [deep_minus, deep_group] {
        let output = parse(&source);
        assert!(output.program.is_empty());
        assert!(output
            .diagnostics
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::NestingTooDeep { .. })));
    }

    // A plain run of parentheses never starts an expression.
    let output = parse(&"(".repeat(100_000));
    assert!(output.program.is_empty());
    assert!(!output.has_errors());
}

#[test]
fn test_rendering_reparses_identically() {
    let sources = [
        "i = a + b * c + d / e - f;",
        "let x = (3 + 4) * (-5 * 5);",
        "if (x < y) { x = 1; } else { x = 10; }",
        "let add = fn(a, b) { return a + b; };",
        "return add(1, 2 * 3, 4 + 5) == !true;",
        "fn(x) { if (x) { return 1; } }",
    ];

    for source in sources {
        let first = assert_no_errors(source).program.to_string();
        let second = assert_no_errors(&first).program.to_string();
        assert_eq!(first, second, "source: {source}");

        let kinds = |text: &str| tokenize(text).map(|t| t.kind).collect::<Vec<TokenKind>>();
        assert_eq!(kinds(&first), kinds(&second));
    }
}
