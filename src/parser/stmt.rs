use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{lookups::stmt_handler, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = stmt_handler(parser.current_token_kind()) {
        return handler(parser);
    }

    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_token_kind() == TokenKind::DeclareAssign
    {
        return parse_declare_assign_stmt(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start.clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    parser.skip_semicolon();

    Ok(Stmt::Expression(ExpressionStmt {
        expression,
        span: parser.span_from(start),
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // let name = value
    let start = parser.current_token().span.start.clone();

    let token = parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier {
        value: token.value.clone(),
        span: token.span.clone(),
    };

    match parser.peek_token_kind() {
        TokenKind::Assign | TokenKind::DeclareAssign => {
            parser.advance();
        }
        got => {
            return Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: TokenKind::Assign,
                    got,
                },
                parser.peek_token().span.start.clone(),
            ));
        }
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.skip_semicolon();

    Ok(Stmt::Let(LetStmt {
        name,
        value,
        span: parser.span_from(start),
    }))
}

/// `name ;= value` declares exactly like `let name = value`.
pub fn parse_declare_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token();
    let start = token.span.start.clone();
    let name = Identifier {
        value: token.value.clone(),
        span: token.span.clone(),
    };

    parser.expect_peek(TokenKind::DeclareAssign)?;
    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.skip_semicolon();

    Ok(Stmt::Let(LetStmt {
        name,
        value,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.current_token().span.start.clone();

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.skip_semicolon();

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// Parses `{ ... }` with the current token on `{`, stopping at `}` or `EOF`.
///
/// Statements that fail are recorded and skipped so one bad line does not
/// discard the whole block.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let start = parser.current_token().span.start.clone();
    parser.advance();

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                // an unconsumed `}` closes this block; any other `}` ended an inner one
                let closes_block = matches!(
                    error.get_kind(),
                    ErrorImpl::NoPrefixParseFn {
                        kind: TokenKind::CloseCurly
                    }
                );
                parser.record(error);
                if closes_block {
                    break;
                }
            }
        }
        parser.advance();
    }

    BlockStmt {
        body,
        span: parser.span_from(start),
    }
}
