use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

/// Statement handler for keywords that open a statement.
pub fn stmt_handler(kind: TokenKind) -> Option<StmtHandler> {
    match kind {
        TokenKind::Let => Some(parse_let_stmt),
        TokenKind::Return => Some(parse_return_stmt),
        _ => None,
    }
}

/// Null denotation: how a token starts an expression.
pub fn nud_handler(kind: TokenKind) -> Option<NUDHandler> {
    match kind {
        // Literals and symbols
        TokenKind::Identifier
        | TokenKind::Integer
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False => Some(parse_primary_expr),

        TokenKind::Bang | TokenKind::Minus => Some(parse_prefix_expr),
        TokenKind::OpenParen => Some(parse_grouping_expr),
        TokenKind::If => Some(parse_if_expr),
        TokenKind::Fn => Some(parse_function_literal),

        TokenKind::EOF
        | TokenKind::Illegal
        | TokenKind::Assign
        | TokenKind::DeclareAssign
        | TokenKind::Plus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Increment
        | TokenKind::Decrement
        | TokenKind::Concat
        | TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::Less
        | TokenKind::Greater
        | TokenKind::And
        | TokenKind::Or
        | TokenKind::Semicolon
        | TokenKind::Colon
        | TokenKind::Comma
        | TokenKind::CloseParen
        | TokenKind::OpenCurly
        | TokenKind::CloseCurly
        | TokenKind::Arrow
        | TokenKind::CommentSingle
        | TokenKind::CommentMulti
        | TokenKind::Let
        | TokenKind::Return
        | TokenKind::For
        | TokenKind::Else => None,
    }
}

/// Left denotation: how a token continues an expression, with the power it
/// binds its left operand at.
pub fn led_handler(kind: TokenKind) -> Option<(BindingPower, LEDHandler)> {
    match kind {
        // Logical
        TokenKind::Or => Some((BindingPower::Or, parse_infix_expr)),
        TokenKind::And => Some((BindingPower::And, parse_infix_expr)),

        // Equality and relational
        TokenKind::Equals | TokenKind::NotEquals => Some((BindingPower::Equals, parse_infix_expr)),
        TokenKind::Less | TokenKind::Greater => Some((BindingPower::LessGreater, parse_infix_expr)),

        // Additive and multiplicative
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => {
            Some((BindingPower::Sum, parse_infix_expr))
        }
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
            Some((BindingPower::Product, parse_infix_expr))
        }

        TokenKind::OpenParen => Some((BindingPower::Call, parse_call_expr)),

        _ => None,
    }
}

/// Binding power of `kind` in infix position; `Lowest` for non-operators.
pub fn binding_power(kind: TokenKind) -> BindingPower {
    led_handler(kind)
        .map(|(power, _)| power)
        .unwrap_or(BindingPower::Lowest)
}
