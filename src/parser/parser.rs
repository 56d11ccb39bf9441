//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry
//! points. The parser pulls tokens from the lexer on demand and keeps a
//! two-token window (`current`, `peek`). Expression parsing is a Pratt
//! parser driven by the NUD/LED dispatch in `lookups`.
//!
//! Errors never abort the parse: each one is recorded, the statement that
//! produced it is dropped, and parsing resumes after the offending token.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    options::ParseOptions,
    Position, Span,
};

use super::stmt::parse_stmt;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token source
    lexer: Lexer,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    options: ParseOptions,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// Comment tokens, when the lexer emits them
    comments: Vec<Token>,
}

impl Parser {
    /// Creates a new Parser and primes the `current`/`peek` window.
    ///
    /// The lexer's comment mode is taken as-is; use `parse_with_options` to
    /// configure both from one `ParseOptions`.
    pub fn new(lexer: Lexer, options: ParseOptions) -> Self {
        let file = lexer.file();
        let placeholder = Token {
            kind: TokenKind::EOF,
            value: String::new(),
            span: Span {
                start: Position(0, Rc::clone(&file)),
                end: Position(0, file),
            },
        };

        let mut parser = Parser {
            lexer,
            current: placeholder.clone(),
            peek: placeholder,
            options,
            errors: vec![],
            comments: vec![],
        };
        parser.advance();
        parser.advance();
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts `peek` into `current` and pulls a new `peek` from the lexer.
    pub fn advance(&mut self) -> &Token {
        let next = self.next_significant();
        self.current = std::mem::replace(&mut self.peek, next);
        &self.current
    }

    /// Pulls the next token, filing comments away.
    fn next_significant(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();

            if self.options.strict_literals {
                let anomalies = self.lexer.take_anomalies();
                for anomaly in anomalies {
                    self.record(anomaly);
                }
            }

            if token.kind.is_comment() {
                self.comments.push(token);
                continue;
            }

            return token;
        }
    }

    /// Advances when the lookahead has the expected kind.
    ///
    /// # Returns
    ///
    /// Returns an `ExpectedToken` error positioned at the lookahead otherwise.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<&Token, Error> {
        if self.peek.kind == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.peek_error(expected_kind))
        }
    }

    pub fn peek_error(&self, expected_kind: TokenKind) -> Error {
        Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected_kind,
                got: self.peek.kind,
            },
            self.peek.span.start.clone(),
        )
    }

    /// Span from `start` to the end of the current token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.current.span.end.clone(),
        }
    }

    /// Consumes an optional statement terminator.
    pub fn skip_semicolon(&mut self) {
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Appends a diagnostic.
    pub fn record(&mut self, error: Error) {
        debug!(error = %error, position = error.get_position().0, "parse error");
        self.errors.push(error);
    }

    /// All diagnostics as messages. Empty means the parse succeeded.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// All diagnostics with their positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.errors
    }

    /// Parses statements until `EOF`.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.current.kind != TokenKind::EOF {
            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => self.record(error),
            }
            self.advance();
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Program {
            statements,
            comments: std::mem::take(&mut self.comments),
        }
    }
}

/// Parses a source string with default options.
///
/// # Returns
///
/// The program and the diagnostic messages. A non-empty message list means
/// the program must not be trusted.
pub fn parse(source: String, file: Option<String>) -> (Program, Vec<String>) {
    let (program, errors) = parse_with_options(source, file, ParseOptions::default());
    (program, errors.iter().map(|error| error.to_string()).collect())
}

/// Parses a source string, configuring both the lexer and the parser.
pub fn parse_with_options(
    source: String,
    file: Option<String>,
    options: ParseOptions,
) -> (Program, Vec<Error>) {
    let lexer = Lexer::new(source, file).with_comments(options.comments);
    let mut parser = Parser::new(lexer, options);
    let program = parser.parse_program();

    (program, parser.into_diagnostics())
}
