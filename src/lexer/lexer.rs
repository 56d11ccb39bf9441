use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    options::CommentMode,
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::tokens::{lookup_ident, Token, TokenKind};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"^[\p{L}_]+").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[0-9]+").unwrap();
}

/// Pull-based scanner over a single source string.
///
/// `ch` is the character at `pos`; `read_pos` is the byte offset of the
/// character after it. Both only ever move forward.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    read_pos: usize,
    ch: Option<char>,
    file: Rc<String>,
    comments: CommentMode,
    anomalies: Vec<Error>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: None,
            file: file_name,
            comments: CommentMode::default(),
            anomalies: vec![],
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    pub fn with_comments(mut self, comments: CommentMode) -> Lexer {
        self.comments = comments;
        self
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Drains the unterminated-literal anomalies seen so far.
    pub fn take_anomalies(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.anomalies)
    }

    /// Returns the next significant token. Once the input is exhausted every
    /// call returns `EOF`.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let token = self.scan_token();

            if token.kind.is_comment() && self.comments == CommentMode::Skip {
                trace!(value = %token.value, "skipped comment");
                continue;
            }

            trace!(kind = %token.kind, value = %token.value, "scanned token");
            return token;
        }
    }

    fn read_char(&mut self) {
        self.pos = self.read_pos;
        self.ch = self.source[self.read_pos..].chars().next();
        if let Some(ch) = self.ch {
            self.read_pos += ch.len_utf8();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.read_pos..].chars().next()
    }

    /// Moves to an absolute byte offset that lies on a char boundary.
    fn seek(&mut self, offset: usize) {
        self.read_pos = offset;
        self.read_char();
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.ch.is_none()
    }

    fn skip_whitespace(&mut self) {
        if let Some(matched) = WHITESPACE.find(self.remainder()) {
            let end = self.pos + matched.end();
            self.seek(end);
        }
    }

    fn token_from(&self, kind: TokenKind, value: String, start: usize) -> Token {
        MK_TOKEN!(kind, value, MK_SPAN!(start, self.pos, self.file))
    }

    fn record_anomaly(&mut self, error: ErrorImpl, start: usize) {
        self.anomalies
            .push(Error::new(error, Position(start as u32, Rc::clone(&self.file))));
    }

    fn scan_token(&mut self) -> Token {
        let start = self.pos;
        let Some(ch) = self.ch else {
            return self.token_from(TokenKind::EOF, String::new(), start);
        };

        let kind = match ch {
            '=' => self.either('=', TokenKind::Equals, TokenKind::Assign),
            '!' => self.either('=', TokenKind::NotEquals, TokenKind::Bang),
            '+' => self.either('+', TokenKind::Increment, TokenKind::Plus),
            '-' => match self.peek_char() {
                Some('-') => {
                    self.read_char();
                    TokenKind::Decrement
                }
                Some('>') => {
                    self.read_char();
                    TokenKind::Arrow
                }
                _ => TokenKind::Minus,
            },
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '.' => self.either('.', TokenKind::Concat, TokenKind::Illegal),
            '&' => self.either('&', TokenKind::And, TokenKind::Illegal),
            '|' => self.either('|', TokenKind::Or, TokenKind::Illegal),
            ';' => self.either('=', TokenKind::DeclareAssign, TokenKind::Semicolon),
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            '#' => return self.read_comment(),
            '"' => return self.read_string(),
            _ => return self.read_word(),
        };

        self.read_char();
        self.token_from(kind, self.source[start..self.pos].to_string(), start)
    }

    /// Consumes the lookahead character when it is `next`, choosing between
    /// the two-character and the single-character kind.
    fn either(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_char() == Some(next) {
            self.read_char();
            double
        } else {
            single
        }
    }

    fn read_comment(&mut self) -> Token {
        let start = self.pos;

        if self.peek_char() == Some('#') {
            self.read_char();
            self.read_char();

            loop {
                let ch = self.ch;
                match ch {
                    None => {
                        self.record_anomaly(ErrorImpl::UnterminatedComment, start);
                        break;
                    }
                    Some('#') if self.peek_char() == Some('#') => {
                        self.read_char();
                        self.read_char();
                        break;
                    }
                    Some(_) => self.read_char(),
                }
            }

            return self.token_from(
                TokenKind::CommentMulti,
                self.source[start..self.pos].to_string(),
                start,
            );
        }

        while !self.at_eof() && self.ch != Some('\n') {
            self.read_char();
        }

        self.token_from(
            TokenKind::CommentSingle,
            self.source[start..self.pos].to_string(),
            start,
        )
    }

    fn read_string(&mut self) -> Token {
        let start = self.pos;
        self.read_char();

        let body_start = self.pos;
        while !self.at_eof() && self.ch != Some('"') {
            self.read_char();
        }
        let body = self.source[body_start..self.pos].to_string();

        if self.at_eof() {
            self.record_anomaly(ErrorImpl::UnterminatedString, start);
        } else {
            self.read_char();
        }

        self.token_from(TokenKind::String, body, start)
    }

    /// Identifiers and keywords, integers, or a single illegal character.
    fn read_word(&mut self) -> Token {
        let start = self.pos;

        if let Some(matched) = IDENTIFIER.find(self.remainder()) {
            let value = matched.as_str().to_string();
            let end = start + matched.end();
            self.seek(end);
            return self.token_from(lookup_ident(&value), value, start);
        }

        if let Some(matched) = INTEGER.find(self.remainder()) {
            let value = matched.as_str().to_string();
            let end = start + matched.end();
            self.seek(end);
            return self.token_from(TokenKind::Integer, value, start);
        }

        self.read_char();
        self.token_from(
            TokenKind::Illegal,
            self.source[start..self.pos].to_string(),
            start,
        )
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the first `EOF`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.finished = true;
        }
        Some(token)
    }
}

/// Scans a whole source string, including the trailing `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}
