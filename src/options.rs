//! Front end configuration.

/// What the scanner does with `#` and `## ... ##` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentMode {
    /// Comments are consumed by the scanner and never reach the parser.
    #[default]
    Skip,
    /// Comments are returned as `CommentSingle`/`CommentMulti` tokens and
    /// collected into `Program::comments`.
    Emit,
}

/// Options shared by the scanner and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub comments: CommentMode,
    /// Report unterminated strings and block comments as diagnostics
    /// instead of silently consuming to end-of-input.
    pub strict_literals: bool,
}

impl ParseOptions {
    pub fn emit_comments(mut self) -> Self {
        self.comments = CommentMode::Emit;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_literals = true;
        self
    }
}
