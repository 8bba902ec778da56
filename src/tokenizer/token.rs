use strum::IntoEnumIterator;

/// One COW instruction.
///
/// The declaration order follows the dialect's numeric instruction codes, so
/// [`Token::code`] is simply the discriminant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Token {
    /// `]`: jump back to the matching `MOO` while the current cell is non-zero.
    #[strum(serialize = "moo")]
    LoopClose,
    /// `<`
    #[strum(serialize = "mOo")]
    PointerLeft,
    /// `>`
    #[strum(serialize = "moO")]
    PointerRight,
    /// Execute-cell-as-instruction. Disabled in this dialect, runs as a no-op.
    #[strum(serialize = "mOO")]
    Exec,
    /// Reads input when the current cell is zero, writes it out otherwise.
    #[strum(serialize = "Moo")]
    ConditionalIo,
    /// `-`
    #[strum(serialize = "MOo")]
    Decrement,
    /// `+`
    #[strum(serialize = "MoO")]
    Increment,
    /// `[`: skip past the matching `moo` when the current cell is zero.
    #[strum(serialize = "MOO")]
    LoopOpen,
    /// Sets the current cell to zero.
    #[strum(serialize = "OOO")]
    Reset,
    /// Register copy/paste. Inert unless the register extension is enabled.
    #[strum(serialize = "MMM")]
    Register,
    /// `.`
    #[strum(serialize = "OOM")]
    Output,
    /// `,`
    #[strum(serialize = "oom")]
    Input,
}

impl Token {
    /// Source spelling of the instruction, e.g. `"MoO"`.
    pub fn spelling(self) -> &'static str {
        self.into()
    }

    /// Numeric instruction code (0..=11).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Token::iter().nth(code as usize)
    }

    /// The brainfuck command this instruction corresponds to, if any.
    pub fn brainfuck(self) -> Option<char> {
        match self {
            Token::LoopClose => Some(']'),
            Token::PointerLeft => Some('<'),
            Token::PointerRight => Some('>'),
            Token::Decrement => Some('-'),
            Token::Increment => Some('+'),
            Token::LoopOpen => Some('['),
            Token::Output => Some('.'),
            Token::Input => Some(','),
            Token::Exec | Token::ConditionalIo | Token::Reset | Token::Register => None,
        }
    }
}

/// Location of a token in the program source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

/// An immutable, tokenized COW program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<Token>,
    spans: Vec<Span>,
}

impl Program {
    pub(crate) fn from_parts(tokens: Vec<Token>, spans: Vec<Span>) -> Self {
        debug_assert_eq!(tokens.len(), spans.len());
        Self { tokens, spans }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Token, Span)> + '_ {
        self.tokens
            .iter()
            .zip(self.spans.iter())
            .enumerate()
            .map(|(index, (token, span))| (index, *token, *span))
    }
}

/// Builds a program without source positions; every span is the default.
impl FromIterator<Token> for Program {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let tokens: Vec<Token> = iter.into_iter().collect();
        let spans = vec![Span::default(); tokens.len()];
        Self { tokens, spans }
    }
}

/// Renders the program back to canonical source, one space between tokens.
impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.spelling())?;
        }
        Ok(())
    }
}
