use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::anychar,
    combinator::{map, value},
    error::{context, VerboseError},
    IResult,
};

use super::token::{Program, Span, Token};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parses exactly one instruction spelling at the head of the input.
pub fn parse_command(input: &str) -> ParserResult<'_, Token> {
    context(
        "command",
        alt((
            value(Token::LoopClose, tag("moo")),
            value(Token::PointerLeft, tag("mOo")),
            value(Token::PointerRight, tag("moO")),
            value(Token::Exec, tag("mOO")),
            value(Token::ConditionalIo, tag("Moo")),
            value(Token::Decrement, tag("MOo")),
            value(Token::Increment, tag("MoO")),
            value(Token::LoopOpen, tag("MOO")),
            value(Token::Reset, tag("OOO")),
            value(Token::Register, tag("MMM")),
            value(Token::Output, tag("OOM")),
            value(Token::Input, tag("oom")),
        )),
    )(input)
}

/// Parses an instruction, or consumes a single character of commentary.
fn parse_command_or_skip(input: &str) -> ParserResult<'_, Option<Token>> {
    alt((map(parse_command, Some), value(None, anychar)))(input)
}

/// Splits COW source into instructions, remembering where each one came from.
///
/// Anything that is not one of the twelve spellings is commentary and is
/// skipped one character at a time, so tokenizing never fails.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(self, input), fields(bytes = input.len()))]
    pub fn tokenize(&mut self, input: &str) -> Program {
        let mut tokens = Vec::new();
        let mut spans = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let Ok((new_remaining, token)) = parse_command_or_skip(remaining) else {
                // anychar only fails on empty input
                break;
            };
            let consumed = &remaining[..(remaining.len() - new_remaining.len())];
            self.update_position(consumed);

            if let Some(token) = token {
                tokens.push(token);
                spans.push(Span {
                    start: start_position,
                    end: self.current_position,
                    line: start_line,
                    column: start_column,
                });
            }

            remaining = new_remaining;
        }

        tracing::debug!("tokenized {} commands", tokens.len());
        Program::from_parts(tokens, spans)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

/// Tokenizes `source` with a fresh [`Tokenizer`].
pub fn tokenize(source: &str) -> Program {
    Tokenizer::new().tokenize(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_parse_command() {
        let (rest, token) = parse_command("MoO MoO").unwrap();
        assert_eq!(token, Token::Increment);
        assert_eq!(rest, " MoO");

        assert!(parse_command("Mo").is_err());
        assert!(parse_command("mmm").is_err());
    }

    #[test]
    fn test_all_commands() {
        for token in Token::iter() {
            let (rest, parsed) = parse_command(token.spelling()).unwrap();
            assert_eq!(parsed, token);
            assert_eq!(rest, "");
        }
    }

    #[test]
    fn test_empty_and_comment_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("// h = 104\n\n  000 hello\t").is_empty());
    }

    #[test]
    fn test_skips_commentary_between_commands() {
        let program = tokenize("000 moO\noom\nmoO oom // read two\nMOO");
        assert_eq!(
            program.tokens(),
            &[
                Token::PointerRight,
                Token::Input,
                Token::PointerRight,
                Token::Input,
                Token::LoopOpen,
            ]
        );
    }

    #[test]
    fn test_overlapping_text_is_scanned_left_to_right() {
        // "MoOo": MoO matches at 0, the trailing "o" is commentary
        assert_eq!(tokenize("MoOo").tokens(), &[Token::Increment]);
        // "xmoo": x skipped, then moo
        assert_eq!(tokenize("xmoo").tokens(), &[Token::LoopClose]);
        // "MMMM": one MMM, then a lone M
        assert_eq!(tokenize("MMMM").tokens(), &[Token::Register]);
        // "MOOO": MOO first, leaving "O"
        assert_eq!(tokenize("MOOO").tokens(), &[Token::LoopOpen]);
    }

    #[test]
    fn test_tokenizer_with_position() {
        let program = tokenize("MoO\n  moO");
        let first = program.span(0).unwrap();
        assert_eq!((first.line, first.column, first.start, first.end), (1, 1, 0, 3));

        let second = program.span(1).unwrap();
        assert_eq!(second.line, 2);
        assert_eq!(second.column, 3);
        assert_eq!(second.start, 6);
        assert_eq!(second.end, 9);
    }

    #[test]
    fn test_multibyte_commentary() {
        // ポインタ is commentary; offsets stay byte based, columns char based
        let program = tokenize("ポインタ OOM");
        assert_eq!(program.tokens(), &[Token::Output]);
        let span = program.span(0).unwrap();
        assert_eq!(span.column, 6);
        assert_eq!(span.start, "ポインタ ".len());
    }
}
