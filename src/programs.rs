//! Programs bundled with the application.
//!
//! [`CHECKSUM`] is the one the host runs to fingerprint task text; the others
//! are demos and test fixtures.

/// Sums the code points of the input modulo 256 and prints the sum as one
/// character. Empty input prints `"\0"`.
///
/// Summation stops early at an input character whose code point is a
/// multiple of 256, since it reads as zero.
pub const CHECKSUM: &str = r#"
// cell 0 stays zero, cell 1 holds the running sum
moO
oom
moO oom

MOO
    // add cell 2 into cell 1
    MOO
        MOo mOo MoO moO
    moo
    oom
moo

mOo
OOM

mOo
"#;

/// Prints `watnow!` and ignores its input.
pub const GREETING: &str = r#"
// 'w' = 119
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO Moo

// 'a' = 97
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo Moo

// 't' = 116
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO Moo

// 'n' = 110
MOo MOo MOo MOo MOo MOo Moo

// 'o' = 111
MoO Moo

// 'w' = 119
MoO MoO MoO MoO MoO MoO MoO MoO Moo

// '!' = 33
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo Moo
"#;

/// Prints an `hsl(<checksum> 90% 85%)` CSS colour, the checksum character
/// taking the hue position.
pub const CARD_COLOR: &str = r#"
OOO
// 'h' = 104
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO Moo

// 's' = 115
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO Moo

// 'l' = 108
MOo MOo MOo MOo MOo MOo MOo Moo

// '(' = 40
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo MOo MOo Moo

// checksum of the input, computed two cells to the right
moO
moO oom
moO oom
MOO
    MOO
        MOo mOo MoO moO
    moo
    oom
moo
mOo OOM
mOo mOo

// ' ' = 32
MOo MOo MOo MOo MOo MOo MOo MOo Moo

// '9' = 57
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO Moo

// '0' = 48
MOo MOo MOo MOo MOo MOo MOo MOo MOo Moo

// '%' = 37
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo Moo

// ' ' = 32
MOo MOo MOo MOo MOo Moo

// '8' = 56
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO MoO MoO MoO MoO MoO MoO
MoO MoO MoO MoO Moo

// '5' = 53
MOo MOo MOo Moo

// '%' = 37
MOo MOo MOo MOo MOo MOo MOo MOo MOo MOo
MOo MOo MOo MOo MOo MOo Moo

// ')' = 41
MoO MoO MoO MoO Moo
"#;

/// Echoes the input in reverse order.
pub const REVERSE: &str = r#"
// cell 0 is the sentinel that stops the echo loop
moO oom
MOO moO oom moo
mOo
MOO OOM mOo moo
"#;

/// Bundled programs by name, for the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Builtin {
    Checksum,
    Greeting,
    CardColor,
    Reverse,
}

impl Builtin {
    pub fn source(self) -> &'static str {
        match self {
            Builtin::Checksum => CHECKSUM,
            Builtin::Greeting => GREETING,
            Builtin::CardColor => CARD_COLOR,
            Builtin::Reverse => REVERSE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::run;

    #[test]
    fn test_all_builtins_compile() {
        for builtin in Builtin::iter() {
            assert!(
                crate::interpreter::CompiledProgram::compile(builtin.source()).is_ok(),
                "{builtin} failed to compile"
            );
        }
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(Builtin::from_str("card-color").unwrap(), Builtin::CardColor);
        assert_eq!(Builtin::Checksum.to_string(), "checksum");
        assert!(Builtin::from_str("nope").is_err());
    }

    #[test]
    fn test_checksum() {
        assert_eq!(run(CHECKSUM, "").unwrap(), "\0");
        // 65 + 66
        assert_eq!(run(CHECKSUM, "AB").unwrap(), "\u{83}");
        // 97 + 98 + 99 = 294 = 38 mod 256
        assert_eq!(run(CHECKSUM, "abc").unwrap(), "&");
        assert_eq!(run(CHECKSUM, "Hello, world").unwrap(), "h");
    }

    #[test]
    fn test_greeting_ignores_input() {
        assert_eq!(run(GREETING, "").unwrap(), "watnow!");
        assert_eq!(run(GREETING, "anything").unwrap(), "watnow!");
    }

    #[test]
    fn test_card_color() {
        assert_eq!(run(CARD_COLOR, "abc").unwrap(), "hsl(& 90% 85%)");
        assert_eq!(run(CARD_COLOR, "Buy milk").unwrap(), "hsl(\u{FD} 90% 85%)");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(run(REVERSE, "AB").unwrap(), "BA");
        assert_eq!(run(REVERSE, "Hello, world").unwrap(), "dlrow ,olleH");
        assert_eq!(run(REVERSE, "").unwrap(), "");
    }
}
