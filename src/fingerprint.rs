//! Card colour derivation for task text.
//!
//! Runs [`CHECKSUM`](crate::programs::CHECKSUM) over the text and turns the
//! first output character into a hue. Interpreter failures never reach the
//! caller of [`card_fingerprint`]; they are logged and replaced by the
//! default fingerprint.

use lazy_static::lazy_static;

use crate::{
    config::InterpreterConfig,
    interpreter::{CompiledProgram, Interpreter},
    programs::CHECKSUM,
    resolver::ParseResult,
    CowResult,
};

pub const SATURATION: u8 = 90;
pub const LIGHTNESS: u8 = 85;

/// Number of faces on the task cube; each covers 60 degrees of hue.
pub const FACES: u8 = 6;

lazy_static! {
    static ref CHECKSUM_PROGRAM: ParseResult<CompiledProgram> = CompiledProgram::compile(CHECKSUM);
}

/// Interpreter for the checksum, with no step budget. The checksum consumes
/// one input character per outer loop pass, so its run time is bounded by
/// the text length.
fn host() -> CowResult<Interpreter> {
    Interpreter::new(InterpreterConfig {
        max_steps: None,
        ..InterpreterConfig::default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fingerprint {
    /// Code point of the first output character.
    pub byte: u32,
    /// `byte mod 360`
    pub hue: u16,
    /// Cube face, `hue / 60`.
    pub face: u8,
}

impl Fingerprint {
    /// `None` when the output is empty.
    pub fn from_output(output: &str) -> Option<Self> {
        let byte = output.chars().next()? as u32;
        let hue = (byte % 360) as u16;
        Some(Self {
            byte,
            hue,
            face: (hue / (360 / FACES as u16)) as u8,
        })
    }

    pub fn css(&self) -> String {
        format!("hsl({} {}% {}%)", self.hue, SATURATION, LIGHTNESS)
    }
}

/// Fingerprints `text`, surfacing interpreter errors. `Ok(None)` means the
/// program printed nothing.
pub fn fingerprint(text: &str) -> CowResult<Option<Fingerprint>> {
    let compiled = CHECKSUM_PROGRAM.as_ref().map_err(|e| e.clone())?;
    let output = host()?.run_compiled(compiled, text)?;
    Ok(Fingerprint::from_output(&output))
}

/// Fingerprint for a task card, from its title followed by its description.
pub fn card_fingerprint(title: &str, description: &str) -> Fingerprint {
    let text = format!("{}{}", title, description);
    match fingerprint(&text) {
        Ok(Some(fingerprint)) => fingerprint,
        Ok(None) => {
            tracing::warn!("checksum produced no output, using default hue");
            Fingerprint::default()
        }
        Err(e) => {
            tracing::warn!("failed to fingerprint card: {}, using default hue", e);
            Fingerprint::default()
        }
    }
}
