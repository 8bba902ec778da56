use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{CowResult, Error};

/// What happens when the pointer walks off either end of the tape.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PointerPolicy {
    /// Abort with `PointerOverflow` / `PointerUnderflow`.
    #[default]
    Strict,
    /// Wrap around modulo the tape length.
    Wrap,
}

/// What `MOo` does on a zero cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnderflowPolicy {
    /// Abort with `CellUnderflow`.
    #[default]
    Strict,
    /// Wrap to 255.
    Wrap,
}

/// What `MoO` does on a cell holding 255.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverflowPolicy {
    /// Wrap to 0; cells stay bytes.
    #[default]
    Wrap,
    /// Keep counting. Cells are `u32`; `CellOverflow` past `u32::MAX`.
    Unbounded,
}

/// Behaviour of the `MMM` instruction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegisterMode {
    /// `MMM` has no observable effect.
    #[default]
    Inert,
    /// Empty register: copy the cell in. Full register: paste it into the cell and clear.
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    #[serde(default = "default_tape_len")]
    pub tape_len: usize,

    #[serde(default)]
    pub pointer_policy: PointerPolicy,

    #[serde(default)]
    pub underflow_policy: UnderflowPolicy,

    #[serde(default)]
    pub overflow_policy: OverflowPolicy,

    #[serde(default)]
    pub register_mode: RegisterMode,

    /// `None` runs without a step budget.
    #[serde(default = "default_max_steps")]
    pub max_steps: Option<u64>,

    #[serde(default, rename = "timeout_ms", with = "option_duration_ms")]
    pub timeout: Option<Duration>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            tape_len: default_tape_len(),
            pointer_policy: PointerPolicy::default(),
            underflow_policy: UnderflowPolicy::default(),
            overflow_policy: OverflowPolicy::default(),
            register_mode: RegisterMode::default(),
            max_steps: default_max_steps(),
            timeout: None,
        }
    }
}

impl InterpreterConfig {
    /// Wraparound variant: the pointer wraps at both tape ends and cells wrap at 0 and 255.
    pub fn permissive() -> Self {
        Self::default().with_wraparound()
    }

    /// Switches all three boundary policies to wrapping, leaving the rest untouched.
    pub fn with_wraparound(self) -> Self {
        Self {
            pointer_policy: PointerPolicy::Wrap,
            underflow_policy: UnderflowPolicy::Wrap,
            overflow_policy: OverflowPolicy::Wrap,
            ..self
        }
    }

    pub fn validate(&self) -> CowResult<()> {
        if self.tape_len == 0 {
            return Err(Error::config("tape_len must be at least 1"));
        }
        if self.max_steps == Some(0) {
            return Err(Error::config("max_steps must be positive, use null to disable"));
        }
        Ok(())
    }

    // JSONファイルから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> CowResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> CowResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_tape_len() -> usize {
    30_000
}

fn default_max_steps() -> Option<u64> {
    Some(10_000_000)
}

// Option<Duration> をミリ秒で表現する
mod option_duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
