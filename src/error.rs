use thiserror::Error;

use crate::eval::RuntimeError;
use crate::resolver::ParseError;

#[derive(Error, Debug)]
pub enum Error {
    // bracket mismatch, nothing was executed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    // execution aborted, partial output discarded
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CowResult<T> = Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }
}
