use std::fmt::Display;

use thiserror::Error;

use crate::parsers::dimacs::DimacsParseError;

pub(crate) type UnitPropResult<T> = Result<T, UnitPropError>;

#[derive(Error, Debug)]
pub(crate) enum UnitPropError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The dimacs file was invalid, more details: {0}")]
    InvalidDimacs(#[from] DimacsParseError),
    #[error("The assumption {0} is not a literal of the instance.")]
    InvalidAssumption(i32),
}

impl UnitPropError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
