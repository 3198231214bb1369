//! Errors raised while turning a sheet row into a [`Reading`](crate::Reading).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    /// A numeric column holds a value that cannot be read as a real number.
    #[error("could not convert {column} value '{value}' to a number")]
    Conversion { column: String, value: String },
}
