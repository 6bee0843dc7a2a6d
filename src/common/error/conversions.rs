//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::xlsx::XlsxError;

impl From<XlsxError> for Error {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::Io(e) => Error::Io(e),
            other => Error::writer(other),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Parse(format!("input is not valid UTF-8: {}", err))
    }
}
