//! Error type shared by the extractor, the composer and the converter.
use thiserror::Error;

/// Boxed error raised by a sheet writer implementation.
pub type WriterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for htmlsheet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing input or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Output was requested before the conversion ran
    #[error("Nothing has been processed yet; call process() before requesting output")]
    NotProcessed,

    /// Input could not be read as HTML text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failure reported by the sheet writer, passed through as-is
    #[error("Writer error: {0}")]
    Writer(#[source] WriterError),
}

impl Error {
    /// Whether this error belongs to the configuration family.
    ///
    /// [`Error::NotProcessed`] counts as a configuration error: the caller
    /// asked for output in the wrong order.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::NotProcessed)
    }

    /// Wrap an arbitrary writer error.
    pub fn writer<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Writer(Box::new(err))
    }

    /// Borrow the writer error as its concrete type, if it is one.
    pub fn writer_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Writer(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for htmlsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_family() {
        assert!(Error::NotProcessed.is_configuration());
        assert!(Error::Configuration("no input".into()).is_configuration());
        assert!(!Error::Parse("bad".into()).is_configuration());
    }

    #[test]
    fn test_writer_downcast() {
        let err = Error::writer(std::fmt::Error);
        assert!(err.writer_error::<std::fmt::Error>().is_some());
        assert!(err.writer_error::<std::io::Error>().is_none());
    }
}
