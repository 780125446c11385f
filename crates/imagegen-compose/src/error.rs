// Imports
use thiserror::Error;

/// Result alias using [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// The errors that can occur while composing and rendering images.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor or setter argument is outside of its documented range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The export format is unknown or not available in this build.
    #[error("unsupported image format `{format}`: {reason}")]
    UnsupportedFormat {
        /// The requested format.
        format: String,
        /// Why it can't be used.
        reason: String,
    },
    /// An allocation or I/O operation of the rasterizer or the filesystem failed.
    #[error("resource error: {0:#}")]
    Resource(anyhow::Error),
}

impl Error {
    /// A new [Error::InvalidParameter].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// A new [Error::UnsupportedFormat].
    pub fn unsupported_format(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::Resource(e)
    }
}
