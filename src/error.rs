use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevviewError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Encode error: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`RevviewError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl RevviewError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a source-not-found error.
    source_not_found => SourceNotFound,
    /// Create an unsupported-format error.
    unsupported_format => UnsupportedFormat,
    /// Create a decode error.
    decode => DecodeError,
    /// Create a render error.
    render => RenderError,
    /// Create an encode error.
    encode => EncodeError,
}

impl From<image::ImageError> for RevviewError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::Unsupported(u) => Self::UnsupportedFormat(u.to_string()),
            image::ImageError::IoError(io) => Self::IoError(io),
            other => Self::DecodeError(other.to_string()),
        }
    }
}

impl From<tiff::TiffError> for RevviewError {
    fn from(e: tiff::TiffError) -> Self {
        match e {
            tiff::TiffError::UnsupportedError(u) => Self::UnsupportedFormat(u.to_string()),
            tiff::TiffError::IoError(io) => Self::IoError(io),
            other => Self::DecodeError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RevviewError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<serde_yml::Error> for RevviewError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

#[cfg(feature = "pdf")]
impl From<pdfium_render::prelude::PdfiumError> for RevviewError {
    fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
        Self::RenderError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RevviewError>;
