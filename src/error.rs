use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphTracerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Segmentation produced no glyph boxes: {0}")]
    SegmentationEmpty(String),

    #[error("Vectorizer failed: {0}")]
    VectorizerLaunchFailed(String),

    #[error("Malformed vectorizer output at '{line}': {reason}")]
    MalformedVectorizerOutput { line: String, reason: String },

    #[error("Unclosed contour: {0}")]
    UnclosedContourInvariant(String),

    #[error("No glyphs claimed, can not generate sfd file")]
    NoGlyphsClaimed,

    #[error("Output write error: {0}")]
    OutputWriteFailed(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Glyph '{name}' (U+{codepoint:04X}): {source}")]
    Glyph {
        name: String,
        codepoint: u32,
        #[source]
        source: Box<GlyphTracerError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`GlyphTracerError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl GlyphTracerError {
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
    /// Create an invalid image error.
    invalid_image => InvalidImage,
    /// Create a segmentation error.
    segmentation_empty => SegmentationEmpty,
    /// Create a vectorizer launch error.
    vectorizer => VectorizerLaunchFailed,
    /// Create an unclosed contour error.
    unclosed_contour => UnclosedContourInvariant,
    /// Create an output write error.
    output_write => OutputWriteFailed,
    /// Create a cache error.
    cache => CacheError,
}

impl GlyphTracerError {
    /// Create a malformed vectorizer output error for the offending raw line.
    pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedVectorizerOutput {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Attach the glyph identity to an error raised while tracing that glyph.
    pub fn for_glyph(self, name: &str, codepoint: char) -> Self {
        Self::Glyph {
            name: name.to_string(),
            codepoint: codepoint as u32,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through [`GlyphTracerError::Glyph`] wrappers.
    pub fn root(&self) -> &GlyphTracerError {
        match self {
            Self::Glyph { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for GlyphTracerError {
    fn from(e: serde_json::Error) -> Self {
        Self::CacheError(e.to_string())
    }
}

impl From<serde_yml::Error> for GlyphTracerError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for GlyphTracerError {
    fn from(e: image::ImageError) -> Self {
        Self::InvalidImage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GlyphTracerError>;
