use crate::format::BaseConvention;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing format tags and constructing annotations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The format tag's base convention is not recognized after stripping
    /// suffixes.
    #[error("unknown annotation format: {tag}")]
    UnknownFormat { tag: String },

    /// A recognized convention has no registered geometry converter. This is
    /// a gap in the conversion table, not bad input.
    #[error("no converter registered for convention '{base}'")]
    UnsupportedConversion { base: BaseConvention },

    /// Re-projection to the requested convention is not implemented. The
    /// output set is deliberately limited to xyxy, xywh, cxcywh and yxyx.
    #[error("conversion to '{target}' is not implemented")]
    UnsupportedProjection { target: BaseConvention },

    /// The raw record holds fewer than the 4 geometry fields.
    #[error("annotation record has {found} fields, expected at least 4")]
    TruncatedRecord { found: usize },

    /// A field that must be numeric holds text.
    #[error("annotation field {index} is not numeric")]
    NonNumericField { index: usize },
}
