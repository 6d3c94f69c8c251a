//! Error types for autorot.

use thiserror::Error;

/// Result alias for autorot operations.
pub type AutorotResult<T> = std::result::Result<T, AutorotError>;

/// Errors that can occur when building images or evaluating costs.
///
/// Degenerate geometry (empty images, squares that do not fit) is not an
/// error; those cases produce empty results instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AutorotError {
    /// Image dimensions overflow the addressable buffer size.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Pixel buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Predicted and target batches do not pair up.
    #[error("batch size mismatch: {predicted} predicted, {target} targets")]
    BatchSizeMismatch { predicted: usize, target: usize },
    /// Predicted buffer length is not a whole number of encoded rows.
    #[error("invalid batch shape: {len} values do not split into rows of {width}")]
    InvalidBatchShape { len: usize, width: usize },
    /// Output encoding selector is not recognized.
    #[error("invalid output encoding: {name:?}")]
    InvalidOutputEncoding { name: String },
    /// A batch validated for one encoding was passed to a cost for another.
    #[error("encoding mismatch: cost expects {expected}, batch is {got}")]
    EncodingMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// Image decoding or encoding failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
