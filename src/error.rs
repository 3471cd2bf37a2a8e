//! Error type shared by every decoding stage

/// Errors that abort a decode.
///
/// A line whose run matches no character range is *not* an error; it shows up
/// as an empty segment in the decoded text. Blocks dropped by the size filter
/// and non-positive spacing deltas are ordinary data reduction as well.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A stage received an empty sequence where at least one element is required.
    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),

    /// Text handed in as a binary run is not a valid run.
    #[error("invalid binary run {0:?}: expected '0'/'1' characters starting with '1'")]
    InvalidRun(String),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The input bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;
