use thiserror::Error;

/// Faults on the translation path. All of them are degradable: the
/// [`Localizer`](super::Localizer) maps any of these to "keep the original
/// text".
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation service returned status {code}")]
    Status { code: u16 },

    #[error("malformed translation response: {reason}")]
    MalformedResponse { reason: String },
}
