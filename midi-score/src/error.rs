use thiserror;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum TranscribeError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("Invalid duration format: `{0}`. Expected one of W, H, Q, E, S, T, X with optional `d`")]
    InvalidFormat(String),
    #[error("Invalid pitch: `{0}`")]
    InvalidPitch(String),
    #[error("Invalid key signature: {0} accidentals. Expected at most 7")]
    InvalidKeySignature(i8),
    #[error(
        "Invalid time signature: {numerator}/{denominator}. \
        Denominator should be one of 2, 4, 8"
    )]
    InvalidTimeSignature { numerator: u8, denominator: u32 },
    #[error("Unsupported timing mode: {0}. Only pulses per quarter note can be transcribed")]
    UnsupportedTiming(String),
}
pub type TranscribeResult<T> = Result<T, TranscribeError>;
