//! Error types for barcode encoding and label output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("no digits left after removing non-digit characters")]
    EmptyInput,

    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("character {ch:?} cannot be encoded as {symbology}")]
    InvalidCharacter { symbology: String, ch: char },

    #[error("unknown symbology: {0}")]
    UnknownSymbology(String),

    #[error("batch file must contain \"data\" and \"label\" columns")]
    MissingColumns,

    #[error("font error: {0}")]
    Font(String),

    #[error("QR encode error: {0}")]
    QrEncode(String),

    #[error("printer error: {0}")]
    Printer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Errors caused by the user's data rather than by the caller.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LabelError::EmptyInput | LabelError::InvalidCharacter { .. } | LabelError::QrEncode(_)
        )
    }
}
