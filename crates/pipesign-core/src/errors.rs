//! Errores del núcleo de firma.
//!
//! Ninguna variante se reintenta internamente: todas representan un error de
//! programación (entradas no soportadas) o una falla de integridad relevante
//! para seguridad, y se propagan tal cual al caller.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SigningError {
    /// La colección contiene un step que esta versión no sabe firmar.
    #[error("signing refused: unknown step type")]
    SigningRefusedUnknownStepType,
    #[error("unrecognized signature algorithm {0:?}")]
    UnrecognizedAlgorithm(String),
    /// Se pidió un campo que el step no produce (evidencia de manipulación).
    #[error("unknown signed field {0:?}")]
    UnknownSignedField(String),
    #[error("signature primitive failed: {0}")]
    PrimitiveFailure(String),
    /// La primitiva verificó y la firma no corresponde.
    #[error("signature verification failed: signature does not match step contents")]
    VerificationMismatch,
    #[error("signature algorithm {artifact:?} does not match key algorithm {key:?}")]
    AlgorithmMismatch { artifact: String, key: String },
    #[error("signature lists no signed fields")]
    EmptySignedFields,
    #[error("signed field {0:?} listed more than once")]
    DuplicateSignedField(String),
    #[error("step produced no fields to sign")]
    NoSignableFields,
    #[error("field of {0} bytes exceeds the canonical length prefix")]
    FieldTooLarge(usize),
    #[error("required field {0:?} is not covered by the signature")]
    MissingRequiredField(String),
    #[error("step {0} is not signed")]
    MissingSignature(usize),
    #[error("interpolation: {0}")]
    Interpolation(String),
    #[error("serialization: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SigningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SigningError>;
