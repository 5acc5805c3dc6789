/// Unified error type for all curve and encoding operations.
///
/// Domain errors (mismatched fields/curves, division by zero) are programming
/// errors and never recoverable; parse errors on externally supplied bytes
/// are always recoverable by rejecting the input. A signature that simply
/// fails to verify is a boolean result, not an error.
#[derive(Debug, thiserror::Error)]
pub enum EccError {
    #[error("domain mismatch: {0}")]
    DomainMismatch(String),

    #[error("division by zero in a prime field")]
    DivisionByZero,

    #[error("no modular square root exists")]
    NoSquareRoot,

    #[error("point not on curve: {0}")]
    PointNotOnCurve(String),

    #[error("signature component out of range: {0}")]
    SignatureOutOfRange(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("malformed key encoding: {0}")]
    MalformedKeyEncoding(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for EccError {
    fn from(e: hex::FromHexError) -> Self {
        EccError::InvalidHex(e.to_string())
    }
}
