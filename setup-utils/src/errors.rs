use crate::ElementType;

use ark_serialize::SerializationError;
use thiserror::Error;

/// Errors that may occur when reading, transforming or verifying an accumulator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),
    #[error("Invalid curve element passed to the pairing: {0}")]
    InvalidCurveInput(&'static str),
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid length. Expected: {expected}, got: {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,
    #[error("Chunk does not have a min and max")]
    InvalidChunk,
    #[error("Point at infinity found while decoding {0}")]
    PointAtInfinity(&'static str),
}

/// The named property of a contribution or accumulator that failed to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("couldn't verify knowledge of Tau")]
    TauKnowledge,
    #[error("couldn't verify knowledge of Alpha")]
    AlphaKnowledge,
    #[error("couldn't verify knowledge of Beta")]
    BetaKnowledge,
    #[error("couldn't verify that TauG1 is based on the previous contribution")]
    TauG1Update,
    #[error("couldn't verify that AlphaTauG1 is based on the previous contribution")]
    AlphaG1Update,
    #[error("couldn't verify that BetaTauG1 is based on the previous contribution")]
    BetaG1Update,
    #[error("couldn't verify that TauG2 is based on the previous contribution")]
    TauG2Update,
    #[error("couldn't verify that BetaG2 is based on the previous contribution")]
    BetaG2Update,
    #[error("couldn't verify hash of contribution")]
    HashMismatch,
    #[error("the first {0} element is not the group generator")]
    InvalidGenerator(ElementType),
    #[error("the {0} elements do not match the published contribution")]
    CommitmentMismatch(ElementType),
    #[error("the {0} elements are not consecutive powers of tau")]
    PowersRatio(ElementType),
    #[error("the transcript is empty")]
    EmptyTranscript,
    #[error("the first contribution of the transcript is not the initial one")]
    InvalidGenesis,
}

pub type Result<T> = std::result::Result<T, Error>;
