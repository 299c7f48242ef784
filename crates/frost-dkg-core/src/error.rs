//! Error types for FROST key generation and commitments

use crate::group::GroupError;
use thiserror::Error;

/// Result type alias for key generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or running the DKG.
///
/// Participants are reported by the hex encoding of their identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ============ Encoding Errors ============
    /// Encoded record has the wrong length
    #[error("invalid {record} encoding length: {actual} bytes")]
    LengthMismatch { record: &'static str, actual: usize },

    /// A field of a record was rejected by the group
    #[error("failed to decode {field}: {source}")]
    FieldDecodeFailed {
        field: &'static str,
        #[source]
        source: GroupError,
    },

    /// Serde integration failure
    #[error("serialization error: {0}")]
    Serialization(String),

    // ============ Configuration Errors ============
    /// Invalid DKG parameters
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Zero is reserved and cannot name a participant
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Operation called out of protocol order, or after the run ended
    #[error("invalid state: expected {expected}, participant is {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    // ============ Round Errors ============
    /// Wrong number of round 1 messages
    #[error("invalid number of round 1 messages: expected {expected}, got {actual}")]
    InvalidRound1Count { expected: usize, actual: usize },

    /// Wrong number of round 2 messages
    #[error("invalid number of round 2 messages: expected {expected}, got {actual}")]
    InvalidShareCount { expected: usize, actual: usize },

    /// The same identifier appears twice
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// A round 1 message carries the wrong number of coefficient commitments
    #[error("participant {participant} sent {actual} commitments, expected {expected}")]
    InvalidCommitmentCount {
        participant: String,
        expected: usize,
        actual: usize,
    },

    /// Our own round 1 message was altered before being handed back
    #[error("own round 1 message does not match the one produced by init")]
    OwnMessageMismatch,

    /// Round 1 messages given to finalize differ from the verified set
    #[error("round 1 message of participant {0} differs from the verified one")]
    Round1Mismatch(String),

    /// Round 2 message addressed to someone unexpected
    #[error("invalid receiver in round 2 message: {0}")]
    InvalidReceiver(String),

    /// Round 2 message from someone unexpected
    #[error("invalid sender in round 2 message: {0}")]
    InvalidSender(String),

    /// No round 1 data for a participant
    #[error("commitment not found for participant {0}")]
    CommitmentNotFound(String),

    // ============ Verification Errors ============
    /// Proof of knowledge did not verify
    #[error("invalid proof of knowledge from participant {0}")]
    InvalidSignature(String),

    /// Secret share does not match the sender's commitments
    #[error("secret share from participant {0} failed verification")]
    VerificationShareFailed(String),
}

impl Error {
    /// Whether the error is a cryptographic verification failure, which
    /// identifies a faulty or malicious peer
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidSignature(_) | Error::VerificationShareFailed(_)
        )
    }

    pub(crate) fn field(field: &'static str) -> impl FnOnce(GroupError) -> Error {
        move |source| Error::FieldDecodeFailed { field, source }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::Serialization(e.to_string())
    }
}
