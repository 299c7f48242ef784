//! DKG run configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest threshold a run may use
pub const MIN_THRESHOLD: u16 = 2;

/// Unique identifier for one DKG run
pub type SessionId = [u8; 32];

/// Parameters of a single DKG run, shared by every participant.
///
/// The session id is bound into every proof of knowledge, so a proof cannot be
/// replayed into another run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkgConfig {
    /// Minimum number of signers (t)
    pub threshold: u16,
    /// Number of participants (n)
    pub max_signers: u16,
    /// Run-specific context tag
    #[serde(with = "hex_session_id")]
    pub session_id: SessionId,
}

impl DkgConfig {
    /// Create a validated configuration with a fresh random session id
    pub fn new(threshold: u16, max_signers: u16) -> Result<Self> {
        Self::with_session_id(threshold, max_signers, rand::random())
    }

    /// Create a validated configuration for an agreed-upon session id
    pub fn with_session_id(threshold: u16, max_signers: u16, session_id: SessionId) -> Result<Self> {
        let config = Self {
            threshold,
            max_signers,
            session_id,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check `MIN_THRESHOLD <= threshold <= max_signers`
    pub fn validate(&self) -> Result<()> {
        if self.threshold < MIN_THRESHOLD {
            return Err(Error::InvalidConfig(format!(
                "threshold must be at least {}, got {}",
                MIN_THRESHOLD, self.threshold
            )));
        }
        if self.threshold > self.max_signers {
            return Err(Error::InvalidConfig(format!(
                "threshold {} exceeds number of participants {}",
                self.threshold, self.max_signers
            )));
        }
        Ok(())
    }

    /// Number of round 1 messages Continue expects
    pub fn round1_count(&self) -> usize {
        usize::from(self.max_signers)
    }

    /// Number of round 2 messages Finalize expects
    pub fn round2_count(&self) -> usize {
        usize::from(self.max_signers).saturating_sub(1)
    }
}

mod hex_session_id {
    use super::SessionId;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(session_id: &SessionId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(session_id))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SessionId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(encoded).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("session id must be 32 bytes"))
    }
}
