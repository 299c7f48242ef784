//! Core types shared by key generation and signing commitments

use crate::group::{Group, GroupError};
use crate::serialization::impl_serde_encoded;
use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a participant: a non-zero scalar.
///
/// Identifiers are stable across key generation and signing. Zero is reserved,
/// since shares are evaluations of a polynomial whose value at zero is the
/// secret.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Identifier<G: Group>(G::Scalar);

impl<G: Group> Identifier<G> {
    /// Create an identifier from a scalar, rejecting zero
    pub fn new(scalar: G::Scalar) -> Result<Self> {
        if G::is_zero(&scalar) {
            return Err(Error::InvalidIdentifier("zero is reserved".into()));
        }
        Ok(Self(scalar))
    }

    /// Create an identifier from a small integer, rejecting zero
    pub fn from_u16(value: u16) -> Result<Self> {
        Self::new(G::Scalar::from(u64::from(value)))
    }

    /// The underlying scalar
    pub fn to_scalar(&self) -> G::Scalar {
        self.0
    }

    /// Fixed-width encoding (`SCALAR_LENGTH` bytes)
    pub fn encode(&self) -> Vec<u8> {
        G::encode_scalar(&self.0)
    }

    /// Decode an identifier, rejecting non-canonical and zero scalars
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, GroupError> {
        let scalar = G::decode_scalar(bytes)?;
        if G::is_zero(&scalar) {
            return Err(GroupError::ZeroScalar);
        }
        Ok(Self(scalar))
    }

    /// Hex encoding, used in logs and error messages
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Decode from the hex form produced by `to_hex`
    pub fn from_hex(encoded: &str) -> Result<Self> {
        Self::decode(&hex::decode(encoded)?).map_err(Error::field("identifier"))
    }
}

impl<G: Group> TryFrom<u16> for Identifier<G> {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Self::from_u16(value)
    }
}

impl<G: Group> Ord for Identifier<G> {
    fn cmp(&self, other: &Self) -> Ordering {
        G::compare_scalars(&self.0, &other.0)
    }
}

impl<G: Group> PartialOrd for Identifier<G> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<G: Group> fmt::Display for Identifier<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl<G: Group> fmt::Debug for Identifier<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.to_hex()).finish()
    }
}

impl_serde_encoded!(Identifier);
