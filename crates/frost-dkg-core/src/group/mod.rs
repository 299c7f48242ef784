//! Prime-order group abstraction
//!
//! Every protocol structure in this crate is generic over a [`Group`], which
//! bundles the scalar field, the group elements, their fixed-width encodings
//! and the hash-to-scalar function of one ciphersuite.
//!
//! Two ciphersuites are provided:
//! - [`Secp256k1Sha256`] (feature `secp256k1`)
//! - [`Ristretto255Sha512`] (feature `ristretto255`)

use rand::{CryptoRng, RngCore};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;
use zeroize::Zeroize;

#[cfg(feature = "ristretto255")]
mod ristretto255;
#[cfg(feature = "secp256k1")]
mod secp256k1;

#[cfg(feature = "ristretto255")]
pub use ristretto255::Ristretto255Sha512;
#[cfg(feature = "secp256k1")]
pub use secp256k1::Secp256k1Sha256;

/// Failures reported by a group when decoding scalars and elements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Input does not have the fixed encoded length
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Bytes are not the canonical encoding of a field element
    #[error("non-canonical scalar encoding")]
    InvalidScalar,

    /// Bytes do not encode a point of the group
    #[error("invalid element encoding")]
    InvalidElement,

    /// The identity element is not accepted on the wire
    #[error("identity element is not allowed")]
    IdentityElement,

    /// A zero scalar where a non-zero one is required
    #[error("zero scalar is not allowed")]
    ZeroScalar,
}

/// Capability interface of a prime-order group and its ciphersuite.
///
/// Implementations are zero-sized marker types; the associated types carry the
/// actual values.
pub trait Group: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Element of the scalar field
    type Scalar: Copy
        + Debug
        + PartialEq
        + Eq
        + Send
        + Sync
        + Zeroize
        + From<u64>
        + Add<Output = Self::Scalar>
        + Sub<Output = Self::Scalar>
        + Mul<Output = Self::Scalar>
        + Neg<Output = Self::Scalar>;

    /// Element of the group
    type Element: Copy
        + Debug
        + PartialEq
        + Eq
        + Send
        + Sync
        + Add<Output = Self::Element>
        + Sub<Output = Self::Element>
        + Mul<Self::Scalar, Output = Self::Element>;

    /// Ciphersuite context string, used for domain separation of hashes
    const CONTEXT: &'static str;

    /// Encoded length of a scalar
    const SCALAR_LENGTH: usize;

    /// Encoded length of an element
    const ELEMENT_LENGTH: usize;

    /// The fixed generator
    fn generator() -> Self::Element;

    /// The neutral element
    fn identity() -> Self::Element;

    /// Sample a uniformly random scalar
    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Canonical fixed-width encoding of a scalar
    fn encode_scalar(scalar: &Self::Scalar) -> Vec<u8>;

    /// Decode a scalar, rejecting non-canonical encodings
    fn decode_scalar(bytes: &[u8]) -> Result<Self::Scalar, GroupError>;

    /// Canonical fixed-width encoding of an element
    fn encode_element(element: &Self::Element) -> Vec<u8>;

    /// Decode an element, rejecting invalid points and the identity
    fn decode_element(bytes: &[u8]) -> Result<Self::Element, GroupError>;

    /// Total order over scalars.
    ///
    /// Scalars compare as the unsigned big-endian integers they encode. This
    /// order must be identical for every participant, since sorted commitment
    /// lists feed deterministic computations in the signing round.
    fn compare_scalars(a: &Self::Scalar, b: &Self::Scalar) -> Ordering;

    /// Hash the concatenation of `inputs` to a scalar, domain separated by the
    /// ciphersuite context and `tag`
    fn hash_to_scalar(tag: &[u8], inputs: &[&[u8]]) -> Self::Scalar;

    /// Sample a random scalar that is not zero
    fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        loop {
            let scalar = Self::random_scalar(rng);
            if !Self::is_zero(&scalar) {
                return scalar;
            }
        }
    }

    /// Whether the scalar is zero
    fn is_zero(scalar: &Self::Scalar) -> bool {
        *scalar == Self::Scalar::from(0u64)
    }

    /// Multiply the generator by `scalar`
    fn mul_base(scalar: &Self::Scalar) -> Self::Element {
        Self::generator() * *scalar
    }
}

/// Check that `bytes` has exactly `expected` bytes
pub(crate) fn check_length(bytes: &[u8], expected: usize) -> Result<(), GroupError> {
    if bytes.len() != expected {
        return Err(GroupError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
