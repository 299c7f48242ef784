//! ristretto255 ciphersuite

use super::{check_length, Group, GroupError};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::Identity,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use std::cmp::Ordering;

/// FROST(ristretto255, SHA-512)
///
/// Scalars are 32-byte little-endian canonical integers modulo the group
/// order, elements are 32-byte compressed Ristretto points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ristretto255Sha512;

impl Group for Ristretto255Sha512 {
    type Scalar = Scalar;
    type Element = RistrettoPoint;

    const CONTEXT: &'static str = "FROST-RISTRETTO255-SHA512-v1";
    const SCALAR_LENGTH: usize = 32;
    const ELEMENT_LENGTH: usize = 32;

    fn generator() -> RistrettoPoint {
        RISTRETTO_BASEPOINT_POINT
    }

    fn identity() -> RistrettoPoint {
        RistrettoPoint::identity()
    }

    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    fn encode_scalar(scalar: &Scalar) -> Vec<u8> {
        scalar.to_bytes().to_vec()
    }

    fn decode_scalar(bytes: &[u8]) -> Result<Scalar, GroupError> {
        check_length(bytes, Self::SCALAR_LENGTH)?;
        let mut repr = [0u8; 32];
        repr.copy_from_slice(bytes);
        Option::<Scalar>::from(Scalar::from_canonical_bytes(repr)).ok_or(GroupError::InvalidScalar)
    }

    fn encode_element(element: &RistrettoPoint) -> Vec<u8> {
        element.compress().to_bytes().to_vec()
    }

    fn decode_element(bytes: &[u8]) -> Result<RistrettoPoint, GroupError> {
        check_length(bytes, Self::ELEMENT_LENGTH)?;
        let mut repr = [0u8; 32];
        repr.copy_from_slice(bytes);

        let point = CompressedRistretto(repr)
            .decompress()
            .ok_or(GroupError::InvalidElement)?;
        if point == RistrettoPoint::identity() {
            return Err(GroupError::IdentityElement);
        }
        Ok(point)
    }

    fn compare_scalars(a: &Scalar, b: &Scalar) -> Ordering {
        // Little-endian encoding, compare from the most significant byte
        a.as_bytes().iter().rev().cmp(b.as_bytes().iter().rev())
    }

    fn hash_to_scalar(tag: &[u8], inputs: &[&[u8]]) -> Scalar {
        let mut hasher = Sha512::new();
        hasher.update(Self::CONTEXT.as_bytes());
        hasher.update(tag);
        for input in inputs {
            hasher.update(input);
        }

        let mut wide = [0u8; 64];
        wide.copy_from_slice(&hasher.finalize());
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}
