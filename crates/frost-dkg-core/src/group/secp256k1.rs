//! secp256k1 ciphersuite

use super::{check_length, Group, GroupError};
use k256::{
    elliptic_curve::{
        bigint::U256,
        ops::Reduce,
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;

/// FROST(secp256k1, SHA-256)
///
/// Scalars are 32-byte big-endian integers modulo the curve order, elements
/// are 33-byte SEC1 compressed points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Secp256k1Sha256;

impl Group for Secp256k1Sha256 {
    type Scalar = Scalar;
    type Element = ProjectivePoint;

    const CONTEXT: &'static str = "FROST-secp256k1-SHA256-v1";
    const SCALAR_LENGTH: usize = 32;
    const ELEMENT_LENGTH: usize = 33;

    fn generator() -> ProjectivePoint {
        ProjectivePoint::GENERATOR
    }

    fn identity() -> ProjectivePoint {
        ProjectivePoint::IDENTITY
    }

    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        Scalar::random(&mut *rng)
    }

    fn encode_scalar(scalar: &Scalar) -> Vec<u8> {
        scalar.to_bytes().to_vec()
    }

    fn decode_scalar(bytes: &[u8]) -> Result<Scalar, GroupError> {
        check_length(bytes, Self::SCALAR_LENGTH)?;
        Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(bytes)))
            .ok_or(GroupError::InvalidScalar)
    }

    fn encode_element(element: &ProjectivePoint) -> Vec<u8> {
        let encoded = element.to_affine().to_encoded_point(true);
        if encoded.is_identity() {
            // SEC1 encodes the identity as a single byte; keep the width fixed
            return vec![0u8; Self::ELEMENT_LENGTH];
        }
        encoded.as_bytes().to_vec()
    }

    fn decode_element(bytes: &[u8]) -> Result<ProjectivePoint, GroupError> {
        check_length(bytes, Self::ELEMENT_LENGTH)?;
        if bytes.iter().all(|b| *b == 0) {
            return Err(GroupError::IdentityElement);
        }

        let point = EncodedPoint::from_bytes(bytes).map_err(|_| GroupError::InvalidElement)?;
        if !point.is_compressed() {
            return Err(GroupError::InvalidElement);
        }

        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&point))
            .ok_or(GroupError::InvalidElement)?;
        Ok(ProjectivePoint::from(affine))
    }

    fn compare_scalars(a: &Scalar, b: &Scalar) -> Ordering {
        a.to_bytes().as_slice().cmp(b.to_bytes().as_slice())
    }

    fn hash_to_scalar(tag: &[u8], inputs: &[&[u8]]) -> Scalar {
        let mut hasher = Sha256::new();
        hasher.update(Self::CONTEXT.as_bytes());
        hasher.update(tag);
        for input in inputs {
            hasher.update(input);
        }
        let digest = hasher.finalize();

        <Scalar as Reduce<U256>>::reduce_bytes(&digest)
    }
}
