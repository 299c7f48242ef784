//! Schnorr proof of knowledge of a polynomial's constant term
//!
//! The proof is bound to the prover's identifier and to the run's session id,
//! so it can neither be replayed into another DKG run nor claimed by another
//! participant.

use crate::config::SessionId;
use crate::group::Group;
use crate::serialization::{impl_hex_encoded, impl_serde_encoded};
use crate::types::Identifier;
use crate::{Error, Result};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Domain separation tag of the challenge hash
const CHALLENGE_TAG: &[u8] = b"dkg-pok";

/// Non-interactive Schnorr proof `(R, z)` that the prover knows `a_0` with
/// `C_0 = a_0 * G`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfKnowledge<G: Group> {
    /// Commitment to the proof nonce, `k * G`
    pub r: G::Element,
    /// Response, `k + a_0 * c`
    pub z: G::Scalar,
}

impl<G: Group> ProofOfKnowledge<G> {
    /// Length of the fixed-width encoding, `ELEMENT_LENGTH + SCALAR_LENGTH`
    pub const ENCODED_LENGTH: usize = G::ELEMENT_LENGTH + G::SCALAR_LENGTH;

    /// Prove knowledge of `secret`, where `commitment = secret * G`
    pub fn prove<R: RngCore + CryptoRng>(
        identifier: &Identifier<G>,
        secret: &G::Scalar,
        commitment: &G::Element,
        session_id: &SessionId,
        rng: &mut R,
    ) -> Self {
        let mut nonce = G::random_nonzero_scalar(rng);
        let r = G::mul_base(&nonce);
        let c = challenge::<G>(identifier, commitment, &r, session_id);
        let z = nonce + *secret * c;
        nonce.zeroize();

        Self { r, z }
    }

    /// Check `R = z * G - c * C_0`
    pub fn verify(
        &self,
        identifier: &Identifier<G>,
        commitment: &G::Element,
        session_id: &SessionId,
    ) -> bool {
        let c = challenge::<G>(identifier, commitment, &self.r, session_id);
        self.r == G::mul_base(&self.z) - *commitment * c
    }

    /// Encode as `R || z`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = G::encode_element(&self.r);
        out.extend_from_slice(&G::encode_scalar(&self.z));
        out
    }

    /// Decode `R || z`, rejecting an identity `R`
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != Self::ENCODED_LENGTH {
            return Err(Error::LengthMismatch {
                record: "proof of knowledge",
                actual: data.len(),
            });
        }

        let (r_bytes, z_bytes) = data.split_at(G::ELEMENT_LENGTH);
        let r = G::decode_element(r_bytes).map_err(Error::field("proof of knowledge R"))?;
        let z = G::decode_scalar(z_bytes).map_err(Error::field("proof of knowledge z"))?;

        Ok(Self { r, z })
    }
}

impl_serde_encoded!(ProofOfKnowledge);
impl_hex_encoded!(ProofOfKnowledge);

/// c = H(session_id || identifier || C_0 || R)
fn challenge<G: Group>(
    identifier: &Identifier<G>,
    commitment: &G::Element,
    r: &G::Element,
    session_id: &SessionId,
) -> G::Scalar {
    G::hash_to_scalar(
        CHALLENGE_TAG,
        &[
            session_id.as_slice(),
            &identifier.encode(),
            &G::encode_element(commitment),
            &G::encode_element(r),
        ],
    )
}
