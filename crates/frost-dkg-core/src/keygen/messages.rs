//! DKG protocol messages

use super::proof::ProofOfKnowledge;
use crate::config::SessionId;
use crate::group::Group;
use crate::serialization::{impl_hex_encoded, impl_serde_encoded};
use crate::types::Identifier;
use crate::{Error, Result};
use std::fmt;
use zeroize::Zeroize;

/// Round 1 DKG message: commitments to the secret polynomial, broadcast to
/// every participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round1Message<G: Group> {
    /// Sender's identifier
    pub sender: Identifier<G>,
    /// Proof of knowledge of the constant term
    pub proof_of_knowledge: ProofOfKnowledge<G>,
    /// Feldman commitments `a_k * G`, one per coefficient (t in total)
    pub commitments: Vec<G::Element>,
}

impl<G: Group> Round1Message<G> {
    const HEADER_LENGTH: usize = G::SCALAR_LENGTH + ProofOfKnowledge::<G>::ENCODED_LENGTH;

    /// Commitment to the constant term, the sender's public contribution to
    /// the group key
    pub fn constant_commitment(&self) -> Option<&G::Element> {
        self.commitments.first()
    }

    /// Verify the sender's proof of knowledge for the run `session_id`
    pub fn verify_proof(&self, session_id: &SessionId) -> bool {
        match self.constant_commitment() {
            Some(commitment) => self
                .proof_of_knowledge
                .verify(&self.sender, commitment, session_id),
            None => false,
        }
    }

    /// Encode as `sender || R || z || C_0 || ... || C_{t-1}`
    pub fn encode(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(Self::HEADER_LENGTH + self.commitments.len() * G::ELEMENT_LENGTH);
        out.extend_from_slice(&self.sender.encode());
        out.extend_from_slice(&self.proof_of_knowledge.encode());
        for commitment in &self.commitments {
            out.extend_from_slice(&G::encode_element(commitment));
        }
        out
    }

    /// Decode a round 1 message.
    ///
    /// The length must be `SCALAR_LENGTH + proof length + k * ELEMENT_LENGTH`
    /// for some k >= 1.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let body = data
            .len()
            .checked_sub(Self::HEADER_LENGTH)
            .filter(|body| *body > 0 && body % G::ELEMENT_LENGTH == 0);
        if body.is_none() {
            return Err(Error::LengthMismatch {
                record: "round 1 message",
                actual: data.len(),
            });
        }

        let (sender_bytes, rest) = data.split_at(G::SCALAR_LENGTH);
        let (proof_bytes, commitment_bytes) = rest.split_at(ProofOfKnowledge::<G>::ENCODED_LENGTH);

        let sender =
            Identifier::decode(sender_bytes).map_err(Error::field("round 1 sender identifier"))?;
        let proof_of_knowledge = ProofOfKnowledge::decode(proof_bytes)?;
        let commitments = commitment_bytes
            .chunks_exact(G::ELEMENT_LENGTH)
            .map(|chunk| G::decode_element(chunk).map_err(Error::field("round 1 commitment")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sender,
            proof_of_knowledge,
            commitments,
        })
    }
}

impl_serde_encoded!(Round1Message);
impl_hex_encoded!(Round1Message);

/// Round 2 DKG message: the sender's secret share for one receiver.
///
/// # Security
///
/// The share is private key material. It must travel over a confidential,
/// authenticated point-to-point channel and never be broadcast. It is
/// redacted from `Debug` output and zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Round2Message<G: Group> {
    /// Sender's identifier
    pub sender: Identifier<G>,
    /// Receiver's identifier
    pub receiver: Identifier<G>,
    /// f_sender(receiver)
    pub secret_share: G::Scalar,
}

impl<G: Group> Round2Message<G> {
    /// Length of the fixed-width encoding, `3 * SCALAR_LENGTH`
    pub const ENCODED_LENGTH: usize = 3 * G::SCALAR_LENGTH;

    /// Encode as `sender || receiver || secret_share`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LENGTH);
        out.extend_from_slice(&self.sender.encode());
        out.extend_from_slice(&self.receiver.encode());
        out.extend_from_slice(&G::encode_scalar(&self.secret_share));
        out
    }

    /// Decode a round 2 message of exactly `ENCODED_LENGTH` bytes
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != Self::ENCODED_LENGTH {
            return Err(Error::LengthMismatch {
                record: "round 2 message",
                actual: data.len(),
            });
        }

        let (sender_bytes, rest) = data.split_at(G::SCALAR_LENGTH);
        let (receiver_bytes, share_bytes) = rest.split_at(G::SCALAR_LENGTH);

        let sender =
            Identifier::decode(sender_bytes).map_err(Error::field("round 2 sender identifier"))?;
        let receiver = Identifier::decode(receiver_bytes)
            .map_err(Error::field("round 2 receiver identifier"))?;
        let secret_share =
            G::decode_scalar(share_bytes).map_err(Error::field("round 2 secret share"))?;

        Ok(Self {
            sender,
            receiver,
            secret_share,
        })
    }
}

impl_serde_encoded!(Round2Message);
impl_hex_encoded!(Round2Message);

impl<G: Group> fmt::Debug for Round2Message<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round2Message")
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("secret_share", &"<redacted>")
            .finish()
    }
}

impl<G: Group> Drop for Round2Message<G> {
    fn drop(&mut self) {
        self.secret_share.zeroize();
    }
}
