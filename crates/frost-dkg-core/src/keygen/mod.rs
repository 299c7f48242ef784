//! Distributed Key Generation (DKG)
//!
//! Pedersen-style DKG with Feldman commitments and Schnorr proofs of
//! knowledge, as used by FROST. Every participant:
//!
//! 1. `init`: samples a secret polynomial of degree t-1, broadcasts its
//!    coefficient commitments and a proof of knowledge of the constant term
//! 2. `continue_round`: once all n round 1 messages are in, verifies every
//!    peer's proof and sends each peer its share over a private channel
//! 3. `finalize`: once all n-1 shares are in, verifies them against the
//!    senders' commitments and derives its long-term key material
//!
//! Any verification failure aborts the run for that participant.

mod messages;
mod participant;
pub mod polynomial;
mod proof;

pub use messages::{Round1Message, Round2Message};
pub use participant::{DkgParticipant, DkgState};
pub use proof::ProofOfKnowledge;

use crate::group::Group;
use crate::types::Identifier;
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroize;

/// Result of distributed key generation for one participant
pub struct KeyPackage<G: Group> {
    /// This participant's identifier
    pub identifier: Identifier<G>,
    secret_share: G::Scalar,
    /// `secret_share * G`
    pub public_share: G::Element,
    /// The group public key (same for all participants)
    pub group_public_key: G::Element,
    /// Public shares of every participant, for verifying signature shares
    pub verifying_shares: BTreeMap<Identifier<G>, G::Element>,
    /// Minimum number of signers
    pub threshold: u16,
}

impl<G: Group> KeyPackage<G> {
    pub(crate) fn new(
        identifier: Identifier<G>,
        secret_share: G::Scalar,
        group_public_key: G::Element,
        verifying_shares: BTreeMap<Identifier<G>, G::Element>,
        threshold: u16,
    ) -> Self {
        Self {
            identifier,
            secret_share,
            public_share: G::mul_base(&secret_share),
            group_public_key,
            verifying_shares,
            threshold,
        }
    }

    /// This participant's long-term secret signing share
    pub fn secret_share(&self) -> &G::Scalar {
        &self.secret_share
    }

    /// Public share of `identifier`, if it took part in the run
    pub fn verifying_share(&self, identifier: &Identifier<G>) -> Option<&G::Element> {
        self.verifying_shares.get(identifier)
    }

    /// Encoded group public key
    pub fn group_public_key_bytes(&self) -> Vec<u8> {
        G::encode_element(&self.group_public_key)
    }
}

impl<G: Group> Drop for KeyPackage<G> {
    fn drop(&mut self) {
        self.secret_share.zeroize();
    }
}

impl<G: Group> fmt::Debug for KeyPackage<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPackage")
            .field("identifier", &self.identifier)
            .field("secret_share", &"<redacted>")
            .field("public_share", &self.public_share)
            .field("group_public_key", &self.group_public_key)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
