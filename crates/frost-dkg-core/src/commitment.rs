//! Signing nonce commitments
//!
//! Before each signing session every signer samples a fresh pair of secret
//! nonces and publishes a [`Commitment`] to them. The signing round (outside
//! this crate) consumes a [`CommitmentList`] in canonical order, so every
//! signer must see the same ordering.

use crate::group::Group;
use crate::serialization::{impl_hex_encoded, impl_serde_encoded};
use crate::types::Identifier;
use crate::{Error, Result};
use rand::{CryptoRng, RngCore};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A signer's one-time commitment to its hiding and binding nonces.
///
/// A commitment belongs to exactly one signing session and must never be
/// reused; the caller is responsible for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment<G: Group> {
    /// Identifier of the committing signer
    pub identifier: Identifier<G>,
    /// `hiding_nonce * G`
    pub hiding_nonce: G::Element,
    /// `binding_nonce * G`
    pub binding_nonce: G::Element,
}

impl<G: Group> Commitment<G> {
    /// Length of the fixed-width encoding
    pub const ENCODED_LENGTH: usize = G::SCALAR_LENGTH + 2 * G::ELEMENT_LENGTH;

    /// Encode as `identifier || hiding_nonce || binding_nonce`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LENGTH);
        out.extend_from_slice(&self.identifier.encode());
        out.extend_from_slice(&G::encode_element(&self.hiding_nonce));
        out.extend_from_slice(&G::encode_element(&self.binding_nonce));
        out
    }

    /// Decode a commitment. Fields are decoded in wire order and the first
    /// failure aborts the whole record.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != Self::ENCODED_LENGTH {
            return Err(Error::LengthMismatch {
                record: "commitment",
                actual: data.len(),
            });
        }

        let (id_bytes, nonces) = data.split_at(G::SCALAR_LENGTH);
        let (hiding_bytes, binding_bytes) = nonces.split_at(G::ELEMENT_LENGTH);

        let identifier =
            Identifier::decode(id_bytes).map_err(Error::field("commitment identifier"))?;
        let hiding_nonce =
            G::decode_element(hiding_bytes).map_err(Error::field("commitment hiding nonce"))?;
        let binding_nonce =
            G::decode_element(binding_bytes).map_err(Error::field("commitment binding nonce"))?;

        Ok(Self {
            identifier,
            hiding_nonce,
            binding_nonce,
        })
    }
}

impl_serde_encoded!(Commitment);
impl_hex_encoded!(Commitment);

/// Three-way comparison of commitments by identifier
fn compare_identifiers<G: Group>(a: &Commitment<G>, b: &Commitment<G>) -> Ordering {
    a.identifier.cmp(&b.identifier)
}

/// An ordered list of commitments, at most one per signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentList<G: Group>(Vec<Commitment<G>>);

impl<G: Group> CommitmentList<G> {
    /// Wrap commitments as given, without sorting or validation
    pub fn new(commitments: Vec<Commitment<G>>) -> Self {
        Self(commitments)
    }

    /// Sort in ascending identifier order
    pub fn sort(&mut self) {
        self.0.sort_by(compare_identifiers);
    }

    /// Whether the list is in ascending identifier order
    pub fn is_sorted(&self) -> bool {
        self.0
            .windows(2)
            .all(|pair| compare_identifiers(&pair[0], &pair[1]) != Ordering::Greater)
    }

    /// Reject lists that name the same signer twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for commitment in &self.0 {
            if !seen.insert(commitment.identifier) {
                return Err(Error::DuplicateIdentifier(commitment.identifier.to_hex()));
            }
        }
        Ok(())
    }

    /// Identifiers of the signers, in list order
    pub fn participants(&self) -> Vec<Identifier<G>> {
        self.0.iter().map(|c| c.identifier).collect()
    }

    /// The first commitment of `identifier`, if any
    pub fn get(&self, identifier: &Identifier<G>) -> Option<&Commitment<G>> {
        self.0.iter().find(|c| c.identifier == *identifier)
    }

    /// Append a commitment
    pub fn push(&mut self, commitment: Commitment<G>) {
        self.0.push(commitment);
    }

    /// Number of commitments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no commitment
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in list order
    pub fn iter(&self) -> std::slice::Iter<'_, Commitment<G>> {
        self.0.iter()
    }

    /// Borrow the commitments as a slice
    pub fn as_slice(&self) -> &[Commitment<G>] {
        &self.0
    }

    /// Concatenated encoding of every commitment, in list order
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() * Commitment::<G>::ENCODED_LENGTH);
        for commitment in &self.0 {
            out.extend_from_slice(&commitment.encode());
        }
        out
    }

    /// Decode a concatenation of fixed-width commitments
    pub fn decode(data: &[u8]) -> Result<Self> {
        let record = Commitment::<G>::ENCODED_LENGTH;
        if data.len() % record != 0 {
            return Err(Error::LengthMismatch {
                record: "commitment list",
                actual: data.len(),
            });
        }

        data.chunks_exact(record)
            .map(Commitment::decode)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl_serde_encoded!(CommitmentList);
impl_hex_encoded!(CommitmentList);

impl<G: Group> FromIterator<Commitment<G>> for CommitmentList<G> {
    fn from_iter<I: IntoIterator<Item = Commitment<G>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, G: Group> IntoIterator for &'a CommitmentList<G> {
    type Item = &'a Commitment<G>;
    type IntoIter = std::slice::Iter<'a, Commitment<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Secret nonces behind a [`Commitment`].
///
/// Must be kept private and used for a single signing session. Zeroized on
/// drop.
pub struct SigningNonces<G: Group> {
    hiding: G::Scalar,
    binding: G::Scalar,
}

impl<G: Group> SigningNonces<G> {
    /// Sample fresh non-zero nonces
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            hiding: G::random_nonzero_scalar(rng),
            binding: G::random_nonzero_scalar(rng),
        }
    }

    /// Public commitment of `identifier` to these nonces
    pub fn commit(&self, identifier: Identifier<G>) -> Commitment<G> {
        Commitment {
            identifier,
            hiding_nonce: G::mul_base(&self.hiding),
            binding_nonce: G::mul_base(&self.binding),
        }
    }

    /// The hiding nonce
    pub fn hiding(&self) -> &G::Scalar {
        &self.hiding
    }

    /// The binding nonce
    pub fn binding(&self) -> &G::Scalar {
        &self.binding
    }
}

impl<G: Group> Zeroize for SigningNonces<G> {
    fn zeroize(&mut self) {
        self.hiding.zeroize();
        self.binding.zeroize();
    }
}

impl<G: Group> Drop for SigningNonces<G> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<G: Group> ZeroizeOnDrop for SigningNonces<G> {}

impl<G: Group> std::fmt::Debug for SigningNonces<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningNonces").finish_non_exhaustive()
    }
}
