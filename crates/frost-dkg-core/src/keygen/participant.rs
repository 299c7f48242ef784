//! DKG participant state machine

use super::polynomial::{evaluate_commitments, verify_share, SecretPolynomial};
use super::proof::ProofOfKnowledge;
use super::{KeyPackage, Round1Message, Round2Message};
use crate::config::DkgConfig;
use crate::group::Group;
use crate::types::Identifier;
use crate::{Error, Result};
use rand::{CryptoRng, RngCore};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};
use zeroize::Zeroizing;

/// Lifecycle of a DKG participant
///
/// `Idle -> Round1Done -> Round2Done -> Finalized`, or `Aborted` after any
/// failure in Continue or Finalize. Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DkgState {
    /// Created, `init` not yet called
    Idle,
    /// Round 1 message produced
    Round1Done,
    /// Peers verified and round 2 messages produced
    Round2Done,
    /// Key material derived
    Finalized,
    /// Run failed; no further calls are accepted
    Aborted,
}

impl DkgState {
    /// Name used in logs and `InvalidState` errors
    pub fn as_str(&self) -> &'static str {
        match self {
            DkgState::Idle => "idle",
            DkgState::Round1Done => "round1_done",
            DkgState::Round2Done => "round2_done",
            DkgState::Finalized => "finalized",
            DkgState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for DkgState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant of a DKG run.
///
/// An instance runs the protocol exactly once. Every transition takes
/// `&mut self`, so callers sharing a participant across tasks must serialize
/// access themselves.
pub struct DkgParticipant<G: Group> {
    identifier: Identifier<G>,
    config: DkgConfig,
    state: DkgState,
    polynomial: Option<SecretPolynomial<G>>,
    own_round1: Option<Round1Message<G>>,
    /// Verified round 1 messages of every participant, self included
    round1: BTreeMap<Identifier<G>, Round1Message<G>>,
}

impl<G: Group> DkgParticipant<G> {
    /// Create a participant for the run described by `config`
    pub fn new(identifier: Identifier<G>, config: DkgConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            identifier,
            config,
            state: DkgState::Idle,
            polynomial: None,
            own_round1: None,
            round1: BTreeMap::new(),
        })
    }

    /// This participant's identifier
    pub fn identifier(&self) -> &Identifier<G> {
        &self.identifier
    }

    /// Parameters of the run
    pub fn config(&self) -> &DkgConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> DkgState {
        self.state
    }

    /// Identifiers of all participants, known once round 1 has been verified
    pub fn participants(&self) -> Vec<Identifier<G>> {
        self.round1.keys().copied().collect()
    }

    /// DKG step 1: sample the secret polynomial and produce the round 1
    /// message to broadcast.
    #[instrument(skip_all, fields(identifier = %self.identifier))]
    pub fn init<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<Round1Message<G>> {
        self.expect_state(DkgState::Idle)?;

        info!(
            threshold = self.config.threshold,
            max_signers = self.config.max_signers,
            version = crate::VERSION,
            "Starting DKG round 1"
        );

        let polynomial = SecretPolynomial::<G>::random(usize::from(self.config.threshold), rng);
        let commitments = polynomial.commitments();
        let proof_of_knowledge = ProofOfKnowledge::prove(
            &self.identifier,
            polynomial.constant_term(),
            &commitments[0],
            &self.config.session_id,
            rng,
        );

        let message = Round1Message {
            sender: self.identifier,
            proof_of_knowledge,
            commitments,
        };

        self.polynomial = Some(polynomial);
        self.own_round1 = Some(message.clone());
        self.state = DkgState::Round1Done;

        debug!("Round 1 message ready for broadcast");
        Ok(message)
    }

    /// DKG step 2: verify every participant's round 1 message and produce one
    /// round 2 message per peer, in ascending identifier order.
    ///
    /// `round1` must hold exactly one message per participant, our own
    /// included. Messages are matched by sender, not by position.
    #[instrument(skip_all, fields(identifier = %self.identifier))]
    pub fn continue_round(
        &mut self,
        round1: &[Round1Message<G>],
    ) -> Result<Vec<Round2Message<G>>> {
        self.expect_state(DkgState::Round1Done)?;

        match self.verify_round1(round1) {
            Ok(verified) => self.round1 = verified,
            Err(e) => return Err(self.abort(e)),
        }

        let shares = self
            .round1
            .keys()
            .filter(|id| **id != self.identifier)
            .map(|receiver| self.share_for(receiver))
            .collect::<Result<Vec<_>>>();

        match shares {
            Ok(shares) => {
                self.state = DkgState::Round2Done;
                info!(peers = shares.len(), "DKG round 2 messages ready");
                Ok(shares)
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    /// DKG step 3: verify the shares addressed to us and derive the key
    /// package.
    ///
    /// `round1` must be the same set handed to `continue_round`; `round2`
    /// must hold exactly one message from every peer.
    #[instrument(skip_all, fields(identifier = %self.identifier))]
    pub fn finalize(
        &mut self,
        round1: &[Round1Message<G>],
        round2: &[Round2Message<G>],
    ) -> Result<KeyPackage<G>> {
        self.expect_state(DkgState::Round2Done)?;

        match self.derive_key_package(round1, round2) {
            Ok(key_package) => {
                // The polynomial is no longer needed
                self.polynomial = None;
                self.state = DkgState::Finalized;
                info!(
                    group_public_key = hex::encode(key_package.group_public_key_bytes()),
                    "DKG completed successfully"
                );
                Ok(key_package)
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    fn verify_round1(
        &self,
        round1: &[Round1Message<G>],
    ) -> Result<BTreeMap<Identifier<G>, Round1Message<G>>> {
        let expected = self.config.round1_count();
        if round1.len() != expected {
            return Err(Error::InvalidRound1Count {
                expected,
                actual: round1.len(),
            });
        }

        let mut verified = BTreeMap::new();
        for message in round1 {
            if verified.insert(message.sender, message.clone()).is_some() {
                return Err(Error::DuplicateIdentifier(message.sender.to_hex()));
            }
        }

        match (verified.get(&self.identifier), self.own_round1.as_ref()) {
            (Some(received), Some(own)) if received == own => {}
            (Some(_), _) => return Err(Error::OwnMessageMismatch),
            (None, _) => return Err(Error::CommitmentNotFound(self.identifier.to_hex())),
        }

        let threshold = usize::from(self.config.threshold);
        for (sender, message) in verified.iter().filter(|(id, _)| **id != self.identifier) {
            if message.commitments.len() != threshold {
                return Err(Error::InvalidCommitmentCount {
                    participant: sender.to_hex(),
                    expected: threshold,
                    actual: message.commitments.len(),
                });
            }

            if !message.verify_proof(&self.config.session_id) {
                return Err(Error::InvalidSignature(sender.to_hex()));
            }
            debug!(peer = %sender, "Verified proof of knowledge");
        }

        Ok(verified)
    }

    /// Our polynomial evaluated at `receiver`
    fn share_for(&self, receiver: &Identifier<G>) -> Result<Round2Message<G>> {
        if *receiver == self.identifier || !self.round1.contains_key(receiver) {
            return Err(Error::InvalidReceiver(receiver.to_hex()));
        }
        let polynomial = self.polynomial.as_ref().ok_or(Error::InvalidState {
            expected: DkgState::Round1Done.as_str(),
            actual: self.state.as_str(),
        })?;

        Ok(Round2Message {
            sender: self.identifier,
            receiver: *receiver,
            secret_share: polynomial.evaluate(&receiver.to_scalar()),
        })
    }

    fn derive_key_package(
        &self,
        round1: &[Round1Message<G>],
        round2: &[Round2Message<G>],
    ) -> Result<KeyPackage<G>> {
        self.check_round1_unchanged(round1)?;

        let expected = self.config.round2_count();
        if round2.len() != expected {
            return Err(Error::InvalidShareCount {
                expected,
                actual: round2.len(),
            });
        }

        let polynomial = self.polynomial.as_ref().ok_or(Error::InvalidState {
            expected: DkgState::Round2Done.as_str(),
            actual: self.state.as_str(),
        })?;
        let mut secret_share = Zeroizing::new(polynomial.evaluate(&self.identifier.to_scalar()));

        let mut senders = BTreeSet::new();
        for message in round2 {
            if message.receiver != self.identifier {
                return Err(Error::InvalidReceiver(message.receiver.to_hex()));
            }
            if message.sender == self.identifier {
                return Err(Error::InvalidSender(message.sender.to_hex()));
            }
            let sender = self
                .round1
                .get(&message.sender)
                .ok_or_else(|| Error::CommitmentNotFound(message.sender.to_hex()))?;
            if !senders.insert(message.sender) {
                return Err(Error::DuplicateIdentifier(message.sender.to_hex()));
            }

            if !verify_share::<G>(&message.secret_share, &self.identifier, &sender.commitments) {
                return Err(Error::VerificationShareFailed(message.sender.to_hex()));
            }
            debug!(peer = %message.sender, "Verified secret share");

            *secret_share = *secret_share + message.secret_share;
        }

        let group_public_key = self
            .round1
            .values()
            .filter_map(|message| message.constant_commitment())
            .fold(G::identity(), |acc, commitment| acc + *commitment);

        let verifying_shares = self
            .round1
            .keys()
            .map(|id| {
                let share = self
                    .round1
                    .values()
                    .map(|message| evaluate_commitments::<G>(&message.commitments, &id.to_scalar()))
                    .fold(G::identity(), |acc, element| acc + element);
                (*id, share)
            })
            .collect();

        Ok(KeyPackage::new(
            self.identifier,
            *secret_share,
            group_public_key,
            verifying_shares,
            self.config.threshold,
        ))
    }

    /// The round 1 set given to finalize must be the one verified in
    /// continue_round
    fn check_round1_unchanged(&self, round1: &[Round1Message<G>]) -> Result<()> {
        if round1.len() != self.round1.len() {
            return Err(Error::InvalidRound1Count {
                expected: self.round1.len(),
                actual: round1.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for message in round1 {
            match self.round1.get(&message.sender) {
                None => return Err(Error::CommitmentNotFound(message.sender.to_hex())),
                Some(verified) if verified != message => {
                    return Err(Error::Round1Mismatch(message.sender.to_hex()))
                }
                Some(_) => {}
            }
            if !seen.insert(message.sender) {
                return Err(Error::DuplicateIdentifier(message.sender.to_hex()));
            }
        }
        Ok(())
    }

    fn expect_state(&self, expected: DkgState) -> Result<()> {
        if self.state != expected {
            return Err(Error::InvalidState {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            });
        }
        Ok(())
    }

    /// Move to `Aborted`, wiping secret material, and hand the error back
    fn abort(&mut self, error: Error) -> Error {
        warn!(error = %error, "DKG run aborted");
        self.polynomial = None;
        self.round1.clear();
        self.state = DkgState::Aborted;
        error
    }
}

impl<G: Group> fmt::Debug for DkgParticipant<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DkgParticipant")
            .field("identifier", &self.identifier)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
