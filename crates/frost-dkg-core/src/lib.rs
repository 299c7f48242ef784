//! # FROST DKG Core
//!
//! Protocol core of FROST threshold Schnorr signatures: the distributed key
//! generation that lets t-of-n participants derive shares of a signing key
//! without a trusted dealer, and the nonce commitments signers exchange before
//! each signing session.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Group abstraction**: one [`Group`] trait per ciphersuite, with
//!   secp256k1 and ristretto255 implementations
//! - **DKG**: the [`DkgParticipant`] state machine (init, continue, finalize)
//!   with Feldman share verification and Schnorr proofs of knowledge
//! - **Signing commitments**: [`Commitment`], [`CommitmentList`] and the
//!   secret [`SigningNonces`] behind them
//!
//! Transport is out of scope: callers deliver round 1 messages over an
//! authenticated broadcast channel and round 2 messages over confidential,
//! authenticated point-to-point channels.
//!
//! ## Quick Start
//!
//! ```rust
//! use frost_dkg_core::{DkgConfig, DkgParticipant, Identifier, Secp256k1Sha256};
//! use rand::rngs::OsRng;
//!
//! let config = DkgConfig::new(2, 2)?;
//! let mut alice = DkgParticipant::<Secp256k1Sha256>::new(Identifier::from_u16(1)?, config.clone())?;
//! let mut bob = DkgParticipant::<Secp256k1Sha256>::new(Identifier::from_u16(2)?, config)?;
//!
//! // Round 1: broadcast
//! let round1 = vec![alice.init(&mut OsRng)?, bob.init(&mut OsRng)?];
//!
//! // Round 2: one private message per peer
//! let to_bob = alice.continue_round(&round1)?;
//! let to_alice = bob.continue_round(&round1)?;
//!
//! let alice_key = alice.finalize(&round1, &to_alice)?;
//! let bob_key = bob.finalize(&round1, &to_bob)?;
//! assert_eq!(alice_key.group_public_key, bob_key.group_public_key);
//! # Ok::<(), frost_dkg_core::Error>(())
//! ```

pub mod commitment;
pub mod config;
pub mod error;
pub mod group;
pub mod keygen;
mod serialization;
pub mod types;

pub use commitment::{Commitment, CommitmentList, SigningNonces};
pub use config::{DkgConfig, SessionId};
pub use error::{Error, Result};
#[cfg(feature = "ristretto255")]
pub use group::Ristretto255Sha512;
#[cfg(feature = "secp256k1")]
pub use group::Secp256k1Sha256;
pub use group::{Group, GroupError};
pub use keygen::{
    DkgParticipant, DkgState, KeyPackage, ProofOfKnowledge, Round1Message, Round2Message,
};
pub use types::Identifier;

/// Crate version, logged when a DKG run starts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
