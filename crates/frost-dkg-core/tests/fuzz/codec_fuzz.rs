//! Property-based tests for decoders and configuration
//!
//! Decoders face untrusted network input: whatever the bytes, they must
//! return an error rather than panic, and the length check must come first.

use frost_dkg_core::{
    Commitment, CommitmentList, DkgConfig, Error, Group, Identifier, ProofOfKnowledge,
    Ristretto255Sha512, Round1Message, Round2Message, Secp256k1Sha256,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max_len)
}

fn arb_session_id() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

// ============================================================================
// Decoders on arbitrary input
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fuzz_secp256k1_decoders_never_panic(data in arb_bytes(512)) {
        let _ = Identifier::<Secp256k1Sha256>::decode(&data);
        let _ = Commitment::<Secp256k1Sha256>::decode(&data);
        let _ = CommitmentList::<Secp256k1Sha256>::decode(&data);
        let _ = ProofOfKnowledge::<Secp256k1Sha256>::decode(&data);
        let _ = Round1Message::<Secp256k1Sha256>::decode(&data);
        let _ = Round2Message::<Secp256k1Sha256>::decode(&data);
    }

    #[test]
    fn fuzz_ristretto255_decoders_never_panic(data in arb_bytes(512)) {
        let _ = Identifier::<Ristretto255Sha512>::decode(&data);
        let _ = Commitment::<Ristretto255Sha512>::decode(&data);
        let _ = CommitmentList::<Ristretto255Sha512>::decode(&data);
        let _ = ProofOfKnowledge::<Ristretto255Sha512>::decode(&data);
        let _ = Round1Message::<Ristretto255Sha512>::decode(&data);
        let _ = Round2Message::<Ristretto255Sha512>::decode(&data);
    }

    #[test]
    fn fuzz_scalar_decode_of_full_width_input(data in prop::array::uniform32(any::<u8>())) {
        // Either a canonical scalar that re-encodes to the same bytes, or an error
        if let Ok(scalar) = Secp256k1Sha256::decode_scalar(&data) {
            prop_assert_eq!(Secp256k1Sha256::encode_scalar(&scalar), data.to_vec());
        }
        if let Ok(scalar) = Ristretto255Sha512::decode_scalar(&data) {
            prop_assert_eq!(Ristretto255Sha512::encode_scalar(&scalar), data.to_vec());
        }
    }

    #[test]
    fn fuzz_wrong_length_is_length_mismatch(len in 0usize..400) {
        let data = vec![1u8; len];

        if len != Commitment::<Secp256k1Sha256>::ENCODED_LENGTH {
            let is_length_mismatch = matches!(
                Commitment::<Secp256k1Sha256>::decode(&data),
                Err(Error::LengthMismatch { .. })
            );
            prop_assert!(is_length_mismatch);
        }
        if len != Round2Message::<Ristretto255Sha512>::ENCODED_LENGTH {
            let is_length_mismatch = matches!(
                Round2Message::<Ristretto255Sha512>::decode(&data),
                Err(Error::LengthMismatch { .. })
            );
            prop_assert!(is_length_mismatch);
        }
    }

    #[test]
    fn fuzz_round1_accepts_only_whole_commitments(len in 0usize..400) {
        let data = vec![0u8; len];
        let header = 32 + ProofOfKnowledge::<Secp256k1Sha256>::ENCODED_LENGTH;
        let well_formed = len > header && (len - header) % 33 == 0;

        let result = Round1Message::<Secp256k1Sha256>::decode(&data);
        let is_length_mismatch = matches!(result, Err(Error::LengthMismatch { .. }));
        // All-zero fields never decode, so a well-formed length fails on a field instead
        prop_assert_eq!(is_length_mismatch, !well_formed);
        prop_assert!(result.is_err());
    }
}

// ============================================================================
// Configuration
// ============================================================================

proptest! {
    #[test]
    fn fuzz_config_validation(
        threshold in 0u16..40,
        max_signers in 0u16..40,
        session_id in arb_session_id(),
    ) {
        let result = DkgConfig::with_session_id(threshold, max_signers, session_id);
        let valid = threshold >= 2 && threshold <= max_signers;

        prop_assert_eq!(result.is_ok(), valid);
        match result {
            Ok(config) => {
                prop_assert_eq!(config.round1_count(), usize::from(max_signers));
                prop_assert_eq!(config.round2_count(), usize::from(max_signers) - 1);
            }
            Err(e) => {
                let is_config_error = matches!(e, Error::InvalidConfig(_));
                prop_assert!(is_config_error);
            }
        }
    }

    #[test]
    fn fuzz_identifier_order_matches_integers(a in 1u16.., b in 1u16..) {
        let id_a = Identifier::<Ristretto255Sha512>::from_u16(a).unwrap();
        let id_b = Identifier::<Ristretto255Sha512>::from_u16(b).unwrap();
        prop_assert_eq!(id_a.cmp(&id_b), a.cmp(&b));

        let id_a = Identifier::<Secp256k1Sha256>::from_u16(a).unwrap();
        let id_b = Identifier::<Secp256k1Sha256>::from_u16(b).unwrap();
        prop_assert_eq!(id_a.cmp(&id_b), a.cmp(&b));
    }
}
