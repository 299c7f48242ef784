//! Wire encoding tests
//!
//! Fixed-width records, length checks and field decode ordering for every
//! public message type.

use frost_dkg_core::{
    Commitment, DkgConfig, DkgParticipant, Error, Group, GroupError, Identifier,
    ProofOfKnowledge, Ristretto255Sha512, Round1Message, Round2Message, Secp256k1Sha256,
    SigningNonces,
};
use rand::rngs::OsRng;

// ============================================================================
// Test Setup
// ============================================================================

fn round1<G: Group>(threshold: u16, n: u16) -> Vec<Round1Message<G>> {
    let config = DkgConfig::new(threshold, n).unwrap();
    (1..=n)
        .map(|i| {
            DkgParticipant::<G>::new(Identifier::from_u16(i).unwrap(), config.clone())
                .unwrap()
                .init(&mut OsRng)
                .unwrap()
        })
        .collect()
}

fn lengths_around(expected: usize) -> [usize; 3] {
    [0, expected - 1, expected + 1]
}

// ============================================================================
// Length Checks
// ============================================================================

#[test]
fn test_commitment_length_mismatch() {
    let encoded = SigningNonces::<Secp256k1Sha256>::new(&mut OsRng)
        .commit(Identifier::from_u16(1).unwrap())
        .encode();
    let expected = Commitment::<Secp256k1Sha256>::ENCODED_LENGTH;
    assert_eq!(encoded.len(), expected);

    for len in lengths_around(expected) {
        let mut data = encoded.clone();
        data.resize(len, 0);
        assert_eq!(
            Commitment::<Secp256k1Sha256>::decode(&data),
            Err(Error::LengthMismatch {
                record: "commitment",
                actual: len,
            })
        );
    }
}

#[test]
fn test_proof_length_mismatch() {
    assert_eq!(ProofOfKnowledge::<Secp256k1Sha256>::ENCODED_LENGTH, 65);
    assert_eq!(ProofOfKnowledge::<Ristretto255Sha512>::ENCODED_LENGTH, 64);

    let proof = round1::<Ristretto255Sha512>(2, 2).remove(0).proof_of_knowledge;
    let encoded = proof.encode();

    for len in lengths_around(64) {
        let mut data = encoded.clone();
        data.resize(len, 0);
        assert!(matches!(
            ProofOfKnowledge::<Ristretto255Sha512>::decode(&data),
            Err(Error::LengthMismatch { actual, .. }) if actual == len
        ));
    }
}

#[test]
fn test_round2_length_mismatch() {
    let message = Round2Message::<Secp256k1Sha256> {
        sender: Identifier::from_u16(1).unwrap(),
        receiver: Identifier::from_u16(2).unwrap(),
        secret_share: Secp256k1Sha256::random_scalar(&mut OsRng),
    };
    let encoded = message.encode();
    assert_eq!(encoded.len(), Round2Message::<Secp256k1Sha256>::ENCODED_LENGTH);

    for len in lengths_around(encoded.len()) {
        let mut data = encoded.clone();
        data.resize(len, 0);
        assert!(matches!(
            Round2Message::<Secp256k1Sha256>::decode(&data),
            Err(Error::LengthMismatch {
                record: "round 2 message",
                ..
            })
        ));
    }
}

#[test]
fn test_round1_length_varies_with_threshold() {
    for threshold in 2..=4u16 {
        let message = round1::<Secp256k1Sha256>(threshold, 4).remove(0);
        let encoded = message.encode();

        assert_eq!(encoded.len(), 32 + 65 + usize::from(threshold) * 33);
        assert_eq!(
            Round1Message::<Secp256k1Sha256>::decode(&encoded).unwrap(),
            message
        );
    }
}

// ============================================================================
// Field Decode Ordering
// ============================================================================

#[test]
fn test_first_bad_field_is_reported() {
    let commitment = SigningNonces::<Ristretto255Sha512>::new(&mut OsRng)
        .commit(Identifier::from_u16(3).unwrap());
    let mut encoded = commitment.encode();

    // Zero identifier and identity binding nonce: the identifier fails first
    encoded[..32].fill(0);
    encoded[64..].fill(0);
    assert_eq!(
        Commitment::<Ristretto255Sha512>::decode(&encoded),
        Err(Error::FieldDecodeFailed {
            field: "commitment identifier",
            source: GroupError::ZeroScalar,
        })
    );

    encoded[..32].copy_from_slice(&commitment.identifier.encode());
    assert_eq!(
        Commitment::<Ristretto255Sha512>::decode(&encoded),
        Err(Error::FieldDecodeFailed {
            field: "commitment binding nonce",
            source: GroupError::IdentityElement,
        })
    );
}

#[test]
fn test_non_canonical_share_rejected() {
    let message = Round2Message::<Secp256k1Sha256> {
        sender: Identifier::from_u16(1).unwrap(),
        receiver: Identifier::from_u16(2).unwrap(),
        secret_share: Secp256k1Sha256::random_scalar(&mut OsRng),
    };
    let mut encoded = message.encode();
    encoded[64..].fill(0xff);

    assert!(matches!(
        Round2Message::<Secp256k1Sha256>::decode(&encoded),
        Err(Error::FieldDecodeFailed {
            field: "round 2 secret share",
            source: GroupError::InvalidScalar,
        })
    ));
}

#[test]
fn test_round1_bad_commitment() {
    let message = round1::<Secp256k1Sha256>(2, 2).remove(0);
    let mut encoded = message.encode();
    let last = encoded.len() - 33;
    // 0x07 is not a SEC1 tag
    encoded[last] = 0x07;

    assert!(matches!(
        Round1Message::<Secp256k1Sha256>::decode(&encoded),
        Err(Error::FieldDecodeFailed {
            field: "round 1 commitment",
            ..
        })
    ));
}

// ============================================================================
// Serde
// ============================================================================

#[test]
fn test_round1_json_is_hex_of_wire_encoding() {
    let message = round1::<Secp256k1Sha256>(2, 3).remove(1);
    let json = serde_json::to_string(&message).unwrap();

    assert_eq!(json, format!("\"{}\"", hex::encode(message.encode())));
    let decoded: Round1Message<Secp256k1Sha256> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_serde_rejects_bad_hex() {
    assert!(serde_json::from_str::<Commitment<Ristretto255Sha512>>("\"zz\"").is_err());
    assert!(serde_json::from_str::<Commitment<Ristretto255Sha512>>("\"00\"").is_err());
}

#[test]
fn test_config_json() {
    let config = DkgConfig::with_session_id(2, 3, [0xab; 32]).unwrap();
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["threshold"], 2);
    assert_eq!(json["max_signers"], 3);
    assert_eq!(json["session_id"], hex::encode([0xab; 32]));
    assert_eq!(serde_json::from_value::<DkgConfig>(json).unwrap(), config);
}

// ============================================================================
// Hex Helpers
// ============================================================================

#[test]
fn test_hex_helpers_match_wire_encoding() {
    let message = round1::<Ristretto255Sha512>(2, 2).remove(0);
    let encoded = message.to_hex();

    assert_eq!(encoded, hex::encode(message.encode()));
    assert_eq!(
        Round1Message::<Ristretto255Sha512>::from_hex(&encoded).unwrap(),
        message
    );
    assert_eq!(
        ProofOfKnowledge::<Ristretto255Sha512>::from_hex(&message.proof_of_knowledge.to_hex())
            .unwrap(),
        message.proof_of_knowledge
    );
}

#[test]
fn test_bad_hex_is_serialization_error() {
    assert!(matches!(
        Commitment::<Secp256k1Sha256>::from_hex("not hex"),
        Err(Error::Serialization(_))
    ));
    assert!(matches!(
        Round2Message::<Secp256k1Sha256>::from_hex("abc"),
        Err(Error::Serialization(_))
    ));

    // Valid hex of the wrong length is a length error, not a hex error
    assert!(matches!(
        Commitment::<Secp256k1Sha256>::from_hex("00"),
        Err(Error::LengthMismatch { actual: 1, .. })
    ));
}
