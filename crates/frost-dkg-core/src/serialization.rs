//! Serde integration for wire types
//!
//! Every protocol structure already has a canonical fixed-width encoding, so
//! serde goes through it: hex strings for human-readable formats such as JSON,
//! raw bytes for binary formats.

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

pub(crate) fn serialize_encoded<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if serializer.is_human_readable() {
        serializer.serialize_str(&hex::encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

pub(crate) fn deserialize_encoded<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(D::Error::custom)
    } else {
        Vec::<u8>::deserialize(deserializer)
    }
}

/// Implement `Serialize`/`Deserialize` for a `Type<G>` that has inherent
/// `encode(&self) -> Vec<u8>` and `decode(&[u8]) -> Result<Self, E>` methods
macro_rules! impl_serde_encoded {
    ($ty:ident) => {
        impl<G: $crate::group::Group> serde::Serialize for $ty<G> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                $crate::serialization::serialize_encoded(&self.encode(), serializer)
            }
        }

        impl<'de, G: $crate::group::Group> serde::Deserialize<'de> for $ty<G> {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bytes = $crate::serialization::deserialize_encoded(deserializer)?;
                Self::decode(&bytes).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_serde_encoded;

/// Implement `to_hex`/`from_hex` for a `Type<G>` with inherent
/// `encode(&self) -> Vec<u8>` and `decode(&[u8]) -> crate::Result<Self>`
macro_rules! impl_hex_encoded {
    ($ty:ident) => {
        impl<G: $crate::group::Group> $ty<G> {
            /// Hex encoding of the wire bytes
            pub fn to_hex(&self) -> String {
                hex::encode(self.encode())
            }

            /// Decode from the hex form produced by `to_hex`
            pub fn from_hex(encoded: &str) -> $crate::Result<Self> {
                Self::decode(&hex::decode(encoded)?)
            }
        }
    };
}

pub(crate) use impl_hex_encoded;
