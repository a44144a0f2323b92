//! Artefacto de firma persistido junto al step.
//!
//! Forma serializada:
//!
//! ```json
//! { "algorithm": "HS256", "signed_fields": ["command", "env", "plugins"], "value": "<base64url>" }
//! ```
//!
//! `signed_fields` está en orden de firma (lexicográfico) y nunca vacío en una
//! firma producida por `sign`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    algorithm: String,
    signed_fields: Vec<String>,
    #[serde(with = "base64url")]
    value: Vec<u8>,
}

impl Signature {
    pub fn new(algorithm: impl Into<String>, signed_fields: Vec<String>, value: Vec<u8>) -> Self {
        Self { algorithm: algorithm.into(),
               signed_fields,
               value }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn signed_fields(&self) -> &[String] {
        &self.signed_fields
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

mod base64url {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        URL_SAFE_NO_PAD.decode(s.trim_end_matches('=')).map_err(serde::de::Error::custom)
    }
}
