use std::fmt;
use std::str::FromStr;

use crate::errors::SigningError;

/// Algoritmos de firma soportados, identificados por su nombre JWA.
///
/// Sólo la familia HMAC es determinista: firmar dos veces el mismo input con
/// la misma clave da el mismo valor. El resto puede variar entre llamadas y
/// ambas firmas verifican igual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    HS256,
    HS384,
    HS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
    EdDSA,
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [Self::HS256, Self::HS384, Self::HS512, Self::PS256, Self::PS384, Self::PS512, Self::ES256, Self::ES384, Self::ES512, Self::EdDSA];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::PS256 => "PS256",
            Self::PS384 => "PS384",
            Self::PS512 => "PS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
            Self::EdDSA => "EdDSA",
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::HS256 | Self::HS384 | Self::HS512)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SigningError;

    /// Coincidencia exacta: nunca se degrada a un algoritmo "parecido".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .copied()
                 .find(|a| a.as_str() == s)
                 .ok_or_else(|| SigningError::UnrecognizedAlgorithm(s.to_string()))
    }
}
