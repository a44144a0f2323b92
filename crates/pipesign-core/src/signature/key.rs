//! Material de clave. Opaco para el engine más allá del identificador de
//! algoritmo; el almacenamiento y la distribución quedan fuera del núcleo.

use std::fmt;

use super::Algorithm;

pub enum KeyMaterial {
    Symmetric(Vec<u8>),
    RsaPrivate(rsa::RsaPrivateKey),
    RsaPublic(rsa::RsaPublicKey),
    P256Private(p256::ecdsa::SigningKey),
    P256Public(p256::ecdsa::VerifyingKey),
    P384Private(p384::ecdsa::SigningKey),
    P384Public(p384::ecdsa::VerifyingKey),
    P521Private(p521::ecdsa::SigningKey),
    P521Public(p521::ecdsa::VerifyingKey),
    Ed25519Private(ed25519_dalek::SigningKey),
    Ed25519Public(ed25519_dalek::VerifyingKey),
}

impl KeyMaterial {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Symmetric(_) => "symmetric",
            Self::RsaPrivate(_) => "rsa-private",
            Self::RsaPublic(_) => "rsa-public",
            Self::P256Private(_) => "p256-private",
            Self::P256Public(_) => "p256-public",
            Self::P384Private(_) => "p384-private",
            Self::P384Public(_) => "p384-public",
            Self::P521Private(_) => "p521-private",
            Self::P521Public(_) => "p521-public",
            Self::Ed25519Private(_) => "ed25519-private",
            Self::Ed25519Public(_) => "ed25519-public",
        }
    }

    /// Contraparte de verificación. Para claves simétricas es la misma clave;
    /// para claves públicas, una copia.
    pub fn to_verifying(&self) -> KeyMaterial {
        match self {
            Self::Symmetric(secret) => Self::Symmetric(secret.clone()),
            Self::RsaPrivate(k) => Self::RsaPublic(k.to_public_key()),
            Self::RsaPublic(k) => Self::RsaPublic(k.clone()),
            Self::P256Private(k) => Self::P256Public(k.verifying_key().clone()),
            Self::P256Public(k) => Self::P256Public(k.clone()),
            Self::P384Private(k) => Self::P384Public(k.verifying_key().clone()),
            Self::P384Public(k) => Self::P384Public(k.clone()),
            Self::P521Private(k) => Self::P521Public(p521::ecdsa::VerifyingKey::from(k)),
            Self::P521Public(k) => Self::P521Public(k.clone()),
            Self::Ed25519Private(k) => Self::Ed25519Public(k.verifying_key()),
            Self::Ed25519Public(k) => Self::Ed25519Public(k.clone()),
        }
    }
}

// Nunca imprimir material secreto.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({})", self.kind())
    }
}

/// Clave con su identificador de algoritmo.
///
/// El algoritmo se guarda como string: una clave puede nombrar un algoritmo
/// que la capa de primitivas no implementa, y eso se reporta al firmar como
/// `UnrecognizedAlgorithm`.
#[derive(Debug)]
pub struct Key {
    algorithm: String,
    key_id: Option<String>,
    material: KeyMaterial,
}

impl Key {
    pub fn new(algorithm: impl Into<String>, material: KeyMaterial) -> Self {
        Self { algorithm: algorithm.into(),
               key_id: None,
               material }
    }

    pub fn hmac(algorithm: Algorithm, secret: impl Into<Vec<u8>>) -> Self {
        Self::new(algorithm.as_str(), KeyMaterial::Symmetric(secret.into()))
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Clave de verificación correspondiente (mismo algoritmo y key id).
    pub fn to_verifying(&self) -> Key {
        Key { algorithm: self.algorithm.clone(),
              key_id: self.key_id.clone(),
              material: self.material.to_verifying() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secret() {
        let k = Key::hmac(Algorithm::HS256, b"alpacas".to_vec()).with_key_id("TestSignVerify");
        let dbg = format!("{k:?}");
        assert!(dbg.contains("symmetric"));
        assert!(!dbg.contains("alpacas"));
        assert!(!dbg.contains("97, 108"));
    }

    #[test]
    fn ed25519_verifying_counterpart() {
        let sk = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
        let key = Key::new("EdDSA", KeyMaterial::Ed25519Private(sk));
        let public = key.to_verifying();
        assert_eq!(public.algorithm(), "EdDSA");
        assert_eq!(public.material().kind(), "ed25519-public");
    }
}
