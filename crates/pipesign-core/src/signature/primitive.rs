//! Capa de primitivas criptográficas.
//!
//! `SignaturePrimitive` es el seam hacia la implementación criptográfica; el
//! engine sólo le entrega el algoritmo resuelto, el material de clave y los
//! bytes canónicos. `RustCryptoPrimitive` es la implementación por defecto
//! sobre los crates de RustCrypto.
//!
//! Contrato de `verify`: `Ok(false)` significa "verificado y no coincide"
//! (incluye firmas mal formadas); `Err` significa "no se pudo verificar"
//! (p.ej. material de clave incompatible con el algoritmo).

use hmac::{Hmac, Mac};
use rand_core::OsRng;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};
use sha2::{Sha256, Sha384, Sha512};

use super::{Algorithm, KeyMaterial};
use crate::errors::{Result, SigningError};

pub trait SignaturePrimitive: Send + Sync {
    fn sign(&self, alg: Algorithm, key: &KeyMaterial, message: &[u8]) -> Result<Vec<u8>>;

    fn verify(&self, alg: Algorithm, key: &KeyMaterial, message: &[u8], signature: &[u8]) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoPrimitive;

fn incompatible(alg: Algorithm, key: &KeyMaterial) -> SigningError {
    SigningError::PrimitiveFailure(format!("{} key cannot be used with {alg}", key.kind()))
}

macro_rules! hmac_with {
    ($digest:ty, $secret:expr) => {
        <Hmac<$digest> as Mac>::new_from_slice($secret).map_err(|e| SigningError::PrimitiveFailure(format!("hmac key: {e}")))?
    };
}

fn hmac_sign(alg: Algorithm, secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let tag = match alg {
        Algorithm::HS256 => hmac_with!(Sha256, secret).chain_update(message).finalize().into_bytes().to_vec(),
        Algorithm::HS384 => hmac_with!(Sha384, secret).chain_update(message).finalize().into_bytes().to_vec(),
        Algorithm::HS512 => hmac_with!(Sha512, secret).chain_update(message).finalize().into_bytes().to_vec(),
        other => return Err(SigningError::PrimitiveFailure(format!("{other} is not an hmac algorithm"))),
    };
    Ok(tag)
}

// verify_slice compara en tiempo constante.
fn hmac_verify(alg: Algorithm, secret: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let ok = match alg {
        Algorithm::HS256 => hmac_with!(Sha256, secret).chain_update(message).verify_slice(signature).is_ok(),
        Algorithm::HS384 => hmac_with!(Sha384, secret).chain_update(message).verify_slice(signature).is_ok(),
        Algorithm::HS512 => hmac_with!(Sha512, secret).chain_update(message).verify_slice(signature).is_ok(),
        other => return Err(SigningError::PrimitiveFailure(format!("{other} is not an hmac algorithm"))),
    };
    Ok(ok)
}

fn pss_sign<D>(key: &rsa::RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>>
    where D: sha2::Digest + sha2::digest::FixedOutputReset
{
    let signing_key = rsa::pss::BlindedSigningKey::<D>::new(key.clone());
    let sig = signing_key.try_sign_with_rng(&mut OsRng, message).map_err(|e| SigningError::PrimitiveFailure(format!("rsa-pss: {e}")))?;
    Ok(sig.to_vec())
}

fn pss_verify<D>(key: &rsa::RsaPublicKey, message: &[u8], signature: &[u8]) -> Result<bool>
    where D: sha2::Digest + sha2::digest::FixedOutputReset
{
    let Ok(sig) = rsa::pss::Signature::try_from(signature) else {
        return Ok(false);
    };
    let verifying_key = rsa::pss::VerifyingKey::<D>::new(key.clone());
    Ok(verifying_key.verify(message, &sig).is_ok())
}

impl SignaturePrimitive for RustCryptoPrimitive {
    fn sign(&self, alg: Algorithm, key: &KeyMaterial, message: &[u8]) -> Result<Vec<u8>> {
        match (alg, key) {
            (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512, KeyMaterial::Symmetric(s)) => hmac_sign(alg, s, message),
            (Algorithm::PS256, KeyMaterial::RsaPrivate(k)) => pss_sign::<Sha256>(k, message),
            (Algorithm::PS384, KeyMaterial::RsaPrivate(k)) => pss_sign::<Sha384>(k, message),
            (Algorithm::PS512, KeyMaterial::RsaPrivate(k)) => pss_sign::<Sha512>(k, message),
            (Algorithm::ES256, KeyMaterial::P256Private(k)) => {
                let sig: p256::ecdsa::Signature = k.try_sign(message).map_err(|e| SigningError::PrimitiveFailure(format!("ecdsa p256: {e}")))?;
                Ok(sig.to_bytes().to_vec())
            }
            (Algorithm::ES384, KeyMaterial::P384Private(k)) => {
                let sig: p384::ecdsa::Signature = k.try_sign(message).map_err(|e| SigningError::PrimitiveFailure(format!("ecdsa p384: {e}")))?;
                Ok(sig.to_bytes().to_vec())
            }
            (Algorithm::ES512, KeyMaterial::P521Private(k)) => {
                let sig: p521::ecdsa::Signature = k.try_sign(message).map_err(|e| SigningError::PrimitiveFailure(format!("ecdsa p521: {e}")))?;
                Ok(sig.to_bytes().to_vec())
            }
            (Algorithm::EdDSA, KeyMaterial::Ed25519Private(k)) => {
                let sig: ed25519_dalek::Signature = k.try_sign(message).map_err(|e| SigningError::PrimitiveFailure(format!("ed25519: {e}")))?;
                Ok(sig.to_bytes().to_vec())
            }
            (alg, key) => Err(incompatible(alg, key)),
        }
    }

    fn verify(&self, alg: Algorithm, key: &KeyMaterial, message: &[u8], signature: &[u8]) -> Result<bool> {
        match (alg, key) {
            (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512, KeyMaterial::Symmetric(s)) => hmac_verify(alg, s, message, signature),
            (Algorithm::PS256, KeyMaterial::RsaPublic(k)) => pss_verify::<Sha256>(k, message, signature),
            (Algorithm::PS384, KeyMaterial::RsaPublic(k)) => pss_verify::<Sha384>(k, message, signature),
            (Algorithm::PS512, KeyMaterial::RsaPublic(k)) => pss_verify::<Sha512>(k, message, signature),
            (Algorithm::ES256, KeyMaterial::P256Public(k)) => {
                Ok(p256::ecdsa::Signature::from_slice(signature).map(|sig| k.verify(message, &sig).is_ok()).unwrap_or(false))
            }
            (Algorithm::ES384, KeyMaterial::P384Public(k)) => {
                Ok(p384::ecdsa::Signature::from_slice(signature).map(|sig| k.verify(message, &sig).is_ok()).unwrap_or(false))
            }
            (Algorithm::ES512, KeyMaterial::P521Public(k)) => {
                Ok(p521::ecdsa::Signature::from_slice(signature).map(|sig| k.verify(message, &sig).is_ok()).unwrap_or(false))
            }
            (Algorithm::EdDSA, KeyMaterial::Ed25519Public(k)) => {
                Ok(ed25519_dalek::Signature::from_slice(signature).map(|sig| k.verify(message, &sig).is_ok()).unwrap_or(false))
            }
            // Con la clave privada también se puede verificar.
            (alg, KeyMaterial::RsaPrivate(_) | KeyMaterial::P256Private(_) | KeyMaterial::P384Private(_) | KeyMaterial::P521Private(_) | KeyMaterial::Ed25519Private(_)) => {
                self.verify(alg, &key.to_verifying(), message, signature)
            }
            (alg, key) => Err(incompatible(alg, key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_is_deterministic_and_keyed() {
        let p = RustCryptoPrimitive;
        let k = KeyMaterial::Symmetric(b"alpacas".to_vec());
        let a = p.sign(Algorithm::HS256, &k, b"msg").unwrap();
        let b = p.sign(Algorithm::HS256, &k, b"msg").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(p.verify(Algorithm::HS256, &k, b"msg", &a).unwrap());
        assert!(!p.verify(Algorithm::HS256, &KeyMaterial::Symmetric(b"llamas".to_vec()), b"msg", &a).unwrap());
        assert_eq!(p.sign(Algorithm::HS512, &k, b"msg").unwrap().len(), 64);
    }

    #[test]
    fn wrong_material_is_a_primitive_failure() {
        let p = RustCryptoPrimitive;
        let k = KeyMaterial::Symmetric(b"alpacas".to_vec());
        let err = p.sign(Algorithm::ES256, &k, b"msg").unwrap_err();
        assert!(matches!(err, SigningError::PrimitiveFailure(_)));
    }

    #[test]
    fn malformed_signature_is_a_mismatch() {
        let p = RustCryptoPrimitive;
        let sk = ed25519_dalek::SigningKey::from_bytes(&[3u8; 32]);
        let vk = KeyMaterial::Ed25519Public(sk.verifying_key());
        assert!(!p.verify(Algorithm::EdDSA, &vk, b"msg", b"short").unwrap());
    }

    #[test]
    fn ecdsa_p256_round_trip() {
        let p = RustCryptoPrimitive;
        let sk = KeyMaterial::P256Private(p256::ecdsa::SigningKey::random(&mut OsRng));
        let sig = p.sign(Algorithm::ES256, &sk, b"msg").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(p.verify(Algorithm::ES256, &sk.to_verifying(), b"msg", &sig).unwrap());
        assert!(!p.verify(Algorithm::ES256, &sk.to_verifying(), b"other", &sig).unwrap());
    }
}
