//! Helpers compartidos por los tests de integración: pares de claves por
//! algoritmo y constructores de env.
#![allow(dead_code)]

use std::sync::OnceLock;

use pipesign_core::{Algorithm, Env, Key, KeyMaterial};
use rand_core::{OsRng, RngCore};

pub fn env(pairs: &[(&str, &str)]) -> Env {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Par (firma, verificación) simétrico: ambas son la misma clave.
pub fn symmetric_pair(secret: &str, alg: Algorithm) -> (Key, Key) {
    let signer = Key::hmac(alg, secret.as_bytes().to_vec()).with_key_id("TestSignVerify");
    let verifier = signer.to_verifying();
    (signer, verifier)
}

// Generar RSA en debug es lento; una sola clave alcanza para todos los tests.
fn rsa_key() -> &'static rsa::RsaPrivateKey {
    static KEY: OnceLock<rsa::RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| rsa::RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa keygen"))
}

pub fn rsa_pair(alg: Algorithm) -> (Key, Key) {
    let signer = Key::new(alg.as_str(), KeyMaterial::RsaPrivate(rsa_key().clone()));
    let verifier = signer.to_verifying();
    (signer, verifier)
}

pub fn ec_pair(alg: Algorithm) -> (Key, Key) {
    let material = match alg {
        Algorithm::ES256 => KeyMaterial::P256Private(p256::ecdsa::SigningKey::random(&mut OsRng)),
        Algorithm::ES384 => KeyMaterial::P384Private(p384::ecdsa::SigningKey::random(&mut OsRng)),
        Algorithm::ES512 => KeyMaterial::P521Private(p521::ecdsa::SigningKey::random(&mut OsRng)),
        other => panic!("{other} is not an ecdsa algorithm"),
    };
    let signer = Key::new(alg.as_str(), material);
    let verifier = signer.to_verifying();
    (signer, verifier)
}

pub fn ed25519_pair() -> (Key, Key) {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    let signer = Key::new(Algorithm::EdDSA.as_str(), KeyMaterial::Ed25519Private(ed25519_dalek::SigningKey::from_bytes(&seed)));
    let verifier = signer.to_verifying();
    (signer, verifier)
}

pub fn pair_for(alg: Algorithm) -> (Key, Key) {
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => symmetric_pair("alpacas", alg),
        Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => rsa_pair(alg),
        Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => ec_pair(alg),
        Algorithm::EdDSA => ed25519_pair(),
    }
}
