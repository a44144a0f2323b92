//! Firma y verificación de steps.
//!
//! - `Signature`: artefacto persistido (algoritmo, campos firmados, valor).
//! - `SignatureEngine`: orquesta Sign/Verify sobre una `SignaturePrimitive`.
//! - `Key` / `KeyMaterial` / `Algorithm`: material de clave y registro de
//!   algoritmos soportados.

pub mod algorithm;
pub mod artifact;
pub mod engine;
pub mod key;
pub mod primitive;

pub use algorithm::Algorithm;
pub use artifact::Signature;
pub use engine::{sign, SignatureEngine, VerifyPolicy};
pub use key::{Key, KeyMaterial};
pub use primitive::{RustCryptoPrimitive, SignaturePrimitive};
