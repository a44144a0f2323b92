//! Engine de firma: Sign y Verify sobre cualquier `Signable`.
//!
//! Sign:   env efectivo → `signed_fields` → bytes canónicos → primitiva → `Signature`
//! Verify: env efectivo → `values_for_fields(firma.signed_fields)` → bytes canónicos → primitiva
//!
//! Verify recalcula exactamente los campos que registró la firma (no los que
//! el step produciría hoy), así que agregar campos firmables en versiones
//! futuras no invalida firmas viejas. Todo es puro: sin estado compartido ni
//! I/O, y cada llamada arma su propio `FieldMap` y buffer.

use log::{debug, warn};
use std::collections::HashSet;

use super::{Algorithm, Key, RustCryptoPrimitive, Signature, SignaturePrimitive};
use crate::env::{merge_env, Env};
use crate::errors::{Result, SigningError};
use crate::hashing::canonical_bytes;
use crate::step::Signable;

/// Campos que un verificador exige ver cubiertos por la firma.
///
/// La política por defecto no exige nada: acepta cualquier subconjunto no
/// vacío de campos que el step sepa producir.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyPolicy {
    pub required_fields: Vec<String>,
}

impl VerifyPolicy {
    pub fn requiring<I, S>(fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { required_fields: fields.into_iter().map(Into::into).collect() }
    }

    fn check(&self, signature: &Signature) -> Result<()> {
        for required in &self.required_fields {
            if !signature.signed_fields().iter().any(|f| f == required) {
                return Err(SigningError::MissingRequiredField(required.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignatureEngine<P: SignaturePrimitive = RustCryptoPrimitive> {
    primitive: P,
}

impl SignatureEngine<RustCryptoPrimitive> {
    pub fn new() -> Self {
        Self { primitive: RustCryptoPrimitive }
    }
}

impl<P: SignaturePrimitive> SignatureEngine<P> {
    pub fn with_primitive(primitive: P) -> Self {
        Self { primitive }
    }

    /// Firma el set completo de campos actuales de `step`.
    pub fn sign<S: Signable + ?Sized>(&self, pipeline_env: &Env, step: &S, key: &Key) -> Result<Signature> {
        let alg: Algorithm = key.algorithm().parse()?;
        let effective = merge_env(pipeline_env, step.step_env());
        let fields = step.signed_fields(&effective)?;
        if fields.is_empty() {
            return Err(SigningError::NoSignableFields);
        }
        let payload = canonical_bytes(&fields)?;
        let value = self.primitive.sign(alg, key.material(), &payload)?;

        let mut signed_fields: Vec<String> = fields.into_keys().collect();
        signed_fields.sort();
        debug!("signed {} fields with {} (key_id={:?})", signed_fields.len(), alg, key.key_id());
        Ok(Signature::new(alg.as_str(), signed_fields, value))
    }

    pub fn verify<S: Signable + ?Sized>(&self, verify_env: &Env, step: &S, signature: &Signature, key: &Key) -> Result<()> {
        self.verify_with_policy(verify_env, step, signature, key, &VerifyPolicy::default())
    }

    /// Verifica `signature` contra el estado actual de `step`.
    ///
    /// Devuelve `VerificationMismatch` cuando la primitiva verificó y la firma
    /// no corresponde; cualquier otro error significa que no se pudo verificar.
    pub fn verify_with_policy<S: Signable + ?Sized>(&self, verify_env: &Env, step: &S, signature: &Signature, key: &Key, policy: &VerifyPolicy) -> Result<()> {
        let names = signature.signed_fields();
        if names.is_empty() {
            return Err(SigningError::EmptySignedFields);
        }
        let mut seen = HashSet::with_capacity(names.len());
        if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(SigningError::DuplicateSignedField(dup.clone()));
        }
        policy.check(signature)?;
        if signature.algorithm() != key.algorithm() {
            return Err(SigningError::AlgorithmMismatch { artifact: signature.algorithm().to_string(),
                                                         key: key.algorithm().to_string() });
        }
        let alg: Algorithm = signature.algorithm().parse()?;

        let effective = merge_env(verify_env, step.step_env());
        let fields = step.values_for_fields(&effective, names)?;
        let payload = canonical_bytes(&fields)?;
        if self.primitive.verify(alg, key.material(), &payload, signature.value())? {
            debug!("verified {} fields with {}", names.len(), alg);
            Ok(())
        } else {
            warn!("signature mismatch for fields {:?} ({})", names, alg);
            Err(SigningError::VerificationMismatch)
        }
    }
}

/// Firma con la primitiva por defecto.
pub fn sign<S: Signable + ?Sized>(pipeline_env: &Env, step: &S, key: &Key) -> Result<Signature> {
    SignatureEngine::new().sign(pipeline_env, step, key)
}

impl Signature {
    /// Verifica con la primitiva por defecto.
    pub fn verify<S: Signable + ?Sized>(&self, verify_env: &Env, step: &S, key: &Key) -> Result<()> {
        SignatureEngine::new().verify(verify_env, step, self, key)
    }

    pub fn verify_with_policy<S: Signable + ?Sized>(&self, verify_env: &Env, step: &S, key: &Key, policy: &VerifyPolicy) -> Result<()> {
        SignatureEngine::new().verify_with_policy(verify_env, step, self, key, policy)
    }
}
