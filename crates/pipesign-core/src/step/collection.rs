//! Colección ordenada de steps y su firmador.
//!
//! Firmar una colección falla cerrado: un step no firmable (`UnknownStep`)
//! rechaza la operación completa, nunca se saltea. Las firmas se calculan
//! todas antes de adjuntar cualquiera; un error no deja firmas parciales.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Serialize, Serializer};

use super::{CommandStep, UnknownStep};
use crate::env::Env;
use crate::errors::{Result, SigningError};
use crate::interpolate::Interpolator;
use crate::signature::{Key, Signature, SignatureEngine, SignaturePrimitive, VerifyPolicy};

/// Variantes de step. El set de variantes conocidas es cerrado; `Unknown`
/// es el comodín de compatibilidad hacia adelante.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Command(CommandStep),
    Unknown(UnknownStep),
}

impl Step {
    pub fn interpolate(&mut self, interpolator: &dyn Interpolator, env: &Env) -> Result<()> {
        match self {
            Self::Command(c) => c.interpolate(interpolator, env),
            Self::Unknown(u) => u.interpolate(interpolator, env),
        }
    }
}

impl From<CommandStep> for Step {
    fn from(step: CommandStep) -> Self {
        Self::Command(step)
    }
}

impl From<UnknownStep> for Step {
    fn from(step: UnknownStep) -> Self {
        Self::Unknown(step)
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Command(c) => c.serialize(serializer),
            Self::Unknown(u) => u.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Steps(pub Vec<Step>);

impl Steps {
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.0.iter()
    }

    /// Firma cada step con la primitiva por defecto, en orden.
    pub fn sign(&mut self, pipeline_env: &Env, key: &Key) -> Result<()> {
        self.sign_with(&SignatureEngine::new(), pipeline_env, key, false)
    }

    /// Igual que `sign` pero calcula las firmas en paralelo.
    pub fn sign_parallel(&mut self, pipeline_env: &Env, key: &Key) -> Result<()> {
        self.sign_with(&SignatureEngine::new(), pipeline_env, key, true)
    }

    pub fn sign_with<P: SignaturePrimitive>(&mut self, engine: &SignatureEngine<P>, pipeline_env: &Env, key: &Key, parallel: bool) -> Result<()> {
        let commands = self.signable_steps()?;
        let signatures: Vec<Signature> = if parallel {
            commands.par_iter().map(|step| engine.sign(pipeline_env, *step, key)).collect::<Result<Vec<_>>>()?
        } else {
            commands.iter().map(|step| engine.sign(pipeline_env, *step, key)).collect::<Result<Vec<_>>>()?
        };

        let mut signatures = signatures.into_iter();
        for step in self.0.iter_mut() {
            if let (Step::Command(c), Some(sig)) = (step, signatures.next()) {
                c.signature = Some(sig);
            }
        }
        debug!("signed {} steps", self.0.len());
        Ok(())
    }

    /// Verifica todos los steps: cada uno debe ser un `CommandStep` firmado
    /// cuya firma corresponda a su contenido actual.
    pub fn verify(&self, verify_env: &Env, key: &Key, policy: &VerifyPolicy) -> Result<()> {
        self.verify_with(&SignatureEngine::new(), verify_env, key, policy)
    }

    pub fn verify_with<P: SignaturePrimitive>(&self, engine: &SignatureEngine<P>, verify_env: &Env, key: &Key, policy: &VerifyPolicy) -> Result<()> {
        for (i, step) in self.0.iter().enumerate() {
            match step {
                Step::Command(c) => {
                    let sig = c.signature.as_ref().ok_or(SigningError::MissingSignature(i))?;
                    engine.verify_with_policy(verify_env, c, sig, key, policy)?;
                }
                Step::Unknown(_) => {
                    warn!("step {i} has an unknown type and cannot be verified");
                    return Err(SigningError::SigningRefusedUnknownStepType);
                }
            }
        }
        Ok(())
    }

    pub fn interpolate(&mut self, interpolator: &dyn Interpolator, env: &Env) -> Result<()> {
        self.0.iter_mut().try_for_each(|s| s.interpolate(interpolator, env))
    }

    fn signable_steps(&self) -> Result<Vec<&CommandStep>> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, step)| match step {
                Step::Command(c) => Ok(c),
                Step::Unknown(_) => {
                    warn!("refusing to sign: step {i} has an unknown type");
                    Err(SigningError::SigningRefusedUnknownStepType)
                }
            })
            .collect()
    }
}

impl FromIterator<Step> for Steps {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
