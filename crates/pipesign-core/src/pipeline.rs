//! Pipeline: env a nivel pipeline más la lista de steps.

use serde::Serialize;

use crate::env::Env;
use crate::errors::Result;
use crate::interpolate::Interpolator;
use crate::signature::{Key, VerifyPolicy};
use crate::step::Steps;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pipeline {
    #[serde(skip_serializing_if = "Env::is_empty", serialize_with = "sorted_env")]
    pub env: Env,
    pub steps: Steps,
}

fn sorted_env<S: serde::Serializer>(env: &Env, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let sorted: std::collections::BTreeMap<&String, &String> = env.iter().collect();
    sorted.serialize(serializer)
}

impl Pipeline {
    pub fn new(env: Env, steps: Steps) -> Self {
        Self { env, steps }
    }

    /// Interpola todos los steps con el env del pipeline. Debe llamarse antes
    /// de `sign`.
    pub fn interpolate(&mut self, interpolator: &dyn Interpolator) -> Result<()> {
        self.steps.interpolate(interpolator, &self.env)
    }

    /// Firma los steps usando el env del pipeline como capa de precedencia.
    pub fn sign(&mut self, key: &Key) -> Result<()> {
        self.steps.sign(&self.env, key)
    }

    pub fn sign_parallel(&mut self, key: &Key) -> Result<()> {
        self.steps.sign_parallel(&self.env, key)
    }

    pub fn verify(&self, key: &Key, policy: &VerifyPolicy) -> Result<()> {
        self.steps.verify(&self.env, key, policy)
    }
}
