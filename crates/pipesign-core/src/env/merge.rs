//! Política de fusión de entornos pipeline/step.
//!
//! El backend de ejecución construye el entorno del proceso aplicando el env
//! del pipeline sobre el env del step, así que la firma cubre exactamente ese
//! resultado: ante una clave repetida gana el valor del pipeline.

use serde_json::Value;

use super::{EffectiveEnv, Env};
use crate::errors::Result;
use crate::hashing::to_canonical_json;

/// Fusiona `step` y `pipeline` (el pipeline tiene precedencia). El resultado
/// queda ordenado por clave.
pub fn merge_env(pipeline: &Env, step: Option<&Env>) -> EffectiveEnv {
    let mut out: EffectiveEnv = step.map(|s| s.iter().map(|(k, v)| (k.clone(), v.clone())).collect()).unwrap_or_default();
    for (k, v) in pipeline.iter() {
        out.insert(k.clone(), v.clone());
    }
    out
}

/// Valor del campo firmado `env`: objeto JSON canónico del entorno efectivo.
pub fn env_field_value(effective: &EffectiveEnv) -> Result<String> {
    let obj: serde_json::Map<String, Value> = effective.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect();
    to_canonical_json(&Value::Object(obj))
}
