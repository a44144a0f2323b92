//! Entornos de pipeline y step.

pub mod merge;

pub use merge::{env_field_value, merge_env};

/// Mapa de variables de entorno (nivel pipeline o nivel step).
pub type Env = std::collections::HashMap<String, String>;

/// Entorno efectivo resultante de `merge_env`, ordenado por clave.
pub type EffectiveEnv = std::collections::BTreeMap<String, String>;
