//! Configuración de firma desde variables de entorno (.env).
//!
//! Variables:
//! - `PIPESIGN_ALGORITHM`: algoritmo HMAC (`HS256` por defecto).
//! - `PIPESIGN_SECRET`: secreto compartido (obligatorio).
//! - `PIPESIGN_REQUIRED_FIELDS`: lista separada por comas (`command` por defecto).
//! - `PIPESIGN_PARALLEL`: `true`/`1` para firmar los steps en paralelo.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use pipesign_core::constants::FIELD_COMMAND;
use pipesign_core::{Algorithm, Key, VerifyPolicy};
use thiserror::Error;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} no definido")]
    Missing(&'static str),
    #[error("algoritmo inválido en PIPESIGN_ALGORITHM: {0}")]
    InvalidAlgorithm(String),
    #[error("{0} requiere material asimétrico; la configuración sólo admite secretos HMAC")]
    NotSymmetric(Algorithm),
    #[error("valor inválido para {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub algorithm: Algorithm,
    pub secret: String,
    pub required_fields: Vec<String>,
    pub parallel: bool,
}

impl SigningConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria; permite
    /// testear sin tocar el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let algorithm = match lookup("PIPESIGN_ALGORITHM") {
            Some(raw) => raw.trim().parse::<Algorithm>().map_err(|_| ConfigError::InvalidAlgorithm(raw))?,
            None => Algorithm::HS256,
        };
        if !algorithm.is_deterministic() {
            return Err(ConfigError::NotSymmetric(algorithm));
        }
        let secret = lookup("PIPESIGN_SECRET").filter(|s| !s.is_empty()).ok_or(ConfigError::Missing("PIPESIGN_SECRET"))?;
        let required_fields = match lookup("PIPESIGN_REQUIRED_FIELDS") {
            Some(raw) => raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect(),
            None => vec![FIELD_COMMAND.to_string()],
        };
        let parallel = match lookup("PIPESIGN_PARALLEL").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => return Err(ConfigError::InvalidValue { var: "PIPESIGN_PARALLEL",
                                                                  value: other.to_string() }),
        };
        Ok(Self { algorithm, secret, required_fields, parallel })
    }

    pub fn key(&self) -> Key {
        Key::hmac(self.algorithm, self.secret.as_bytes().to_vec())
    }

    pub fn verify_policy(&self) -> VerifyPolicy {
        VerifyPolicy::requiring(self.required_fields.iter().cloned())
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
