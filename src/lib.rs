//! pipesign
//!
//! Crate raíz: re-exporta el núcleo (`pipesign-core`) y agrega la carga de
//! configuración de firma desde el entorno.

pub mod config;

pub use config::{ConfigError, SigningConfig};
pub use pipesign_core::*;

#[cfg(test)]
mod tests {
    use super::config::ConfigError;

    #[test]
    fn config_error_messages() {
        assert_eq!(ConfigError::Missing("PIPESIGN_SECRET").to_string(), "PIPESIGN_SECRET no definido");
        let e = ConfigError::InvalidValue { var: "PIPESIGN_PARALLEL", value: "maybe".into() };
        assert_eq!(e.to_string(), "valor inválido para PIPESIGN_PARALLEL: maybe");
    }
}
