//! Constantes del núcleo de firma.
//!
//! Los nombres de campo forman parte del pre-image firmado y quedan registrados
//! en cada `Signature`. Renombrar uno invalida todas las firmas existentes que
//! lo incluyan; agregar campos nuevos es compatible hacia atrás porque
//! `verify` sólo recalcula los campos listados en la firma.

/// Texto del comando a ejecutar.
pub const FIELD_COMMAND: &str = "command";

/// Entorno efectivo (pipeline sobre step) serializado como JSON canónico.
pub const FIELD_ENV: &str = "env";

/// Lista de plugins serializada como JSON canónico.
pub const FIELD_PLUGINS: &str = "plugins";

/// Campos que produce un `CommandStep` en la versión actual del esquema.
pub const COMMAND_STEP_FIELDS: [&str; 3] = [FIELD_COMMAND, FIELD_ENV, FIELD_PLUGINS];
