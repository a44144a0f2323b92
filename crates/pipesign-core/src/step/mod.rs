//! Steps de pipeline.
//!
//! Cada variante conocida implementa `Signable` y `Serialize`; la variante
//! comodín (`UnknownStep`) sólo `Serialize`, de modo que "¿se puede firmar?"
//! se decide en compilación:
//! - `Signable` / `FieldMap`: contrato de firma.
//! - `CommandStep` + `Plugin`: step de comando.
//! - `UnknownStep`: contenido no reconocido, preservado literal.
//! - `Step` / `Steps`: variantes y colección con su firmador.

pub mod collection;
pub mod command;
pub mod plugin;
pub mod signable;
pub mod unknown;

pub use collection::{Step, Steps};
pub use command::CommandStep;
pub use plugin::Plugin;
pub use signable::{select_fields, FieldMap, Signable};
pub use unknown::{UnknownContents, UnknownStep};
