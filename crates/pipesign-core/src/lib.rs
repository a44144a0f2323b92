//! pipesign-core: firma y verificación de definiciones de pipeline.
//!
//! Un step firmado puede probarse idéntico a lo que produjo el uploader
//! autorizado. El núcleo es puro (sin I/O ni estado global): claves y
//! entornos se pasan explícitamente en cada llamada.
//!
//! Módulos:
//! - `hashing`: codificación canónica de `FieldMap` y JSON canónico.
//! - `env`: política de fusión de entornos pipeline/step.
//! - `step`: contrato `Signable`, variantes de step y firmador de colección.
//! - `signature`: artefacto, engine, claves y primitivas.
//! - `ordered`: mapa con orden de inserción para contenido no reconocido.
//! - `interpolate`: seam hacia el motor de interpolación.

pub mod constants;
pub mod env;
pub mod errors;
pub mod hashing;
pub mod interpolate;
pub mod ordered;
pub mod pipeline;
pub mod signature;
pub mod step;

pub use env::{merge_env, Env};
pub use errors::{Result, SigningError};
pub use interpolate::{Interpolator, LeafInterpolator};
pub use ordered::OrderedMap;
pub use pipeline::Pipeline;
pub use signature::{sign, Algorithm, Key, KeyMaterial, RustCryptoPrimitive, Signature, SignatureEngine, SignaturePrimitive, VerifyPolicy};
pub use step::{select_fields, CommandStep, FieldMap, Plugin, Signable, Step, Steps, UnknownStep};
