//! Canonicalización: bytes firmables de un `FieldMap` y JSON canónico para
//! valores anidados.

pub mod canonical_fields;
pub mod canonical_json;

pub use canonical_fields::canonical_bytes;
pub use canonical_json::to_canonical_json;
