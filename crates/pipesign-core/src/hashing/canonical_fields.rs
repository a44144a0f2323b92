//! Codificador canónico de `FieldMap`.
//!
//! Formato: los nombres se ordenan lexicográficamente (por bytes) y por cada
//! campo se emite `<u32 LE len><nombre><u32 LE len><valor>`. El prefijo de
//! longitud hace que la codificación sea auto-delimitada: ninguna partición
//! distinta de los mismos bytes en (nombre, valor) produce la misma salida.

use std::collections::BTreeMap;

use crate::errors::{Result, SigningError};
use crate::step::FieldMap;

/// Serializa `fields` a la secuencia de bytes que se firma.
pub fn canonical_bytes(fields: &FieldMap) -> Result<Vec<u8>> {
    let sorted: BTreeMap<&str, &str> = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let capacity = sorted.iter().map(|(k, v)| 8 + k.len() + v.len()).sum();
    let mut out = Vec::with_capacity(capacity);
    for (name, value) in sorted {
        write_length_prefixed(&mut out, name.as_bytes())?;
        write_length_prefixed(&mut out, value.as_bytes())?;
    }
    Ok(out)
}

fn write_length_prefixed(out: &mut Vec<u8>, piece: &[u8]) -> Result<()> {
    let len = u32::try_from(piece.len()).map_err(|_| SigningError::FieldTooLarge(piece.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(piece);
    Ok(())
}
