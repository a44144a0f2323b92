use std::collections::HashMap;

use crate::env::{EffectiveEnv, Env};
use crate::errors::{Result, SigningError};

/// Nombre de campo → representación canónica (string final) de su valor.
/// El orden de inserción es irrelevante: el codificador ordena por nombre.
pub type FieldMap = HashMap<String, String>;

/// Contrato de un step que participa en la firma.
///
/// - `signed_fields` devuelve *todos* los campos que forman la identidad del
///   step en la versión actual del esquema. `sign` siempre firma este set.
/// - `values_for_fields` devuelve exactamente los campos pedidos (los que
///   registró la firma). Un nombre desconocido es un error, nunca un default:
///   sustituir en silencio permitiría agregar campos sin firmar.
///
/// Ambos reciben el entorno efectivo ya resuelto por el engine (pipeline sobre
/// `step_env`). Las implementaciones deben ser deterministas y sin efectos.
pub trait Signable {
    /// Entorno propio del step que el engine fusiona bajo el del pipeline.
    fn step_env(&self) -> Option<&Env> {
        None
    }

    fn signed_fields(&self, effective_env: &EffectiveEnv) -> Result<FieldMap>;

    fn values_for_fields(&self, effective_env: &EffectiveEnv, names: &[String]) -> Result<FieldMap>;
}

/// Extrae de `all` los campos `names`, fallando con `UnknownSignedField` ante
/// el primer nombre que no esté presente.
pub fn select_fields(mut all: FieldMap, names: &[String]) -> Result<FieldMap> {
    let mut out = FieldMap::with_capacity(names.len());
    for name in names {
        match all.remove(name) {
            Some(v) => {
                out.insert(name.clone(), v);
            }
            None if out.contains_key(name) => return Err(SigningError::DuplicateSignedField(name.clone())),
            None => return Err(SigningError::UnknownSignedField(name.clone())),
        }
    }
    Ok(out)
}
