//! Seam hacia el motor de interpolación de variables (`${VAR}`).
//!
//! El núcleo no implementa la sintaxis de sustitución: la consume como
//! `apply(env, árbol) -> árbol`. La interpolación debe correr antes de firmar,
//! porque la firma cubre los valores que el agente va a ejecutar.

use serde_json::Value;

use crate::env::Env;
use crate::errors::{Result, SigningError};

/// Aplica sustituciones a un árbol de valores usando `env`.
pub trait Interpolator {
    fn apply(&self, env: &Env, tree: Value) -> Result<Value>;
}

/// Adaptador que recorre el árbol y aplica una función de sustitución a cada
/// hoja string. Las claves de objetos no se tocan y el orden se conserva.
pub struct LeafInterpolator<F> {
    substitute: F,
}

impl<F> LeafInterpolator<F>
    where F: Fn(&Env, &str) -> std::result::Result<String, String>
{
    pub fn new(substitute: F) -> Self {
        Self { substitute }
    }

    fn walk(&self, env: &Env, value: Value) -> Result<Value> {
        match value {
            Value::String(s) => (self.substitute)(env, &s).map(Value::String).map_err(SigningError::Interpolation),
            Value::Array(items) => items.into_iter().map(|v| self.walk(env, v)).collect::<Result<Vec<_>>>().map(Value::Array),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k, self.walk(env, v)?);
                }
                Ok(Value::Object(out))
            }
            other => Ok(other),
        }
    }
}

impl<F> Interpolator for LeafInterpolator<F>
    where F: Fn(&Env, &str) -> std::result::Result<String, String>
{
    fn apply(&self, env: &Env, tree: Value) -> Result<Value> {
        self.walk(env, tree)
    }
}

/// Interpola un string suelto a través del árbol genérico.
pub fn apply_str(interpolator: &dyn Interpolator, env: &Env, input: &str) -> Result<String> {
    match interpolator.apply(env, Value::String(input.to_string()))? {
        Value::String(s) => Ok(s),
        other => Err(SigningError::Interpolation(format!("expected string after interpolation, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dollar() -> LeafInterpolator<impl Fn(&Env, &str) -> std::result::Result<String, String>> {
        LeafInterpolator::new(|env: &Env, s: &str| {
            let mut out = s.to_string();
            for (k, v) in env {
                out = out.replace(&format!("${{{k}}}"), v);
            }
            Ok(out)
        })
    }

    #[test]
    fn replaces_leaves_and_keeps_key_order() {
        let env: Env = [("WHO".to_string(), "llama".to_string())].into_iter().collect();
        let tree = json!({"z": "hi ${WHO}", "a": ["${WHO}", 3, null], "${WHO}": true});
        let out = dollar().apply(&env, tree).unwrap();
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"z":"hi llama","a":["llama",3,null],"${WHO}":true}"#);
    }

    #[test]
    fn errors_are_wrapped() {
        let failing = LeafInterpolator::new(|_: &Env, _: &str| Err("unterminated".to_string()));
        let err = apply_str(&failing, &Env::new(), "${OOPS").unwrap_err();
        assert_eq!(err, SigningError::Interpolation("unterminated".into()));
    }
}
