//! `UnknownStep`: cualquier step que esta versión no sabe representar.
//!
//! Existe para que parsers más viejos preserven pipelines más nuevos. Guarda el
//! contenido literal y lo re-emite sin cambios. No implementa `Signable`, por
//! lo que no puede pasarse a `sign`; las colecciones que lo contienen se
//! niegan a firmar.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::env::Env;
use crate::errors::Result;
use crate::interpolate::Interpolator;
use crate::ordered::OrderedMap;

#[derive(Debug, Clone, PartialEq)]
pub enum UnknownContents {
    /// Step con forma de mapa; conserva el orden de claves del documento.
    Mapping(OrderedMap<String, Value>),
    /// Cualquier otra forma (string, lista, ...).
    Other(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownStep {
    pub contents: UnknownContents,
}

impl UnknownStep {
    pub fn from_map(map: OrderedMap<String, Value>) -> Self {
        Self { contents: UnknownContents::Mapping(map) }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(obj) => Self::from_map(obj.into_iter().collect()),
            other => Self { contents: UnknownContents::Other(other) },
        }
    }

    pub fn interpolate(&mut self, interpolator: &dyn Interpolator, env: &Env) -> Result<()> {
        let contents = match &self.contents {
            UnknownContents::Mapping(map) => UnknownContents::Mapping(map.clone().try_map_values(|v| interpolator.apply(env, v))?),
            UnknownContents::Other(v) => UnknownContents::Other(interpolator.apply(env, v.clone())?),
        };
        self.contents = contents;
        Ok(())
    }
}

impl Serialize for UnknownStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.contents {
            UnknownContents::Mapping(map) => map.serialize(serializer),
            UnknownContents::Other(v) => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserializes_literal_content_in_order() {
        let raw = r#"{"trigger":"deploy-pipeline","build":{"message":"go","branch":"main"},"async":true}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let step = UnknownStep::from_value(value);
        assert!(matches!(step.contents, UnknownContents::Mapping(_)));
        assert_eq!(serde_json::to_string(&step).unwrap(), raw);
    }

    #[test]
    fn scalar_content_is_kept() {
        let step = UnknownStep::from_value(Value::String("secret third thing".into()));
        assert_eq!(serde_json::to_string(&step).unwrap(), r#""secret third thing""#);
    }

    #[test]
    fn failed_interpolation_keeps_literal_content() {
        let failing = crate::interpolate::LeafInterpolator::new(|_: &Env, s: &str| {
            if s.contains("${BAD") { Err(format!("bad substitution in {s:?}")) } else { Ok(s.to_uppercase()) }
        });
        let raw = serde_json::json!({"trigger": "x", "build": "${BAD"});
        let mut step = UnknownStep::from_value(raw.clone());
        assert!(step.interpolate(&failing, &Env::new()).is_err());
        assert_eq!(serde_json::to_value(&step).unwrap(), raw);

        let mut scalar = UnknownStep::from_value(Value::String("${BAD".into()));
        assert!(scalar.interpolate(&failing, &Env::new()).is_err());
        assert_eq!(serde_json::to_value(&scalar).unwrap(), Value::String("${BAD".into()));
    }
}
