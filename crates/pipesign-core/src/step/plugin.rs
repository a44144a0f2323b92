//! Plugins de un `CommandStep`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::Result;
use crate::hashing::to_canonical_json;

/// Referencia a un plugin (`nombre#versión`) con su configuración opcional.
#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    pub source: String,
    pub config: Option<Value>,
}

impl Plugin {
    pub fn new(source: impl Into<String>, config: Option<Value>) -> Self {
        Self { source: source.into(), config }
    }

    /// Forma documental: `{ "<source>": <config | null> }`.
    pub fn to_value(&self) -> Value {
        let mut m = serde_json::Map::with_capacity(1);
        m.insert(self.source.clone(), self.config.clone().unwrap_or(Value::Null));
        Value::Object(m)
    }
}

impl Serialize for Plugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.source, &self.config)?;
        map.end()
    }
}

/// Valor del campo firmado `plugins`: la lista en orden de declaración, con
/// la configuración de cada plugin en JSON canónico. El orden de la lista es
/// significativo (los plugins se ejecutan en ese orden); el de las claves de
/// configuración no.
pub fn plugins_field_value(plugins: &[Plugin]) -> Result<String> {
    let list = Value::Array(plugins.iter().map(Plugin::to_value).collect());
    to_canonical_json(&list)
}
