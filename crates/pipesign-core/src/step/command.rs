//! `CommandStep`: ejecuta un comando en el agente. Es la variante firmable.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use super::plugin::{plugins_field_value, Plugin};
use super::signable::{select_fields, FieldMap, Signable};
use crate::constants::{COMMAND_STEP_FIELDS, FIELD_COMMAND, FIELD_ENV, FIELD_PLUGINS};
use crate::env::{env_field_value, EffectiveEnv, Env};
use crate::errors::Result;
use crate::interpolate::{apply_str, Interpolator};
use crate::signature::Signature;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandStep {
    pub command: String,
    pub env: Env,
    pub plugins: Vec<Plugin>,
    /// Descriptivo; no forma parte de la firma.
    pub label: Option<String>,
    /// Identificador del step dentro del pipeline; no forma parte de la firma.
    pub key: Option<String>,
    pub signature: Option<Signature>,
}

impl CommandStep {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(),
               ..Self::default() }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Forma documental como `Value` (ver `Serialize`).
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Sustituye variables en el comando, los valores del env y la
    /// configuración de cada plugin.
    pub fn interpolate(&mut self, interpolator: &dyn Interpolator, env: &Env) -> Result<()> {
        let command = apply_str(interpolator, env, &self.command)?;
        let mut new_env = Env::with_capacity(self.env.len());
        for (k, v) in self.env.iter() {
            new_env.insert(k.clone(), apply_str(interpolator, env, v)?);
        }
        let configs = self.plugins
                          .iter()
                          .map(|p| p.config.clone().map(|cfg| interpolator.apply(env, cfg)).transpose())
                          .collect::<Result<Vec<_>>>()?;

        // Sólo se asigna cuando todo interpoló bien.
        self.command = command;
        self.env = new_env;
        for (plugin, config) in self.plugins.iter_mut().zip(configs) {
            plugin.config = config;
        }
        Ok(())
    }
}

impl Signable for CommandStep {
    fn step_env(&self) -> Option<&Env> {
        Some(&self.env)
    }

    fn signed_fields(&self, effective_env: &EffectiveEnv) -> Result<FieldMap> {
        let mut fields = FieldMap::with_capacity(COMMAND_STEP_FIELDS.len());
        fields.insert(FIELD_COMMAND.to_string(), self.command.clone());
        fields.insert(FIELD_ENV.to_string(), env_field_value(effective_env)?);
        fields.insert(FIELD_PLUGINS.to_string(), plugins_field_value(&self.plugins)?);
        Ok(fields)
    }

    fn values_for_fields(&self, effective_env: &EffectiveEnv, names: &[String]) -> Result<FieldMap> {
        select_fields(self.signed_fields(effective_env)?, names)
    }
}

impl Serialize for CommandStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(label) = &self.label {
            map.serialize_entry("label", label)?;
        }
        if let Some(key) = &self.key {
            map.serialize_entry("key", key)?;
        }
        map.serialize_entry(FIELD_COMMAND, &self.command)?;
        if !self.env.is_empty() {
            let sorted: BTreeMap<&String, &String> = self.env.iter().collect();
            map.serialize_entry(FIELD_ENV, &sorted)?;
        }
        if !self.plugins.is_empty() {
            map.serialize_entry(FIELD_PLUGINS, &self.plugins)?;
        }
        if let Some(sig) = &self.signature {
            map.serialize_entry("signature", sig)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::merge_env;
    use crate::errors::SigningError;
    use serde_json::json;

    #[test]
    fn produces_the_three_schema_fields() {
        let step = CommandStep::new("llamas").with_env("DEPLOY", "0");
        let effective = merge_env(&Env::new(), step.step_env());
        let fields = step.signed_fields(&effective).unwrap();
        assert_eq!(fields.len(), COMMAND_STEP_FIELDS.len());
        assert!(COMMAND_STEP_FIELDS.iter().all(|f| fields.contains_key(*f)));
        assert_eq!(fields["command"], "llamas");
        assert_eq!(fields["env"], r#"{"DEPLOY":"0"}"#);
        assert_eq!(fields["plugins"], "[]");
    }

    #[test]
    fn label_is_not_signed() {
        let effective = EffectiveEnv::new();
        let a = CommandStep::new("x").signed_fields(&effective).unwrap();
        let b = CommandStep::new("x").with_label(":rocket:").signed_fields(&effective).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_field_lookup_fails() {
        let step = CommandStep::new("llamas");
        let err = step.values_for_fields(&EffectiveEnv::new(), &["command".into(), "artifact_paths".into()]).unwrap_err();
        assert_eq!(err, SigningError::UnknownSignedField("artifact_paths".into()));
    }

    #[test]
    fn document_includes_signature_as_sibling() {
        let mut step = CommandStep::new("llamas").with_env("B", "2").with_env("A", "1");
        step.signature = Some(Signature::new("HS256", vec!["command".into()], vec![1, 2, 3]));
        let v = step.to_value().unwrap();
        assert_eq!(v, json!({
            "command": "llamas",
            "env": {"A": "1", "B": "2"},
            "signature": {"algorithm": "HS256", "signed_fields": ["command"], "value": "AQID"}
        }));
    }

    #[test]
    fn failed_interpolation_leaves_step_untouched() {
        let failing = crate::interpolate::LeafInterpolator::new(|_: &Env, s: &str| {
            if s.contains("${BAD") {
                Err(format!("bad substitution in {s:?}"))
            } else {
                Ok(s.replace("${X}", "x"))
            }
        });
        let mut step = CommandStep::new("echo ${X}").with_env("A", "${X}")
                                                   .with_plugin(Plugin::new("cache#v1", Some(json!({"key": "${X}"}))))
                                                   .with_plugin(Plugin::new("docker#v5", Some(json!({"image": "${BAD"}))));
        let before = step.clone();
        let err = step.interpolate(&failing, &Env::new()).unwrap_err();
        assert!(matches!(err, SigningError::Interpolation(_)));
        assert_eq!(step, before);
    }
}
