use std::collections::HashMap;

use pipesign::{Algorithm, CommandStep, ConfigError, SigningConfig, SigningError, Steps};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_require_only_the_secret() {
    let cfg = SigningConfig::from_lookup(lookup(&[("PIPESIGN_SECRET", "alpacas")])).unwrap();
    assert_eq!(cfg.algorithm, Algorithm::HS256);
    assert_eq!(cfg.required_fields, ["command"]);
    assert!(!cfg.parallel);
}

#[test]
fn parses_every_variable() {
    let cfg = SigningConfig::from_lookup(lookup(&[("PIPESIGN_ALGORITHM", "HS512"),
                                                  ("PIPESIGN_SECRET", "alpacas"),
                                                  ("PIPESIGN_REQUIRED_FIELDS", "command, env ,,plugins"),
                                                  ("PIPESIGN_PARALLEL", "true")])).unwrap();
    assert_eq!(cfg.algorithm, Algorithm::HS512);
    assert_eq!(cfg.required_fields, ["command", "env", "plugins"]);
    assert!(cfg.parallel);
    assert_eq!(cfg.key().algorithm(), "HS512");
}

#[test]
fn rejects_bad_values() {
    assert_eq!(SigningConfig::from_lookup(lookup(&[])).unwrap_err(), ConfigError::Missing("PIPESIGN_SECRET"));
    assert_eq!(SigningConfig::from_lookup(lookup(&[("PIPESIGN_SECRET", "x"), ("PIPESIGN_ALGORITHM", "rot13")])).unwrap_err(),
               ConfigError::InvalidAlgorithm("rot13".into()));
    assert_eq!(SigningConfig::from_lookup(lookup(&[("PIPESIGN_SECRET", "x"), ("PIPESIGN_ALGORITHM", "EdDSA")])).unwrap_err(),
               ConfigError::NotSymmetric(Algorithm::EdDSA));
    assert!(matches!(SigningConfig::from_lookup(lookup(&[("PIPESIGN_SECRET", "x"), ("PIPESIGN_PARALLEL", "maybe")])),
                     Err(ConfigError::InvalidValue { var: "PIPESIGN_PARALLEL", .. })));
}

#[test]
fn configured_policy_is_enforced() {
    let cfg = SigningConfig::from_lookup(lookup(&[("PIPESIGN_SECRET", "alpacas"), ("PIPESIGN_REQUIRED_FIELDS", "command,secrets")])).unwrap();
    let key = cfg.key();
    let env = HashMap::new();
    let mut steps = Steps::new(vec![CommandStep::new("llamas").into()]);
    steps.sign(&env, &key).unwrap();
    let err = steps.verify(&env, &key, &cfg.verify_policy()).unwrap_err();
    assert_eq!(err, SigningError::MissingRequiredField("secrets".into()));
}
