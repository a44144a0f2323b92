//! JSON canónico mínimo para estructuras anidadas (config de plugins, env).
//!
//! Las claves de objetos se ordenan recursivamente, los strings se escapan con
//! las reglas de JSON y no se emiten espacios. Dos `Value` con el mismo
//! contenido lógico producen el mismo texto sin importar el orden de inserción
//! de sus mapas (relevante porque `serde_json` conserva el orden de inserción
//! en este workspace).

use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::Result;

pub fn to_canonical_json(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&serde_json::to_string(s)?),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, &Value> = map.iter().collect();
            out.push('{');
            for (i, (k, v)) in tree.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(k)?);
                out.push(':');
                write_value(out, v)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_sorted() {
        let a = json!({"b": {"y": 1, "x": [true, null]}, "a": "q\"uote"});
        let s = to_canonical_json(&a).expect("canonical");
        assert_eq!(s, r#"{"a":"q\"uote","b":{"x":[true,null],"y":1}}"#);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut m1 = serde_json::Map::new();
        m1.insert("z".into(), json!(1));
        m1.insert("a".into(), json!(2));
        let mut m2 = serde_json::Map::new();
        m2.insert("a".into(), json!(2));
        m2.insert("z".into(), json!(1));
        assert_eq!(to_canonical_json(&Value::Object(m1)).unwrap(), to_canonical_json(&Value::Object(m2)).unwrap());
    }
}
