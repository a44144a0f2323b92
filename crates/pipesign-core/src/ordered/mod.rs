//! Mapa que conserva el orden de inserción.
//!
//! Lo usa `UnknownStep` para guardar contenido que esta versión no entiende y
//! re-emitirlo sin cambios (incluido el orden de claves). No participa en la
//! canonicalización ni en la firma.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMap<K: Hash + Eq, V> {
    items: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self { items: IndexMap::new() }
    }

    /// Inserta o reemplaza. Reemplazar conserva la posición original.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.items.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }

    /// Aplica `f` a cada valor en orden, devolviendo un mapa nuevo con las
    /// mismas claves en la misma posición. Se detiene en el primer error.
    pub fn try_map_values<W, E>(self, mut f: impl FnMut(V) -> Result<W, E>) -> Result<OrderedMap<K, W>, E> {
        let mut items = IndexMap::with_capacity(self.items.len());
        for (k, v) in self.items {
            items.insert(k, f(v)?);
        }
        Ok(OrderedMap { items })
    }
}

impl<K: Hash + Eq, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion() {
        let mut m = OrderedMap::new();
        m.insert("zeta", 1);
        m.insert("alpha", 2);
        m.insert("mid", 3);
        m.insert("zeta", 4);
        let keys: Vec<_> = m.keys().copied().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(m.get(&"zeta"), Some(&4));
    }

    #[test]
    fn serde_keeps_declaration_order() {
        let m: OrderedMap<String, u32> = serde_json::from_str(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn try_map_values_stops_on_error() {
        let m: OrderedMap<&str, i32> = [("a", 1), ("b", -1), ("c", 2)].into_iter().collect();
        let res = m.try_map_values(|v| if v < 0 { Err("negative") } else { Ok(v * 10) });
        assert_eq!(res, Err("negative"));
    }
}
