use crate::constants::*;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// What happens to a generated document once the backend returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandoffMode {
    /// Persist the document for the editor and point the user at it.
    #[default]
    Redirect,
    /// Show the document directly, without touching the handoff store.
    Inline,
}

impl HandoffMode {
    /// Returns a human-readable name for the handoff mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Redirect => "Redirect to editor",
            Self::Inline => "Inline",
        }
    }
}

impl From<&str> for HandoffMode {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_lowercase();

        // Anything that is not an inline alias falls back to the editor handoff.
        if INLINE_ALIASES.contains(&lower.as_str()) {
            Self::Inline
        } else {
            Self::Redirect
        }
    }
}

/// String-keyed map that keeps insertion order on the wire.
///
/// Section order matters to both backends (the technical service builds its index by
/// walking the answers in order), so JSON objects are read and written in the order
/// their keys appear. Inserting an existing key replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handoff_mode_aliases() {
        assert_eq!(HandoffMode::from("inline"), HandoffMode::Inline);
        assert_eq!(HandoffMode::from("print"), HandoffMode::Inline);
        assert_eq!(HandoffMode::from("redirect"), HandoffMode::Redirect);
        assert_eq!(HandoffMode::from("Editor"), HandoffMode::Redirect);
    }

    #[test]
    fn test_handoff_mode_unknown_defaults_to_redirect() {
        assert_eq!(HandoffMode::default(), HandoffMode::Redirect);
        assert_eq!(HandoffMode::from("   "), HandoffMode::Redirect);
        assert_eq!(HandoffMode::from("popup"), HandoffMode::Redirect);
    }

    #[test]
    fn test_ordered_map_keeps_json_key_order() {
        let map: OrderedMap<String> =
            serde_json::from_str(r#"{"zeta":"1","alpha":"2","mid":"3"}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2","mid":"3"}"#);
    }

    #[test]
    fn test_ordered_map_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.keys().next(), Some("a"));
    }
}
