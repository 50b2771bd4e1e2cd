//! Minimal ordered key/value sidecar store.
//!
//! Stands in for the host toolkit's `Sdb`: the parser deposits a handful of
//! `java_class.*` keys into it as it builds the model, so that other parts
//! of a toolkit can query facts about the file without re-parsing it.

use std::fmt;

#[derive(Debug, Clone)]
pub enum SdbValue {
    Num(u64),
    Str(String),
}

impl fmt::Display for SdbValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdbValue::Num(n) => write!(f, "{}", n),
            SdbValue::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Default)]
pub struct Sdb {
    keys: Vec<String>,
    entries: std::collections::HashMap<String, SdbValue>,
}

impl Sdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num(&mut self, key: &str, value: u64) {
        self.insert(key, SdbValue::Num(value));
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.insert(key, SdbValue::Str(value.into()));
    }

    fn insert(&mut self, key: &str, value: SdbValue) {
        if !self.entries.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&SdbValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut sdb = Sdb::new();
        sdb.set_num("java_class.offset", 0);
        sdb.set_str("java_class.version", "Java SE 1.8");
        sdb.set_num("java_class.offset", 42); // overwrite, should not reorder
        assert_eq!(sdb.keys().collect::<Vec<_>>(), vec!["java_class.offset", "java_class.version"]);
        assert!(matches!(sdb.get("java_class.offset"), Some(SdbValue::Num(42))));
    }
}
