//! Toolkit-independent form values.
//!
//! [`FormData`] mirrors what a submitted HTML form carries: every field is a name with
//! one or more string values, and absent fields simply have no entry. Controllers read
//! from it the same way regardless of where the values came from (a TOML file, a
//! terminal prompt, a test).

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Replaces every value under `name` with a single one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.entries.push((name, value.into()));
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(k, _)| k != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Loads form values from a flat TOML table.
    ///
    /// Strings are kept verbatim, booleans and numbers are stored in their textual form
    /// (`true`, `21`, `12.5`) exactly as an HTML input would submit them. Arrays add one
    /// value per element. Nested tables are rejected.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse form values: {e}")))?;

        let mut form = FormData::new();
        for (name, value) in table {
            match value {
                toml::Value::Array(items) => {
                    for item in items {
                        form.append(name.clone(), scalar_to_string(&name, item)?);
                    }
                }
                other => form.append(name.clone(), scalar_to_string(&name, other)?),
            }
        }
        Ok(form)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

fn scalar_to_string(name: &str, value: toml::Value) -> AppResult<String> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(AppError::InvalidInput(format!(
            "Field '{name}' must be a plain value"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_value() {
        let mut form = FormData::new();
        form.append("a", "1");
        form.append("a", "2");
        assert_eq!(form.get("a"), Some("1"));
        assert_eq!(form.get_all("a"), vec!["1", "2"]);
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn set_replaces_all_values() {
        let mut form: FormData = [("a", "1"), ("a", "2"), ("b", "x")].into_iter().collect();
        form.set("a", "3");
        assert_eq!(form.get_all("a"), vec!["3"]);
        assert_eq!(form.get("b"), Some("x"));
    }

    #[test]
    fn toml_scalars_become_submitted_text() {
        let form = FormData::from_toml_str(
            r#"
            objeto_contrato = "Digitalización"
            trata_datos = true
            iva = 21
            pbl_sin_iva = 1500.5
            fecha = 2025-03-01
            "#,
        )
        .unwrap();

        assert_eq!(form.get("objeto_contrato"), Some("Digitalización"));
        assert_eq!(form.get("trata_datos"), Some("true"));
        assert_eq!(form.get("iva"), Some("21"));
        assert_eq!(form.get("pbl_sin_iva"), Some("1500.5"));
        assert_eq!(form.get("fecha"), Some("2025-03-01"));
    }

    #[test]
    fn nested_table_is_rejected() {
        let result = FormData::from_toml_str(
            r#"
            [nested]
            key = "value"
            "#,
        );
        assert!(result.is_err());
    }
}
