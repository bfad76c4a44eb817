//! Raw sidebar descriptors.
//!
//! A [`Descriptor`] is the undecoded `name -> items` mapping read from a
//! sidebars file. Entries keep their file order, and repeated names are kept
//! rather than overwritten so that duplicates can be reported. A sidebar
//! written as an object of shorthand categories keeps its key order, and a
//! repeated category label is rejected.

use std::fmt;
use std::path::Path;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Ordered `sidebar name -> raw items` entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Descriptor {
    entries: Vec<(String, Value)>,
}

impl Descriptor {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sidebar entry.
    pub fn push(&mut self, name: impl Into<String>, items: Value) {
        self.entries.push((name.into(), items));
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Sidebar names in declaration order, including repeats.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Parse a JSON descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON object.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Parse a YAML descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a YAML mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Descriptor {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, items)| (name.into(), items))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DescriptorVisitor;

        impl<'de> Visitor<'de> for DescriptorVisitor {
            type Value = Descriptor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of sidebar names to sidebar items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Descriptor, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(name) = map.next_key::<String>()? {
                    let items = map.next_value_seed(SidebarItems)?;
                    entries.push((name, items));
                }
                Ok(Descriptor { entries })
            }
        }

        deserializer.deserialize_map(DescriptorVisitor)
    }
}

/// Raw items of one sidebar entry.
struct SidebarItems;

impl<'de> DeserializeSeed<'de> for SidebarItems {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for SidebarItems {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of sidebar items or a mapping of category labels to items")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut categories = Map::new();
        while let Some(label) = map.next_key::<String>()? {
            if categories.contains_key(&label) {
                return Err(de::Error::custom(format!(
                    "duplicate shorthand category `{label}`"
                )));
            }
            let items = map.next_value::<Value>()?;
            categories.insert(label, items);
        }
        Ok(Value::Object(categories))
    }

    // Scalars are kept so that parsing can report them against the sidebar.

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }
}

/// Sidebars file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DescriptorFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }
}
