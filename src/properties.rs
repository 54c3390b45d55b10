use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Name of the reserved property that carries a correlation id override.
///
/// Any property or per-call map entry whose name matches this constant
/// (case-insensitively) is diverted into correlation-id resolution and
/// excluded from the emitted property set.
pub const CORRELATION_ID_PROPERTY: &str = "CorrelationId";

/// A named string value attached to a log record beyond the standard
/// fields. Name comparison is case-insensitive everywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedProperty {
    pub name: String,
    pub value: String,
}

impl ExtendedProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ExtendedProperty { name: name.into(), value: value.into() }
    }
}

/// Case-insensitive `name -> value` map built fresh for every log call.
///
/// Keys are unique under case-insensitive comparison; the last writer for
/// a name wins and its original casing is what gets emitted. The set is
/// never shared or mutated after the record is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    // Keyed by the lowercased name; the entry keeps the writer's casing.
    entries: BTreeMap<String, ExtendedProperty>,
}

impl PropertySet {
    pub fn new() -> Self {
        PropertySet::default()
    }

    /// Upsert a property. An existing entry under the same name (any
    /// casing) is replaced, including its stored casing.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let property = ExtendedProperty::new(name, value);
        self.entries.insert(property.name.to_lowercase(), property);
    }

    /// Case-insensitive lookup of a property value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(|p| p.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtendedProperty> {
        self.entries.values()
    }

    /// Remove the reserved [`CORRELATION_ID_PROPERTY`] entry, if present,
    /// and parse its value as a correlation id.
    ///
    /// The entry is removed whether or not the value parses; a value that
    /// is not a valid GUID is discarded and yields `None`.
    pub fn take_correlation_id(&mut self) -> Option<Uuid> {
        let entry = self.entries.remove(&CORRELATION_ID_PROPERTY.to_lowercase())?;
        Uuid::parse_str(entry.value.trim()).ok()
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for property in self.entries.values() {
            map.serialize_entry(&property.name, &property.value)?;
        }
        map.end()
    }
}

impl FromIterator<ExtendedProperty> for PropertySet {
    fn from_iter<I: IntoIterator<Item = ExtendedProperty>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for property in iter {
            set.insert(property.name, property.value);
        }
        set
    }
}

/// Capability interface for per-call property objects.
///
/// A log call may carry an arbitrary caller-shaped bag of properties;
/// implementing this trait is how a type exposes that bag to the
/// pipeline. Entries returned here overwrite same-named ambient
/// properties, and an entry named [`CORRELATION_ID_PROPERTY`] is treated
/// as a correlation id override rather than a property.
pub trait ToPropertyMap {
    fn to_property_map(&self) -> Vec<ExtendedProperty>;
}

impl ToPropertyMap for Vec<ExtendedProperty> {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.clone()
    }
}

impl ToPropertyMap for [ExtendedProperty] {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.to_vec()
    }
}

impl ToPropertyMap for BTreeMap<String, String> {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.iter().map(|(k, v)| ExtendedProperty::new(k.clone(), v.clone())).collect()
    }
}

impl ToPropertyMap for HashMap<String, String> {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.iter().map(|(k, v)| ExtendedProperty::new(k.clone(), v.clone())).collect()
    }
}

impl<'a> ToPropertyMap for [(&'a str, &'a str)] {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.iter().map(|(k, v)| ExtendedProperty::new(*k, *v)).collect()
    }
}

impl<'a, const N: usize> ToPropertyMap for [(&'a str, &'a str); N] {
    fn to_property_map(&self) -> Vec<ExtendedProperty> {
        self.as_slice().to_property_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_case_insensitive_last_writer_wins() {
        let mut set = PropertySet::new();
        set.insert("Tenant", "a");
        set.insert("TENANT", "b");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("tenant"), Some("b"));
        // the surviving casing is the last writer's
        assert_eq!(set.iter().next().map(|p| p.name.as_str()), Some("TENANT"));
    }

    #[test]
    fn take_correlation_id_extracts_and_removes() {
        let id = Uuid::new_v4();
        let mut set = PropertySet::new();
        set.insert("correlationid", id.to_string());
        set.insert("other", "x");

        assert_eq!(set.take_correlation_id(), Some(id));
        assert_eq!(set.get(CORRELATION_ID_PROPERTY), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn take_correlation_id_discards_garbage() {
        let mut set = PropertySet::new();
        set.insert("CorrelationId", "not-a-guid");

        assert_eq!(set.take_correlation_id(), None);
        // removed even though unparseable
        assert!(set.is_empty());
    }

    #[test]
    fn take_correlation_id_without_entry() {
        let mut set = PropertySet::new();
        set.insert("p1", "v1");
        assert_eq!(set.take_correlation_id(), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn pair_slice_to_property_map() {
        let props = [("P1", "a"), ("P2", "b")].to_property_map();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0], ExtendedProperty::new("P1", "a"));
    }

    #[test]
    fn collects_with_case_insensitive_dedup() {
        let set: PropertySet = vec![
            ExtendedProperty::new("Host", "a"),
            ExtendedProperty::new("HOST", "b"),
            ExtendedProperty::new("Port", "8080"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("host"), Some("b"));
        assert_eq!(set.get("port"), Some("8080"));
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut set = PropertySet::new();
        set.insert("Region", "eu");
        let json = serde_json::to_value(&set).expect("serialize");
        assert_eq!(json, serde_json::json!({ "Region": "eu" }));
    }
}
