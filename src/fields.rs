//! Field mappings exchanged with the gateway.
//!
//! A gateway transaction, in either direction, is a flat mapping of
//! case-sensitive string names to string values. Callers format numeric and
//! date values into strings themselves; the gateway contract has no nesting
//! and no types beyond strings.
//!
//! [`Fields`] stores entries in a [`BTreeMap`] so that iteration is always in
//! ascending name order. The canonical wire form produced by
//! [`codec::encode`](crate::codec::encode) is therefore independent of
//! insertion order, which the signing scheme depends on.

use std::collections::BTreeMap;

/// Field names that are never transmitted to the gateway as request data.
///
/// These are control fields (endpoint overrides, the merchant secret) and
/// response-only fields. Request preparation strips all of them, so a decoded
/// response replayed as a new request does not leak them back.
pub const RESERVED_FIELDS: [&str; 10] = [
    "directUrl",
    "hostedUrl",
    "merchantAlias",
    "merchantID2",
    "merchantSecret",
    "responseCode",
    "responseMessage",
    "responseStatus",
    "signature",
    "state",
];

/// An unordered name/value field mapping for a gateway request or response.
///
/// # Examples
///
/// ```
/// use paygate::Fields;
///
/// let mut request = Fields::new();
/// request.insert("action", "SALE");
/// request.insert("amount", "2199");
///
/// assert_eq!(request.get("action"), Some("SALE"));
/// assert_eq!(request.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    /// Creates an empty field mapping.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a field, returning the previous value if the name was present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Returns true if the mapping contains the named field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mapping has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over field names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Fields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Fields {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Fields {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut fields = Fields::new();
        assert!(fields.insert("action", "SALE").is_none());
        assert_eq!(fields.insert("action", "REFUND"), Some("SALE".to_owned()));
        assert_eq!(fields.get("action"), Some("REFUND"));
        assert_eq!(fields.get("missing"), None);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut fields = Fields::new();
        fields.insert("merchantID", "100");
        assert!(fields.contains("merchantID"));
        assert!(!fields.contains("merchantid"));
    }

    #[test]
    fn test_iteration_is_sorted_regardless_of_insertion_order() {
        let mut fields = Fields::new();
        fields.insert("zebra", "1");
        fields.insert("alpha", "2");
        fields.insert("mid", "3");

        let names: Vec<&str> = fields.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zebra"]);
    }

    #[test]
    fn test_from_array() {
        let fields = Fields::from([("action", "SALE"), ("amount", "2199")]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("amount"), Some("2199"));
    }

    #[test]
    fn test_reserved_fields_list_is_sorted_and_unique() {
        let mut sorted = RESERVED_FIELDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.as_slice(), RESERVED_FIELDS.as_slice());
    }
}
