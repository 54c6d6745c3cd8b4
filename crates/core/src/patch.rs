//! Tri-state wrapper for fields of a partial update.
//!
//! A JSON body distinguishes three cases per key that `Option<T>` cannot:
//! the key is missing, the key is `null`, or the key carries a value.
//! Declare update fields as `#[serde(default)] field: Patch<T>` so a
//! missing key deserialises to [`Patch::Absent`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not supplied: leave the column untouched.
    Absent,
    /// Key supplied as `null`.
    Null,
    /// Key supplied with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// The carried value, if any. `Absent` and `Null` both yield `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Absent | Patch::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        year: Patch<i32>,
        #[serde(default)]
        ids: Patch<Vec<i64>>,
    }

    #[test]
    fn missing_key_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.year, Patch::Absent);
        assert_eq!(body.ids, Patch::Absent);
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(body.year, Patch::Null);
        assert!(body.year.is_present());
        assert_eq!(body.year.value(), None);
    }

    #[test]
    fn value_is_carried() {
        let body: Body = serde_json::from_str(r#"{"year": 1999, "ids": []}"#).unwrap();
        assert_eq!(body.year, Patch::Value(1999));
        assert_eq!(body.ids, Patch::Value(vec![]));
        assert!(!body.ids.is_absent());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = serde_json::from_str::<Body>(r#"{"year": "nineteen"}"#);
        assert!(result.is_err());
    }
}
