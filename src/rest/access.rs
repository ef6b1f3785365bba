//! Field-accessible containers for decoded data.
//!
//! [`AccessDict`] is an ordered mapping with two accessor
//! surfaces over one store: indexing (`dict["name"]`, which panics on
//! absent fields like `HashMap`) and the fallible methods of
//! [`FieldAccess`] (`dict.field("name")?`, `dict.str_field("name")?`).
//! [`AccessList`] is the sequence counterpart, with key lookup over the
//! resources it contains.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::{FieldAccess, MixcloudError};
//!
//! let user = mixcloud.get("spartacus").await?;
//! assert_eq!(user["city"], "London");
//! assert_eq!(user.str_field("city")?, "London");
//! assert!(matches!(user.field("nope"), Err(MixcloudError::NoSuchField { .. })));
//! ```

use std::ops::Index;

use chrono::{DateTime, Utc};

use crate::clients::api::Mixcloud;
use crate::rest::errors::MixcloudError;
use crate::rest::path::normalize_key;
use crate::rest::resource::Resource;
use crate::rest::value::Value;

/// Fallible, typed field access shared by [`AccessDict`] and [`Resource`].
///
/// Absent fields yield [`MixcloudError::NoSuchField`]; fields of another
/// type yield [`MixcloudError::WrongType`].
pub trait FieldAccess {
    /// Returns the value of `name`, if present.
    fn lookup(&self, name: &str) -> Option<&Value>;

    /// Returns `true` if a missing field may only be missing because the
    /// owner was partially loaded.
    fn is_partial(&self) -> bool {
        false
    }

    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NoSuchField`] if the field is absent.
    fn field(&self, name: &str) -> Result<&Value, MixcloudError> {
        self.lookup(name).ok_or_else(|| MixcloudError::NoSuchField {
            field: name.to_string(),
            partial: self.is_partial(),
        })
    }

    /// Returns the string value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn str_field(&self, name: &str) -> Result<&str, MixcloudError> {
        typed(self.field(name)?, name, "string", Value::as_str)
    }

    /// Returns the integer value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn i64_field(&self, name: &str) -> Result<i64, MixcloudError> {
        typed(self.field(name)?, name, "integer", Value::as_i64)
    }

    /// Returns the boolean value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn bool_field(&self, name: &str) -> Result<bool, MixcloudError> {
        typed(self.field(name)?, name, "bool", Value::as_bool)
    }

    /// Returns the datetime value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn datetime_field(&self, name: &str) -> Result<&DateTime<Utc>, MixcloudError> {
        typed(self.field(name)?, name, "datetime", Value::as_datetime)
    }

    /// Returns the mapping value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn dict_field(&self, name: &str) -> Result<&AccessDict, MixcloudError> {
        typed(self.field(name)?, name, "dict", Value::as_dict)
    }

    /// Returns the sequence value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn list_field(&self, name: &str) -> Result<&AccessList, MixcloudError> {
        typed(self.field(name)?, name, "list", Value::as_list)
    }

    /// Returns the embedded resource value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    fn resource_field(&self, name: &str) -> Result<&Resource, MixcloudError> {
        typed(self.field(name)?, name, "resource", Value::as_resource)
    }
}

fn typed<'a, T>(
    value: &'a Value,
    name: &str,
    expected: &'static str,
    cast: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, MixcloudError> {
    cast(value).ok_or_else(|| MixcloudError::WrongType {
        field: name.to_string(),
        expected,
    })
}

/// A mapping of field names to [`Value`]s, kept in decoding order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessDict {
    entries: Vec<(String, Value)>,
}

impl AccessDict {
    /// Wraps a decoded JSON object, recursively.
    pub(crate) fn wrap(map: serde_json::Map<String, serde_json::Value>, client: &Mixcloud) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (k, Value::wrap(v, client)))
                .collect(),
        }
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Returns `true` if the mapping has a field `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over field names, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(name, value)` pairs, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the mapping back to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl FieldAccess for AccessDict {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Index<&str> for AccessDict {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the field is absent. Use [`FieldAccess::field`] to handle
    /// absence.
    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no such field '{name}'"),
        }
    }
}

impl<'a> IntoIterator for &'a AccessDict {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// An ordered sequence of [`Value`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessList {
    items: Vec<Value>,
}

impl AccessList {
    /// Wraps a decoded JSON array, recursively.
    pub(crate) fn wrap(items: Vec<serde_json::Value>, client: &Mixcloud) -> Self {
        Self {
            items: items.into_iter().map(|v| Value::wrap(v, client)).collect(),
        }
    }

    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Returns the first contained resource whose key is `key`.
    ///
    /// Missing leading or trailing slashes of `key` are added before
    /// comparing. When several resources share a key, the first one wins.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Resource> {
        let key = normalize_key(key);
        self.items
            .iter()
            .filter_map(Value::as_resource)
            .find(|r| r.key() == key)
    }

    /// Iterates over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the sequence back to a JSON array.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(Value::to_json).collect())
    }
}

impl Index<usize> for AccessList {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a AccessList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
