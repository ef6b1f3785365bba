//! The dynamic value model for decoded API responses.
//!
//! Every response body is wrapped eagerly into a tree of [`Value`]s:
//!
//! - JSON objects become [`AccessDict`]s, or non-full [`Resource`]s when
//!   they carry a `"type"` field
//! - JSON arrays become [`AccessList`]s
//! - strings in RFC 3339 form become UTC datetimes
//!
//! No other transformation happens. Values can be turned back into JSON
//! with [`Value::to_json`].

use std::fmt;
use std::ops::Index;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::clients::api::Mixcloud;
use crate::rest::access::{AccessDict, AccessList};
use crate::rest::datetime::parse_rfc3339;
use crate::rest::resource::Resource;

/// A decoded, wrapped JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept in its JSON representation.
    Number(serde_json::Number),
    /// A string that is not a datetime.
    String(String),
    /// A datetime decoded from an RFC 3339 string.
    DateTime(DateTime<Utc>),
    /// A nested mapping without a `"type"` field.
    Dict(AccessDict),
    /// A nested sequence.
    List(AccessList),
    /// A nested mapping with a `"type"` field, i.e. an embedded resource.
    Resource(Box<Resource>),
}

impl Value {
    /// Wraps a decoded JSON value, recursively.
    pub(crate) fn wrap(json: serde_json::Value, client: &Mixcloud) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => {
                parse_rfc3339(&s).map_or(Self::String(s), Self::DateTime)
            }
            serde_json::Value::Array(items) => Self::List(AccessList::wrap(items, client)),
            serde_json::Value::Object(map) => {
                if map.contains_key("type") {
                    Self::Resource(Box::new(Resource::from_map(map, false, client)))
                } else {
                    Self::Dict(AccessDict::wrap(map, client))
                }
            }
        }
    }

    /// Returns a short name of this value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::Dict(_) => "dict",
            Self::List(_) => "list",
            Self::Resource(_) => "resource",
        }
    }

    /// Returns `true` for `Value::Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number as `i64`, if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `u64`, if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the datetime, if this is a datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a plain mapping.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&AccessDict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the sequence, if this is a sequence.
    #[must_use]
    pub const fn as_list(&self) -> Option<&AccessList> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the embedded resource, if this is one.
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Looks up `name` if this value is a mapping or a resource.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Dict(d) => d.get(name),
            Self::Resource(r) => r.get(name),
            _ => None,
        }
    }

    /// Converts this value back to JSON. Datetimes become RFC 3339 strings.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::DateTime(dt) => {
                serde_json::Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Dict(d) => d.to_json(),
            Self::List(l) => l.to_json(),
            Self::Resource(r) => r.data().to_json(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Resource(r) => write!(f, "{r}"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl Index<&str> for Value {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if this value is not a mapping or resource, or lacks `name`.
    fn index(&self, name: &str) -> &Self::Output {
        match self {
            Self::Dict(d) => &d[name],
            Self::Resource(r) => &r[name],
            other => panic!("cannot index {} value by '{name}'", other.type_name()),
        }
    }
}

impl Index<usize> for Value {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if this value is not a sequence or `index` is out of bounds.
    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::List(l) => &l[index],
            other => panic!("cannot index {} value by position", other.type_name()),
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
