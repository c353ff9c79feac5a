// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the Flex SDK Net library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Parameter values and the value serializer.
//!
//! A [Value] is one of the kinds the API knows how to read from a request parameter. Typed callers
//! build values directly (every supported Rust type converts with [From]); loosely typed callers
//! go through [Value::classify], which is the only place an unsupported value can be rejected.

use crate::error::{json_type_name, SerializeError, UnsupportedTypeSnafu};
use crate::types::{fmt_number, LatLng, LatLngBounds, Uuid};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter, Write};
use tracing::{event, Level};

/// Separator placed between the elements of a serialized sequence.
pub const SEQUENCE_SEPARATOR: char = ',';

/// A request parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Uuid(Uuid),
    Bounds(LatLngBounds),
    Point(LatLng),
    Sequence(Vec<Value>),
    Date(DateTime<Utc>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// The result of serializing a single [Value].
///
/// Structured values become text. Primitives come back as they went in; turning them into their
/// final string is left to whichever encoder consumes them, through the [Display] instance.
#[derive(Clone, Debug, PartialEq)]
pub enum Serialized<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Serialized<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Serialized::Null)
    }
}

impl Display for Serialized<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Serialized::Text(s) => f.write_str(s),
            Serialized::Int(n) => write!(f, "{}", n),
            Serialized::Float(n) => fmt_number(*n, f),
            Serialized::Bool(b) => write!(f, "{}", b),
            Serialized::Null => Ok(()),
        }
    }
}

/// Serialize one value into the form the API reads from a query parameter.
pub fn serialize_value(value: &Value) -> Serialized<'_> {
    match value {
        Value::Uuid(id) => Serialized::Text(Cow::Borrowed(id.as_str())),
        Value::Bounds(bounds) => Serialized::Text(Cow::Owned(bounds_string(bounds))),
        Value::Point(point) => Serialized::Text(Cow::Owned(point_string(point))),
        Value::Sequence(items) => Serialized::Text(Cow::Owned(sequence_string(items))),
        Value::Date(date) => Serialized::Text(Cow::Owned(date_string(date))),
        Value::Text(s) => Serialized::Text(Cow::Borrowed(s)),
        Value::Int(n) => Serialized::Int(*n),
        Value::Float(n) => Serialized::Float(*n),
        Value::Bool(b) => Serialized::Bool(*b),
        Value::Null => Serialized::Null,
    }
}

fn point_string(point: &LatLng) -> String {
    let mut s = String::new();
    write_point(point, &mut s);
    s
}

fn bounds_string(bounds: &LatLngBounds) -> String {
    let mut s = String::new();
    write_point(&bounds.ne, &mut s);
    s.push(',');
    write_point(&bounds.sw, &mut s);
    s
}

fn write_point(point: &LatLng, s: &mut String) {
    // Writing into a String cannot fail.
    let _ = fmt_number(point.lat, s);
    s.push(',');
    let _ = fmt_number(point.lng, s);
}

// Nested sequences flatten into one comma separated list.
fn sequence_string(items: &[Value]) -> String {
    let mut s = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            s.push(SEQUENCE_SEPARATOR);
        }
        let _ = write!(s, "{}", serialize_value(item));
    }
    s
}

// Years outside 0000-9999 take the expanded form: a sign and six digits.
fn date_string(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!(
            "{}{:06}{}",
            sign,
            year.abs(),
            date.format("-%m-%dT%H:%M:%S%.3fZ")
        )
    }
}

const SDK_TYPE: &str = "_sdkType";

impl Value {
    /// Convert loosely typed input into a [Value].
    ///
    /// Objects tagged with an `_sdkType` field are decoded according to the tag. Untagged objects
    /// are recognized by their shape, in the same priority order the serializer dispatches on: an
    /// object with a `uuid` is an identifier, one with `ne` and `sw` corners is a bounding box and
    /// one with `lat` and `lng` is a point. Anything else fails with
    /// [SerializeError::UnsupportedType], and a failure anywhere inside a sequence fails the whole
    /// value.
    pub fn classify(json: serde_json::Value) -> Result<Self, SerializeError> {
        use serde_json::Value as Json;
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => Ok(match n.as_i64() {
                Some(n) => Value::Int(n),
                // Every JSON number without an i64 representation has an f64 one.
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Json::String(s) => Ok(Value::Text(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::classify)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            obj @ Json::Object(_) => classify_object(obj),
        }
    }
}

fn classify_object(json: serde_json::Value) -> Result<Value, SerializeError> {
    let tag = json.get(SDK_TYPE).cloned();
    let classified = match tag {
        Some(serde_json::Value::String(tag)) => {
            let decoded = match tag.as_str() {
                "UUID" => decode::<Uuid>(&json).map(Value::Uuid),
                "LatLngBounds" => decode::<LatLngBounds>(&json).map(Value::Bounds),
                "LatLng" => decode::<LatLng>(&json).map(Value::Point),
                _ => None,
            };
            decoded.ok_or(tag)
        }
        Some(tag) => Err(json_type_name(&tag).to_string()),
        None => shape_of(&json).ok_or_else(|| json_type_name(&json).to_string()),
    };
    classified.or_else(|type_name| {
        event!(
            Level::WARN,
            "rejecting parameter value of type {}: {}",
            type_name,
            json
        );
        UnsupportedTypeSnafu { type_name }.fail()
    })
}

fn shape_of(json: &serde_json::Value) -> Option<Value> {
    let has = |key: &str| json.get(key).is_some();
    if has("uuid") {
        decode::<Uuid>(json).map(Value::Uuid)
    } else if has("ne") && has("sw") {
        decode::<LatLngBounds>(json).map(Value::Bounds)
    } else if has("lat") && has("lng") {
        decode::<LatLng>(json).map(Value::Point)
    } else {
        None
    }
}

fn decode<T: for<'de> Deserialize<'de>>(json: &serde_json::Value) -> Option<T> {
    T::deserialize(json).ok()
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::classify(json).map_err(serde::de::Error::custom)
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Uuid(id)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Uuid(id.into())
    }
}

impl From<LatLngBounds> for Value {
    fn from(bounds: LatLngBounds) -> Self {
        Value::Bounds(bounds)
    }
}

impl From<LatLng> for Value {
    fn from(point: LatLng) -> Self {
        Value::Point(point)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
