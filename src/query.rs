// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the Flex SDK Net library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Strings built from whole parameter mappings.
//!
//! Two formats are supported: URL query strings (`name=value&...`, percent-encoded) and attribute
//! strings (`name:value;...`, unescaped, rejecting delimiters that would split them), which the API accepts as the value of parameters
//! that carry a small structured object, such as an image variant definition.

use crate::error::{InvalidArgumentSnafu, SerializeError};
use crate::params::Params;
use crate::value::{serialize_value, Serialized, Value};
use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use tracing::{event, Level};

/// Characters percent-encoded in query string names and values.
///
/// Everything except ASCII alphanumerics and `-_.!~*'()`, which is the set a browser's
/// `encodeURIComponent` leaves alone. Commas are encoded, so serialized sequences and coordinates
/// arrive as `%2C`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What to do with parameters whose value is null.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullParams {
    /// Keep the parameter with an empty value (`name=` or `name:`).
    Empty,
    /// Leave the parameter out.
    Omit,
}

impl Default for NullParams {
    fn default() -> Self {
        Self::Empty
    }
}

/// Options for building strings out of parameter mappings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub null_params: NullParams,
}

impl QueryConfig {
    /// Build a URL query string, without the leading `?`.
    pub fn query_string(&self, params: &Params) -> String {
        self.segments(params)
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, QUERY_ENCODE_SET),
                    utf8_percent_encode(&value.to_string(), QUERY_ENCODE_SET),
                )
            })
            .join("&")
    }

    /// Build an attribute string.
    ///
    /// The API splits attribute strings on `;` and each segment on its first `:`, so values may
    /// contain colons (dates do) but not semicolons, and names may contain neither. A parameter
    /// breaking either rule fails with [SerializeError::InvalidArgument].
    pub fn attribute_string(&self, params: &Params) -> Result<String, SerializeError> {
        self.segments(params)
            .map(|(name, value)| -> Result<String, SerializeError> {
                ensure!(
                    !name.contains(&[':', ';'][..]),
                    InvalidArgumentSnafu {
                        reason: format!("attribute name {:?} contains ':' or ';'", name),
                    }
                );
                let value = value.to_string();
                ensure!(
                    !value.contains(';'),
                    InvalidArgumentSnafu {
                        reason: format!("value of attribute {:?} contains ';'", name),
                    }
                );
                Ok(format!("{}:{}", name, value))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|segments| segments.join(";"))
    }

    fn segments<'a>(
        &self,
        params: &'a Params,
    ) -> impl Iterator<Item = (&'a str, Serialized<'a>)> + 'a {
        let omit_nulls = self.null_params == NullParams::Omit;
        params
            .iter()
            .map(|(name, value)| (name, serialize_value(value)))
            .filter(move |(_, value)| !(omit_nulls && value.is_null()))
    }
}

/// Build a URL query string from a parameter mapping, keeping null parameters as empty values.
pub fn query_string(params: &Params) -> String {
    QueryConfig::default().query_string(params)
}

/// Build an attribute string from a parameter mapping.
///
/// ```
/// # use flex_sdk_net::{attribute_string, Params};
/// let variant = Params::new().with("w", 320).with("h", 640).with("fit", "scale");
/// assert_eq!(attribute_string(&variant).unwrap(), "w:320;h:640;fit:scale");
/// ```
pub fn attribute_string(params: &Params) -> Result<String, SerializeError> {
    QueryConfig::default().attribute_string(params)
}

/// Build a URL query string from a JSON object.
///
/// Every value is classified before anything is written, so an unsupported value anywhere in the
/// object fails the call without producing output.
pub fn query_string_from_json(json: serde_json::Value) -> Result<String, SerializeError> {
    let params = Params::from_json(json)?;
    event!(
        Level::DEBUG,
        "serializing {} query parameters",
        params.len()
    );
    Ok(query_string(&params))
}

/// Build an attribute string from a JSON object.
///
/// Fails with [SerializeError::InvalidArgument] if `json` is not an object (including null), or
/// if a name or value would break the attribute string apart.
pub fn object_query_string(json: serde_json::Value) -> Result<String, SerializeError> {
    attribute_string(&Params::from_json(json)?)
}

/// Serialize a single value and render it as a string.
pub fn value_string(value: &Value) -> String {
    serialize_value(value).to_string()
}
