// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the Flex SDK Net library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Request parameter serialization for the Sharetribe Flex web API.
//!
//! Flex API endpoints read their parameters from the URL query string. Values which have richer
//! types in the SDK (resource identifiers, geographic points and bounding boxes, dates, lists) are
//! flattened into the strings the API parses: an identifier becomes its UUID string, a point
//! becomes `lat,lng`, a bounding box `neLat,neLng,swLat,swLng`, a date its ISO 8601 form and a
//! list the comma separated serializations of its elements. Strings, numbers, booleans and null
//! are passed through as they are.
//!
//! Parameters are collected in a [Params] mapping of [Value]s, which can be turned into a URL
//! query string ([query_string]) or into the `key:value;...` attribute string some parameters take
//! as their value ([attribute_string]). Loosely typed parameters, given as JSON, are classified
//! into [Value]s first; anything that is not one of the supported kinds is rejected with
//! [SerializeError::UnsupportedType] before any output is produced.
//!
//! The `client` module builds `surf` requests from parameter mappings and carries the retry marker
//! the API client's retry interceptor uses. Sending requests, retrying them and authenticating
//! them are left to the client.

pub mod client;
pub mod error;
pub mod params;
pub mod query;
pub mod types;
pub mod value;

pub use error::*;
pub use params::Params;
pub use query::{
    attribute_string, object_query_string, query_string, query_string_from_json, value_string,
    NullParams, QueryConfig,
};
pub use types::*;
pub use value::{serialize_value, Serialized, Value, SEQUENCE_SEPARATOR};
