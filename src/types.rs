// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the Flex SDK Net library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An API resource identifier.
///
/// The identifier is kept exactly as it was given, so serializing it in a request reproduces the
/// string the API handed out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Uuid {
    pub uuid: String,
}

impl Uuid {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.uuid
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(id: uuid::Uuid) -> Self {
        Self::new(id.hyphenated().to_string())
    }
}

impl From<&str> for Uuid {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_as_json(self, f)
    }
}

/// A geographic point.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Display for LatLng {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_as_json(self, f)
    }
}

/// A rectangular region given by its northeast and southwest corners.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LatLngBounds {
    pub ne: LatLng,
    pub sw: LatLng,
}

impl LatLngBounds {
    pub fn new(ne: LatLng, sw: LatLng) -> Self {
        Self { ne, sw }
    }
}

impl Display for LatLngBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_as_json(self, f)
    }
}

// Display implementation for types which serialize to JSON. Displays as a valid JSON object.
pub fn fmt_as_json<T: Serialize>(v: &T, f: &mut Formatter<'_>) -> fmt::Result {
    let string = serde_json::to_string(v).map_err(|_| fmt::Error)?;
    write!(f, "{}", string)
}

/// Write a number the way the API expects to read it back.
///
/// Numbers are written the way the JavaScript SDK writes them: integral values drop the
/// fractional part (`1.0` becomes `1`), magnitudes from `1e21` up and below `1e-6` use exponent
/// form (`1e+21`, `1.5e-7`) and non-finite values are spelled `NaN`, `Infinity` and `-Infinity`.
pub fn fmt_number(n: f64, f: &mut impl fmt::Write) -> fmt::Result {
    let abs = n.abs();
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 reads as 0
        f.write_str("0")
    } else if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&exp),
        }
    } else {
        write!(f, "{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> String {
        let mut s = String::new();
        fmt_number(n, &mut s).unwrap();
        s
    }

    #[test]
    fn numbers_use_natural_decimal_form() {
        assert_eq!(number(1.0), "1");
        assert_eq!(number(0.5), "0.5");
        assert_eq!(number(-74.0060), "-74.006");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(f64::NAN), "NaN");
        assert_eq!(number(f64::INFINITY), "Infinity");
        assert_eq!(number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(number(1e21), "1e+21");
        assert_eq!(number(-2.5e30), "-2.5e+30");
        assert_eq!(number(1e20), "100000000000000000000");
        assert_eq!(number(1e-7), "1e-7");
        assert_eq!(number(-1.5e-7), "-1.5e-7");
        assert_eq!(number(0.000001), "0.000001");
    }

    #[test]
    fn uuid_keeps_its_identifier_verbatim() {
        let id = Uuid::new("5A1B8E44-0C6F-4B0B-A3C4-1C0D3F7E8A9B");
        assert_eq!(id.as_str(), "5A1B8E44-0C6F-4B0B-A3C4-1C0D3F7E8A9B");

        let parsed = uuid::Uuid::from_u128(0x5a1b8e44_0c6f_4b0b_a3c4_1c0d3f7e8a9b);
        assert_eq!(
            Uuid::from(parsed).as_str(),
            "5a1b8e44-0c6f-4b0b-a3c4-1c0d3f7e8a9b"
        );
    }

    #[test]
    fn display_as_json() {
        let bounds = LatLngBounds::new(LatLng::new(40.5, -73.5), LatLng::new(40.0, -74.0));
        assert_eq!(
            bounds.to_string(),
            r#"{"ne":{"lat":40.5,"lng":-73.5},"sw":{"lat":40.0,"lng":-74.0}}"#
        );
        assert_eq!(Uuid::new("abc").to_string(), r#"{"uuid":"abc"}"#);
    }
}
