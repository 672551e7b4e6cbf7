//! Locating the station array inside a station-list response
//!
//! The platform has not been consistent about where the array lives in
//! `data`. Named keys are tried in a fixed order (`pageObject`,
//! `stationList`, `list`); when none is present the first array-valued
//! field, in the order the response declared it, is used.

use serde_json::Value;

/// Keys checked, highest priority first
pub const STATION_ARRAY_KEYS: [&str; 3] = ["pageObject", "stationList", "list"];

/// Outcome of resolving a station array
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StationArray<'a> {
    /// Found under one of [`STATION_ARRAY_KEYS`]
    Named { key: &'static str, items: &'a [Value] },

    /// Found as the first array-valued field
    FirstArray { key: &'a str, items: &'a [Value] },

    /// A named key was present but did not hold an array
    NotAnArray { key: &'static str },

    /// Nothing usable in the response
    Unresolved,
}

impl<'a> StationArray<'a> {
    /// The resolved entries; empty unless an array was found
    pub fn items(&self) -> &'a [Value] {
        match *self {
            Self::Named { items, .. } | Self::FirstArray { items, .. } => items,
            Self::NotAnArray { .. } | Self::Unresolved => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Field the entries were taken from
    pub fn key(&self) -> Option<&'a str> {
        match *self {
            Self::Named { key, .. } | Self::NotAnArray { key } => Some(key),
            Self::FirstArray { key, .. } => Some(key),
            Self::Unresolved => None,
        }
    }
}

/// Resolves the station array of a `data` section
///
/// A present named key always wins, even when its value is not an array.
pub fn resolve_station_array(data: &Value) -> StationArray<'_> {
    let Some(fields) = data.as_object() else {
        return StationArray::Unresolved;
    };

    for key in STATION_ARRAY_KEYS {
        if let Some(value) = fields.get(key) {
            return match value.as_array() {
                Some(items) => StationArray::Named { key, items },
                None => StationArray::NotAnArray { key },
            };
        }
    }

    fields
        .iter()
        .find_map(|(key, value)| {
            value.as_array().map(|items| StationArray::FirstArray {
                key: key.as_str(),
                items,
            })
        })
        .unwrap_or(StationArray::Unresolved)
}

/// Resolves the station array of a full station-list response
pub fn resolve_station_response(response: &Value) -> StationArray<'_> {
    match response.get("data") {
        Some(data) => resolve_station_array(data),
        None => StationArray::Unresolved,
    }
}
