#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Target-encoding lookup table for U.S. states and cities.
//!
//! The table is produced offline alongside the price model: every state and
//! city seen in the training data is replaced by a numeric statistic of the
//! sale prices observed there. It is persisted as a JSON document:
//!
//! ```json
//! {
//!   "texas": {
//!     "encoded_value": 312000.5,
//!     "cities": {
//!       "austin": { "encoded_value": 498000.0 },
//!       "dallas": { "encoded_value": 377000.0 }
//!     }
//!   }
//! }
//! ```
//!
//! The table is loaded once at startup and never mutated afterwards, so it
//! can be shared across request handlers behind an `Arc` without locking.
//! City entries keep the order of the document.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use house_price_geography_models::lookup_key;
use house_price_geography_models::states::US_STATES;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading or querying the encoding table.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The table file could not be read.
    #[error("Failed to read encoding table {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The table file is not valid JSON of the expected shape.
    #[error("Failed to parse encoding table: {0}")]
    Parse(#[from] serde_json::Error),

    /// The state has no entry in the table.
    #[error("No encoding for state '{0}'")]
    UnknownState(String),

    /// The city has no entry under the state.
    #[error("No encoding for city '{city}' in state '{state}'")]
    UnknownCity {
        /// State the city was looked up under.
        state: String,
        /// City that was not found.
        city: String,
    },
}

/// Encoded value for a single city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityEncoding {
    /// Lower-cased city name as stored in the table.
    pub name: String,
    /// Target-encoded value.
    pub encoded_value: f64,
}

/// Encoded values for a state and the cities within it.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEncoding {
    /// Target-encoded value for the state.
    pub encoded_value: f64,
    cities: Vec<CityEncoding>,
    city_index: HashMap<String, usize>,
}

impl StateEncoding {
    /// Cities under this state, in table order.
    #[must_use]
    pub fn cities(&self) -> &[CityEncoding] {
        &self.cities
    }

    /// Looks up a city by name (case-insensitive).
    #[must_use]
    pub fn city(&self, city: &str) -> Option<&CityEncoding> {
        self.city_index
            .get(&lookup_key(city))
            .map(|&idx| &self.cities[idx])
    }
}

/// Immutable state/city target-encoding table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingTable {
    states: HashMap<String, StateEncoding>,
}

impl EncodingTable {
    /// Reads and parses the table at `path`.
    ///
    /// Logs the table size, and warns about reference states that have no
    /// entry (per-state chart data cannot be produced for them).
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Io`] if the file cannot be read, or
    /// [`EncodingError::Parse`] if it is not a valid table document.
    pub fn load(path: &Path) -> Result<Self, EncodingError> {
        let contents = std::fs::read_to_string(path).map_err(|source| EncodingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&contents)?;

        log::info!(
            "Loaded encoding table with {} states and {} cities from {}",
            table.state_count(),
            table.city_count(),
            path.display()
        );

        let missing = table.missing_states(US_STATES);
        if !missing.is_empty() {
            log::warn!(
                "Encoding table has no entry for {} reference states: {}",
                missing.len(),
                missing.join(", ")
            );
        }

        Ok(table)
    }

    /// Parses a table from a JSON document.
    ///
    /// State and city keys are normalized to lower case. If a city key
    /// appears twice under one state, the later value wins and the entry
    /// keeps its first position.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Parse`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, EncodingError> {
        let raw: OrderedEntries<RawState> = serde_json::from_str(json)?;

        let states = raw
            .0
            .into_iter()
            .map(|(state, raw_state)| {
                let mut cities: Vec<CityEncoding> = Vec::with_capacity(raw_state.cities.0.len());
                let mut city_index: HashMap<String, usize> =
                    HashMap::with_capacity(raw_state.cities.0.len());

                for (name, raw_city) in raw_state.cities.0 {
                    let name = lookup_key(&name);
                    if let Some(&idx) = city_index.get(&name) {
                        cities[idx].encoded_value = raw_city.encoded_value;
                    } else {
                        city_index.insert(name.clone(), cities.len());
                        cities.push(CityEncoding {
                            name,
                            encoded_value: raw_city.encoded_value,
                        });
                    }
                }

                (
                    lookup_key(&state),
                    StateEncoding {
                        encoded_value: raw_state.encoded_value,
                        cities,
                        city_index,
                    },
                )
            })
            .collect();

        Ok(Self { states })
    }

    /// Returns the entry for `state` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnknownState`] if the state is not in the
    /// table.
    pub fn state(&self, state: &str) -> Result<&StateEncoding, EncodingError> {
        self.states
            .get(&lookup_key(state))
            .ok_or_else(|| EncodingError::UnknownState(state.to_string()))
    }

    /// Returns the encoded value for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnknownState`] if the state is not in the
    /// table.
    pub fn state_encoding(&self, state: &str) -> Result<f64, EncodingError> {
        self.state(state).map(|s| s.encoded_value)
    }

    /// Returns the encoded value for `city` under `state`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnknownState`] if the state is not in the
    /// table, or [`EncodingError::UnknownCity`] if the city is not listed
    /// under it.
    pub fn city_encoding(&self, state: &str, city: &str) -> Result<f64, EncodingError> {
        self.state(state)?
            .city(city)
            .map(|c| c.encoded_value)
            .ok_or_else(|| EncodingError::UnknownCity {
                state: state.to_string(),
                city: city.to_string(),
            })
    }

    /// Returns the encoded value for `city` under `state`, falling back to
    /// the state's own value when the city is not listed.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnknownState`] if the state is not in the
    /// table.
    pub fn city_encoding_or_state(&self, state: &str, city: &str) -> Result<f64, EncodingError> {
        let entry = self.state(state)?;
        Ok(entry
            .city(city)
            .map_or(entry.encoded_value, |c| c.encoded_value))
    }

    /// Returns the names in `reference` that have no entry in the table,
    /// preserving their order.
    #[must_use]
    pub fn missing_states<'a>(&self, reference: &[&'a str]) -> Vec<&'a str> {
        reference
            .iter()
            .copied()
            .filter(|name| !self.states.contains_key(&lookup_key(name)))
            .collect()
    }

    /// Number of states in the table.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of cities across all states.
    #[must_use]
    pub fn city_count(&self) -> usize {
        self.states.values().map(|s| s.cities.len()).sum()
    }
}

#[derive(Deserialize)]
struct RawState {
    encoded_value: f64,
    #[serde(default)]
    cities: OrderedEntries<RawCity>,
}

#[derive(Deserialize)]
struct RawCity {
    encoded_value: f64,
}

/// A JSON object deserialized into its entries in document order.
struct OrderedEntries<T>(Vec<(String, T)>);

impl<T> Default for OrderedEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = OrderedEntries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of names to encoded values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
