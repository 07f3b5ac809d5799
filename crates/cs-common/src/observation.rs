//! Per-precinct observations and the aggregated dataset.
//!
//! A [`Dataset`] holds exactly one [`Observation`] per precinct code. It is
//! built once by the aggregator and never mutated afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Police precinct code (the `cisp` column).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecinctCode(pub String);

impl PrecinctCode {
    pub fn new(code: impl Into<String>) -> Self {
        PrecinctCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrecinctCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PrecinctCode {
    fn from(code: &str) -> Self {
        PrecinctCode(code.to_string())
    }
}

/// One precinct and its aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub key: PrecinctCode,
    pub value: f64,
}

impl Observation {
    pub fn new(key: impl Into<PrecinctCode>, value: f64) -> Self {
        Observation {
            key: key.into(),
            value,
        }
    }
}

/// Ordered, immutable sequence of observations with unique keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate precinct codes.
    ///
    /// # Errors
    /// `Error::DuplicateKey` for the first repeated key.
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(observations.len());
        for obs in &observations {
            if !seen.insert(&obs.key) {
                return Err(Error::DuplicateKey {
                    key: obs.key.to_string(),
                });
            }
        }
        Ok(Dataset { observations })
    }

    /// Convenience constructor from `(key, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<PrecinctCode>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| Observation::new(k, v))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Values in dataset order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Value for a precinct, if present.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.observations
            .iter()
            .find(|o| o.key.as_str() == key)
            .map(|o| o.value)
    }

    /// Copy sorted by value, largest first. Ties keep dataset order.
    pub fn sorted_desc(&self) -> Vec<Observation> {
        let mut sorted = self.observations.clone();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
        sorted
    }

    /// Copy sorted by value, smallest first. Ties keep dataset order.
    pub fn sorted_asc(&self) -> Vec<Observation> {
        let mut sorted = self.observations.clone();
        sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
        sorted
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
