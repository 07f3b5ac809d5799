//! Sum raw records into one observation per precinct.

use crate::acquire::RawRecord;
use cs_common::{Dataset, Observation, PrecinctCode, Result};
use std::collections::HashMap;

/// Group `records` by precinct and sum their values.
///
/// Precincts appear in the order of their first record.
pub fn aggregate<I>(records: I) -> Result<Dataset>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut index: HashMap<PrecinctCode, usize> = HashMap::new();
    let mut observations: Vec<Observation> = Vec::new();

    for record in records {
        match index.get(&record.key) {
            Some(&slot) => observations[slot].value += record.value,
            None => {
                index.insert(record.key.clone(), observations.len());
                observations.push(Observation {
                    key: record.key,
                    value: record.value,
                });
            }
        }
    }

    Dataset::new(observations)
}
