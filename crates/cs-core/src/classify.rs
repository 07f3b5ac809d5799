//! Outlier partition and top/bottom rankings.

use cs_common::{Dataset, Observation, OutlierClassification, Rankings};
use cs_math::{Fences, OutlierClass};

/// Partition `dataset` by `fences`.
///
/// A value equal to a fence is within. `below` is sorted ascending and
/// `above` descending; sorting is stable so ties keep dataset order.
pub fn classify(dataset: &Dataset, fences: &Fences) -> OutlierClassification {
    let mut below = Vec::new();
    let mut above = Vec::new();
    let mut within = Vec::new();

    for obs in dataset {
        match fences.classify(obs.value) {
            OutlierClass::Below => below.push(obs.clone()),
            OutlierClass::Above => above.push(obs.clone()),
            OutlierClass::Within => within.push(obs.clone()),
        }
    }

    below.sort_by(|a, b| a.value.total_cmp(&b.value));
    above.sort_by(|a, b| b.value.total_cmp(&a.value));

    OutlierClassification {
        fences: *fences,
        below,
        above,
        within,
    }
}

/// Build the conclusion rankings.
///
/// `top` is the first `n` upper outliers. `bottom` is the last `n` of the
/// whole dataset sorted largest first, so it lists the smallest values in
/// descending order.
pub fn rankings(dataset: &Dataset, classification: &OutlierClassification, n: usize) -> Rankings {
    let top: Vec<Observation> = classification.above.iter().take(n).cloned().collect();

    let sorted = dataset.sorted_desc();
    let start = sorted.len().saturating_sub(n);
    let bottom = sorted[start..].to_vec();

    Rankings { n, top, bottom }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(obs: &[Observation]) -> Vec<&str> {
        obs.iter().map(|o| o.key.as_str()).collect()
    }

    fn sample() -> Dataset {
        Dataset::from_pairs([
            ("1", 12.0),
            ("2", 500.0),
            ("3", 14.0),
            ("4", 13.0),
            ("5", -90.0),
            ("6", 15.0),
            ("7", 700.0),
            ("8", 11.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_partition_is_strict() {
        let dataset = sample();
        let fences = Fences { lower: 0.0, upper: 100.0 };
        let c = classify(&dataset, &fences);

        assert_eq!(c.total(), dataset.len());
        assert_eq!(keys(&c.below), vec!["5"]);
        assert_eq!(keys(&c.above), vec!["7", "2"]);
        assert_eq!(keys(&c.within), vec!["1", "3", "4", "6", "8"]);
    }

    #[test]
    fn test_fence_values_are_within() {
        let dataset = Dataset::from_pairs([("a", 0.0), ("b", 100.0), ("c", 50.0)]).unwrap();
        let c = classify(&dataset, &Fences { lower: 0.0, upper: 100.0 });
        assert!(!c.has_outliers());
        assert_eq!(c.within.len(), 3);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let dataset =
            Dataset::from_pairs([("x", 200.0), ("y", 300.0), ("z", 200.0), ("w", 1.0)]).unwrap();
        let c = classify(&dataset, &Fences { lower: 0.0, upper: 100.0 });
        assert_eq!(keys(&c.above), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_top_is_capped_upper_outliers() {
        let dataset = sample();
        let c = classify(&dataset, &Fences { lower: 0.0, upper: 100.0 });
        let r = rankings(&dataset, &c, 1);
        assert_eq!(keys(&r.top), vec!["7"]);
        let r = rankings(&dataset, &c, 5);
        assert_eq!(keys(&r.top), vec!["7", "2"]);
    }

    #[test]
    fn test_bottom_uses_full_dataset() {
        let dataset = sample();
        let c = classify(&dataset, &Fences { lower: 0.0, upper: 100.0 });
        let r = rankings(&dataset, &c, 3);

        // The lower outlier stays in the bottom ranking.
        assert_eq!(keys(&r.bottom), vec!["1", "8", "5"]);
        assert_eq!(r.bottom.last().map(|o| o.value), Some(-90.0));
    }

    #[test]
    fn test_rankings_longer_than_dataset() {
        let dataset = Dataset::from_pairs([("a", 1.0), ("b", 2.0)]).unwrap();
        let c = classify(&dataset, &Fences { lower: 0.0, upper: 10.0 });
        let r = rankings(&dataset, &c, 5);
        assert!(r.top.is_empty());
        assert_eq!(keys(&r.bottom), vec!["b", "a"]);
    }
}
