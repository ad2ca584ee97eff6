use crate::domain::model::{Classification, SeverityBucket};

/// Depth buckets in ascending order of their lower bound (km).
pub const SEVERITY_BUCKETS: [SeverityBucket; 6] = [
    SeverityBucket { lower: -10.0, color: "#a3f600" },
    SeverityBucket { lower: 10.0, color: "#dcf400" },
    SeverityBucket { lower: 30.0, color: "#f7db11" },
    SeverityBucket { lower: 50.0, color: "#fdb72a" },
    SeverityBucket { lower: 70.0, color: "#fca35d" },
    SeverityBucket { lower: 90.0, color: "#ff5f65" },
];

/// Picks the bucket for a depth, deepest threshold first.
///
/// Comparisons are strict, so a depth sitting exactly on a boundary belongs to the
/// shallower bucket (90 km is in `70–90`). Anything at or below 10 km, negative
/// depths and NaN included, lands in bucket 0.
pub fn classify(depth: f64) -> Classification {
    let index = SEVERITY_BUCKETS
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(_, bucket)| depth > bucket.lower)
        .map(|(i, _)| i)
        .unwrap_or(0);

    Classification {
        index,
        color: SEVERITY_BUCKETS[index].color,
    }
}

pub fn color_for_depth(depth: f64) -> &'static str {
    classify(depth).color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(color_for_depth(90.0), "#fca35d");
        assert_eq!(color_for_depth(91.0), "#ff5f65");
        assert_eq!(color_for_depth(70.0), "#fdb72a");
        assert_eq!(color_for_depth(10.0), "#a3f600");
        assert_eq!(color_for_depth(10.5), "#dcf400");
    }

    #[test]
    fn test_shallow_and_negative_depths() {
        assert_eq!(color_for_depth(-5.0), "#a3f600");
        assert_eq!(color_for_depth(-500.0), "#a3f600");
        assert_eq!(classify(0.0).index, 0);
    }

    #[test]
    fn test_every_value_gets_one_bucket() {
        let depths = [
            f64::NEG_INFINITY,
            -10.0,
            0.0,
            29.9,
            30.0,
            49.0,
            69.0,
            89.9,
            700.0,
            f64::INFINITY,
            f64::NAN,
        ];
        for depth in depths {
            let c = classify(depth);
            assert!(c.index < SEVERITY_BUCKETS.len());
            assert_eq!(c.color, SEVERITY_BUCKETS[c.index].color);
        }
        assert_eq!(classify(f64::NAN).index, 0);
        assert_eq!(classify(f64::INFINITY).index, 5);
    }

    #[test]
    fn test_index_matches_color_order() {
        let expected = [(5.0, 0), (20.0, 1), (40.0, 2), (60.0, 3), (80.0, 4), (100.0, 5)];
        for (depth, index) in expected {
            assert_eq!(classify(depth).index, index, "depth {}", depth);
        }
    }
}
