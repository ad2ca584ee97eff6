use crate::core::depth::SEVERITY_BUCKETS;
use crate::domain::model::{ControlPosition, Legend, LegendRow};

pub const LEGEND_TITLE: &str = "Depth (km)";

/// One row per depth bucket, shallowest first: `-10–10`, `10–30`, ... `90+`.
pub fn build_legend() -> Legend {
    let rows = SEVERITY_BUCKETS
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let label = match SEVERITY_BUCKETS.get(i + 1) {
                Some(next) => format!("{}\u{2013}{}", bucket.lower, next.lower),
                None => format!("{}+", bucket.lower),
            };
            LegendRow {
                label,
                color: bucket.color.to_string(),
            }
        })
        .collect();

    Legend {
        title: LEGEND_TITLE.to_string(),
        position: ControlPosition::BottomRight,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_in_order() {
        let legend = build_legend();
        let rows: Vec<(&str, &str)> = legend
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.color.as_str()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("-10–10", "#a3f600"),
                ("10–30", "#dcf400"),
                ("30–50", "#f7db11"),
                ("50–70", "#fdb72a"),
                ("70–90", "#fca35d"),
                ("90+", "#ff5f65"),
            ]
        );
        assert_eq!(legend.title, "Depth (km)");
        assert_eq!(legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn test_build_legend_is_idempotent() {
        assert_eq!(build_legend(), build_legend());
    }
}
