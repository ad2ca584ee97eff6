/// Marker radius in pixels. Magnitude 0 still gets a visible dot; negative values are passed
/// through unclamped.
pub fn scale(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        1.0
    } else {
        magnitude * 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(scale(0.0), 1.0);
        assert_eq!(scale(5.0), 20.0);
        assert_eq!(scale(2.5), 10.0);
    }

    #[test]
    fn test_negative_magnitude_is_not_clamped() {
        assert_eq!(scale(-1.0), -4.0);
    }
}
