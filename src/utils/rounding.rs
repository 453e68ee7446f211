//! Numeric policy shared across the engine: half-up rounding at fixed
//! precision, divide-by-zero floors, and first-extreme scans.

/// Rounds to the given number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Two-decimal rounding, applied after every intermediate cost sum.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Six-decimal rounding, used for rate display quotes.
pub fn round6(value: f64) -> f64 {
    round_to(value, 6)
}

/// Piece divisor with a floor of one piece.
pub fn piece_divisor(total_pieces: u32) -> f64 {
    total_pieces.max(1) as f64
}

/// Kilogram divisor with a floor of one gram.
pub fn kilogram_divisor(weight_g: f64) -> f64 {
    (weight_g / 1000.0).max(0.001)
}

/// Index of the maximum value; the first occurrence wins ties. Returns
/// None for an empty slice.
pub fn first_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, current)) => value > current,
        };
        if replace {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Index of the minimum value; the first occurrence wins ties. Returns
/// None for an empty slice.
pub fn first_min(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, current)) => value < current,
        };
        if replace {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// True when every value equals the first one.
pub fn all_equal(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(11.111), 11.11);
        assert_eq!(round2(11.119), 11.12);
        assert_eq!(round2(10.0 / 0.9), 11.11);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn divisors_never_reach_zero() {
        assert_eq!(piece_divisor(0), 1.0);
        assert_eq!(piece_divisor(10), 10.0);
        assert_eq!(kilogram_divisor(0.0), 0.001);
        assert_eq!(kilogram_divisor(900.0), 0.9);
    }

    #[test]
    fn extreme_scans_prefer_first_index() {
        let values = [1.0, 3.0, 3.0, -2.0, -2.0];
        assert_eq!(first_max(&values), Some(1));
        assert_eq!(first_min(&values), Some(3));
        assert_eq!(first_max(&[]), None);
    }

    #[test]
    fn all_equal_detects_uniform_series() {
        assert!(all_equal(&[100.0; 12]));
        assert!(!all_equal(&[100.0, 100.0, 99.0]));
        assert!(all_equal(&[]));
    }
}
