pub mod range;
pub mod unit;

use std::cmp::Ordering;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (debug by default),
/// and evaluates to the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!(
            $log_level,
            "{} took {} ms",
            $label,
            elapsed.as_secs_f64() * 1000.0
        );
        value
    }};
}

/// Compare two `PartialOrd` values dangerously. If the partial comparison
/// fails (returns `None`), this will panic. This is useful if you have floats
/// that you know for a fact will not be `NaN`.
pub fn cmp_unwrap<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_unwrap() {
        let mut values = vec![3.0, -1.0, 2.5, 0.0];
        values.sort_by(cmp_unwrap);
        assert_eq!(values, vec![-1.0, 0.0, 2.5, 3.0]);
    }

    #[test]
    #[should_panic]
    fn test_cmp_unwrap_nan() {
        cmp_unwrap(&f64::NAN, &1.0);
    }

    #[test]
    fn test_timed_passes_value_through() {
        let value = timed!("addition", 2 + 2);
        assert_eq!(value, 4);
    }
}
