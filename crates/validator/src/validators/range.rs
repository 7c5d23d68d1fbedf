//! Numeric range validators
//!
//! Form numbers arrive as `f64` after coercion; these validators check them
//! before any integer conversion happens.

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a value is at least a minimum.
    #[derive(Copy, PartialEq)]
    pub Min { min: f64 } for f64;
    rule(self, input) { *input >= self.min }
    error(self, input) {
        ValidationError::new("min", format!("Value must be at least {}", self.min))
            .with_param("min", self.min.to_string())
            .with_param("actual", input.to_string())
    }
    fn min(min: f64);
}

crate::validator! {
    /// Validates that a value does not exceed a maximum.
    #[derive(Copy, PartialEq)]
    pub Max { max: f64 } for f64;
    rule(self, input) { *input <= self.max }
    error(self, input) {
        ValidationError::new("max", format!("Value must be at most {}", self.max))
            .with_param("max", self.max.to_string())
            .with_param("actual", input.to_string())
    }
    fn max(max: f64);
}

crate::validator! {
    /// Validates that a value is within an inclusive range.
    #[derive(Copy, PartialEq)]
    pub InRange { min: f64, max: f64 } for f64;
    rule(self, input) { *input >= self.min && *input <= self.max }
    error(self, input) { ValidationError::out_of_range(self.min, self.max, *input) }
    fn in_range(min: f64, max: f64);
}

crate::validator! {
    /// Validates that a finite value has no fractional part.
    pub Integral for f64;
    rule(input) { input.is_finite() && input.fract() == 0.0 }
    error(input) {
        ValidationError::new("integral", "Value must be a whole number")
            .with_param("actual", input.to_string())
    }
    fn integral();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, true)]
    #[case(100.0, true)]
    #[case(50.5, true)]
    #[case(0.0, false)]
    #[case(100.1, false)]
    #[case(f64::NAN, false)]
    fn in_range_is_inclusive(#[case] input: f64, #[case] ok: bool) {
        assert_eq!(in_range(1.0, 100.0).validate(&input).is_ok(), ok);
    }

    #[test]
    fn in_range_error_params() {
        let err = in_range(1.0, 100.0).validate(&120.0).unwrap_err();
        assert_eq!(err.code, "out_of_range");
        assert_eq!(err.param("min"), Some("1"));
        assert_eq!(err.param("max"), Some("100"));
        assert_eq!(err.param("actual"), Some("120"));
    }

    #[test]
    fn min_and_max() {
        assert!(min(1.0).validate(&1.0).is_ok());
        assert!(min(1.0).validate(&0.9).is_err());
        assert!(max(100.0).validate(&100.0).is_ok());
        assert!(max(100.0).validate(&101.0).is_err());
    }

    #[rstest]
    #[case(80.0, true)]
    #[case(-3.0, true)]
    #[case(80.5, false)]
    #[case(f64::INFINITY, false)]
    fn integral_rejects_fractions(#[case] input: f64, #[case] ok: bool) {
        assert_eq!(integral().validate(&input).is_ok(), ok);
    }
}
