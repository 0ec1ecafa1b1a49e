//! Distance type.

use std::fmt;

/// Error returned when a distance is negative or not a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid distance {0} km: must be non-negative")]
pub struct InvalidDistance(pub f64);

/// A non-negative distance in kilometres.
///
/// # Examples
///
/// ```
/// use fuel_prices::domain::Distance;
///
/// let mut d = Distance::from_km(1.1).unwrap();
/// assert!(d.set_km(-1.0).is_err());
/// assert_eq!(d.km(), 1.1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// Create a distance from a kilometre value.
    pub fn from_km(km: f64) -> Result<Self, InvalidDistance> {
        check(km)?;
        Ok(Distance(km))
    }

    pub fn km(&self) -> f64 {
        self.0
    }

    /// Replace the kilometre value.
    ///
    /// On error the previous value is kept.
    pub fn set_km(&mut self, km: f64) -> Result<(), InvalidDistance> {
        check(km)?;
        self.0 = km;
        Ok(())
    }
}

fn check(km: f64) -> Result<(), InvalidDistance> {
    // `>=` is false for NaN
    if km >= 0.0 {
        Ok(())
    } else {
        Err(InvalidDistance(km))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_valid() {
        assert_eq!(Distance::from_km(0.0).unwrap(), Distance::ZERO);
        assert_eq!(Distance::default(), Distance::ZERO);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Distance::from_km(-0.001).is_err());
        assert!(Distance::from_km(f64::NAN).is_err());
        assert!(Distance::from_km(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn failed_mutation_keeps_value() {
        let mut d = Distance::from_km(2.5).unwrap();
        let err = d.set_km(-3.0).unwrap_err();
        assert_eq!(err, InvalidDistance(-3.0));
        assert_eq!(d.km(), 2.5);

        d.set_km(4.0).unwrap();
        assert_eq!(d.km(), 4.0);
    }

    #[test]
    fn display() {
        assert_eq!(Distance::from_km(1.1).unwrap().to_string(), "1.1 km");
        assert_eq!(
            InvalidDistance(-2.0).to_string(),
            "invalid distance -2 km: must be non-negative"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn non_negative_always_valid(km in 0.0f64..1e9) {
            prop_assert_eq!(Distance::from_km(km).unwrap().km(), km);
            let mut d = Distance::ZERO;
            prop_assert!(d.set_km(km).is_ok());
        }

        #[test]
        fn negative_always_rejected(km in -1e9f64..-1e-9) {
            prop_assert!(Distance::from_km(km).is_err());
            let mut d = Distance::ZERO;
            prop_assert!(d.set_km(km).is_err());
            prop_assert_eq!(d, Distance::ZERO);
        }
    }
}
