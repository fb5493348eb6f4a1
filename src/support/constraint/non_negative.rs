use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// Works for plain numbers and for `uom` quantities alike.
///
/// ```
/// use twine_ahu::support::constraint::NonNegative;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// assert!(NonNegative::new(MassRate::new::<kilogram_per_second>(0.0)).is_ok());
/// assert!(NonNegative::new(-7.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::ThermalConductance, thermal_conductance::watt_per_kelvin};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(2.0).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert_eq!(NonNegative::new(-2.0), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn conductances() {
        let ua = ThermalConductance::new::<watt_per_kelvin>(675.0);
        assert_eq!(NonNegative::new(ua).unwrap().into_inner(), ua);

        let ua = ThermalConductance::new::<watt_per_kelvin>(-675.0);
        assert!(NonNegative::new(ua).is_err());
    }
}
