//! Psychrometric relations for moist air.
//!
//! Models consume psychrometric properties through the narrow
//! [`Psychrometrics`] trait so that the property formulation can be swapped
//! without touching the balance equations.
//!
//! All functions use the same plain-number conventions:
//!
//! - temperature in °C,
//! - relative humidity as a fraction in `[0, 1]`,
//! - humidity ratio in kg of water per kg of dry air.
//!
//! [`HylandWexler`] is the provided implementation.
//!
//! # Example
//!
//! ```
//! use twine_ahu::support::psychro::{HylandWexler, Psychrometrics};
//!
//! let air = HylandWexler::default();
//! let w = air.humidity_ratio(24.0, 0.5);
//! assert!((air.relative_humidity(24.0, w) - 0.5).abs() < 1e-12);
//! ```

mod dew_point;

pub use dew_point::{DewPointError, dew_point};

use uom::si::{f64::Pressure, pressure::pascal};

/// Ratio of the molar masses of water vapor and dry air.
pub const MOLAR_MASS_RATIO: f64 = 0.621_945;

/// Standard atmospheric pressure, in Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Moist-air property relations required by the air-handling unit models.
///
/// Implementations must be pure: the same arguments always give the same result.
pub trait Psychrometrics {
    /// Returns the humidity ratio at `temperature` and `relative_humidity`.
    fn humidity_ratio(&self, temperature: f64, relative_humidity: f64) -> f64;

    /// Returns the slope `dw/dθ` of the saturation curve at `temperature`, in 1/K.
    fn saturation_slope(&self, temperature: f64) -> f64;

    /// Returns the humidity ratio on the saturation curve at `temperature`.
    fn saturation_value(&self, temperature: f64) -> f64 {
        self.humidity_ratio(temperature, 1.0)
    }

    /// Returns the relative humidity of air at `temperature` with `humidity_ratio`.
    ///
    /// Dry air and vapor are treated as an ideal mixture, so the vapor mole
    /// fraction `w / (ε + w)` scales linearly with the vapor pressure.
    fn relative_humidity(&self, temperature: f64, humidity_ratio: f64) -> f64 {
        let vapor_fraction = |w: f64| w / (MOLAR_MASS_RATIO + w);
        vapor_fraction(humidity_ratio) / vapor_fraction(self.saturation_value(temperature))
    }
}

/// Hyland–Wexler saturation pressure correlations (ASHRAE Fundamentals).
///
/// Saturation is taken over ice below 0 °C and over liquid water otherwise.
/// The relations are valid from -100 °C up to temperatures where the
/// saturation pressure stays below the total pressure (about 100 °C at
/// standard atmospheric pressure).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HylandWexler {
    pressure: f64,
}

/// Coefficients for saturation over ice, -100 °C to 0 °C.
const ICE: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843_0e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024_0e-13,
    4.163_501_9,
];

/// Coefficients for saturation over liquid water, 0 °C to 200 °C.
const WATER: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

const CELSIUS_OFFSET: f64 = 273.15;

impl Default for HylandWexler {
    fn default() -> Self {
        Self {
            pressure: STANDARD_PRESSURE,
        }
    }
}

impl HylandWexler {
    /// Creates a property model at the given total (barometric) pressure.
    #[must_use]
    pub fn new(pressure: Pressure) -> Self {
        Self {
            pressure: pressure.get::<pascal>(),
        }
    }

    /// Returns the total pressure used by this model.
    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure)
    }

    /// Returns the saturation pressure of water vapor at `temperature`, in Pa.
    #[must_use]
    pub fn saturation_pressure(&self, temperature: f64) -> f64 {
        let t = temperature + CELSIUS_OFFSET;
        let ln_p = if temperature < 0.0 {
            let [c1, c2, c3, c4, c5, c6, c7] = ICE;
            c1 / t + c2 + c3 * t + c4 * t.powi(2) + c5 * t.powi(3) + c6 * t.powi(4) + c7 * t.ln()
        } else {
            let [c8, c9, c10, c11, c12, c13] = WATER;
            c8 / t + c9 + c10 * t + c11 * t.powi(2) + c12 * t.powi(3) + c13 * t.ln()
        };
        ln_p.exp()
    }

    /// Derivative of the saturation pressure with respect to temperature, in Pa/K.
    fn saturation_pressure_slope(&self, temperature: f64) -> f64 {
        let t = temperature + CELSIUS_OFFSET;
        let d_ln_p = if temperature < 0.0 {
            let [c1, _, c3, c4, c5, c6, c7] = ICE;
            -c1 / t.powi(2)
                + c3
                + 2.0 * c4 * t
                + 3.0 * c5 * t.powi(2)
                + 4.0 * c6 * t.powi(3)
                + c7 / t
        } else {
            let [c8, _, c10, c11, c12, c13] = WATER;
            -c8 / t.powi(2) + c10 + 2.0 * c11 * t + 3.0 * c12 * t.powi(2) + c13 / t
        };
        self.saturation_pressure(temperature) * d_ln_p
    }
}

impl Psychrometrics for HylandWexler {
    fn humidity_ratio(&self, temperature: f64, relative_humidity: f64) -> f64 {
        let p_vapor = relative_humidity * self.saturation_pressure(temperature);
        MOLAR_MASS_RATIO * p_vapor / (self.pressure - p_vapor)
    }

    fn saturation_slope(&self, temperature: f64) -> f64 {
        let p_sat = self.saturation_pressure(temperature);
        MOLAR_MASS_RATIO * self.pressure / (self.pressure - p_sat).powi(2)
            * self.saturation_pressure_slope(temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::kilopascal;

    #[test]
    fn saturation_pressure_matches_reference_table() {
        let air = HylandWexler::default();

        // ASHRAE Fundamentals, saturation pressure of water.
        assert_relative_eq!(air.saturation_pressure(20.0), 2339.2, max_relative = 1e-3);
        assert_relative_eq!(air.saturation_pressure(0.0), 611.2, max_relative = 1e-3);
        assert_relative_eq!(air.saturation_pressure(-10.0), 259.9, max_relative = 1e-3);
        assert_relative_eq!(air.saturation_pressure(50.0), 12_352.0, max_relative = 1e-3);
    }

    #[test]
    fn ice_and_water_branches_meet_at_freezing() {
        let air = HylandWexler::default();
        assert_relative_eq!(
            air.saturation_pressure(-1e-9),
            air.saturation_pressure(0.0),
            max_relative = 1e-3
        );
    }

    #[test]
    fn humidity_ratio_of_dry_air_is_zero() {
        let air = HylandWexler::default();
        assert_relative_eq!(air.humidity_ratio(30.0, 0.0), 0.0);
    }

    #[test]
    fn humidity_ratio_at_design_conditions() {
        let air = HylandWexler::default();
        assert_relative_eq!(air.humidity_ratio(32.0, 0.5), 0.014_955, epsilon = 1e-6);
        assert_relative_eq!(air.humidity_ratio(24.0, 0.5), 0.009_299, epsilon = 1e-6);
        assert_relative_eq!(air.saturation_value(5.0), 0.005_402, epsilon = 1e-6);
    }

    #[test]
    fn saturation_slope_matches_finite_difference() {
        let air = HylandWexler::default();
        let h = 1e-5;

        for temperature in [-20.0, -5.0, 5.0, 15.0, 35.0] {
            let numeric = (air.saturation_value(temperature + h)
                - air.saturation_value(temperature - h))
                / (2.0 * h);
            assert_relative_eq!(
                air.saturation_slope(temperature),
                numeric,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn relative_humidity_inverts_humidity_ratio() {
        let air = HylandWexler::default();

        for (temperature, phi) in [(-5.0, 0.8), (12.0, 0.3), (24.0, 0.5), (40.0, 1.0)] {
            let w = air.humidity_ratio(temperature, phi);
            assert_relative_eq!(air.relative_humidity(temperature, w), phi, epsilon = 1e-12);
        }
    }

    #[test]
    fn lower_pressure_raises_humidity_ratio() {
        let sea_level = HylandWexler::default();
        let altitude = HylandWexler::new(Pressure::new::<kilopascal>(84.0));

        assert_relative_eq!(altitude.pressure().get::<kilopascal>(), 84.0);
        assert!(altitude.saturation_value(20.0) > sea_level.saturation_value(20.0));
    }
}
