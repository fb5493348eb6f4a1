//! Linearized balance equations of the air-handling unit.
//!
//! The unit is modeled as a chain of five control volumes:
//!
//! - `MX1`: outdoor and recirculated air mix to the mixed state `M`.
//! - `CC`: the cooling coil takes the non-bypassed part of `M` to the
//!   saturated state `s`.
//! - `MX2`: the coil and bypass streams mix to the coil-leaving state `C`.
//! - `HC`: the reheat coil takes `C` to the supply state `S`.
//! - `TZ`: the thermal zone takes `S` to the indoor state `I`.
//!
//! The building envelope (`BL`) and two proportional controllers close the
//! system: `Kθ` drives the cooling coil from the indoor temperature error and
//! `Kw` drives the reheat coil from the indoor humidity error.
//!
//! The only nonlinearity is the saturation curve at the coil outlet, which is
//! replaced by its tangent at a guessed saturation temperature `θs0`.

use crate::support::psychro::Psychrometrics;

use super::{
    scenario::Scenario,
    state::{HeatFlow, Station},
    system::{LinearSystem, Matrix, Vector},
};

const TM: usize = Station::Mixed.temperature_index();
const WM: usize = Station::Mixed.humidity_index();
const TS_SAT: usize = Station::Saturation.temperature_index();
const WS_SAT: usize = Station::Saturation.humidity_index();
const TC: usize = Station::CoilLeaving.temperature_index();
const WC: usize = Station::CoilLeaving.humidity_index();
const TS: usize = Station::Supply.temperature_index();
const WS: usize = Station::Supply.humidity_index();
const TI: usize = Station::Indoor.temperature_index();
const WI: usize = Station::Indoor.humidity_index();
const QT_CC: usize = HeatFlow::CoilTotal.index();
const QS_CC: usize = HeatFlow::CoilSensible.index();
const QL_CC: usize = HeatFlow::CoilLatent.index();
const QS_HC: usize = HeatFlow::ReheatSensible.index();
const QS_TZ: usize = HeatFlow::ZoneSensible.index();
const QL_TZ: usize = HeatFlow::ZoneLatent.index();

/// Builds the balance system for the scenario's working parameters,
/// linearizing the saturation curve at `saturation_temperature` (°C).
///
/// Rows hold one balance each: sensible then latent for every control
/// volume, the coil load split, the envelope, and the two controllers.
#[must_use]
pub fn build<P: Psychrometrics>(
    scenario: &Scenario,
    psychro: &P,
    saturation_temperature: f64,
) -> LinearSystem {
    let raw = scenario.raw();
    let (m, mo, beta, c, l) = (raw.m, raw.mo, raw.beta, raw.c, raw.l);

    let theta_s0 = saturation_temperature;
    let slope = psychro.saturation_slope(theta_s0);
    let w_o = psychro.humidity_ratio(raw.theta_o, raw.phi_o);
    let w_i_sp = psychro.humidity_ratio(raw.theta_i_sp, raw.phi_i_sp);

    let mut a = Matrix::zeros();
    let mut b = Vector::zeros();

    // MX1
    a[(0, TM)] = m * c;
    a[(0, TI)] = -(m - mo) * c;
    b[0] = mo * c * raw.theta_o;

    a[(1, WM)] = m * l;
    a[(1, WI)] = -(m - mo) * l;
    b[1] = mo * l * w_o;

    // CC
    a[(2, TM)] = (1.0 - beta) * m * c;
    a[(2, TS_SAT)] = -(1.0 - beta) * m * c;
    a[(2, QS_CC)] = 1.0;

    a[(3, WM)] = (1.0 - beta) * m * l;
    a[(3, WS_SAT)] = -(1.0 - beta) * m * l;
    a[(3, QL_CC)] = 1.0;

    // Tangent to the saturation curve at θs0.
    a[(4, TS_SAT)] = slope;
    a[(4, WS_SAT)] = -1.0;
    b[4] = slope * theta_s0 - psychro.saturation_value(theta_s0);

    a[(5, QT_CC)] = -1.0;
    a[(5, QS_CC)] = 1.0;
    a[(5, QL_CC)] = 1.0;

    // MX2
    a[(6, TM)] = beta * m * c;
    a[(6, TS_SAT)] = (1.0 - beta) * m * c;
    a[(6, TC)] = -m * c;

    a[(7, WM)] = beta * m * l;
    a[(7, WS_SAT)] = (1.0 - beta) * m * l;
    a[(7, WC)] = -m * l;

    // HC
    a[(8, TC)] = m * c;
    a[(8, TS)] = -m * c;
    a[(8, QS_HC)] = 1.0;

    a[(9, WC)] = m * l;
    a[(9, WS)] = -m * l;

    // TZ
    a[(10, TS)] = m * c;
    a[(10, TI)] = -m * c;
    a[(10, QS_TZ)] = 1.0;

    a[(11, WS)] = m * l;
    a[(11, WI)] = -m * l;
    a[(11, QL_TZ)] = 1.0;

    // BL
    let envelope = raw.ua + raw.mi * c;
    a[(12, TI)] = envelope;
    a[(12, QS_TZ)] = 1.0;
    b[12] = envelope * raw.theta_o + raw.q_sa;

    a[(13, WI)] = raw.mi * l;
    a[(13, QL_TZ)] = 1.0;
    b[13] = raw.mi * l * w_o + raw.q_la;

    // Controllers
    a[(14, TI)] = raw.k_theta;
    a[(14, QT_CC)] = 1.0;
    b[14] = raw.k_theta * raw.theta_i_sp;

    a[(15, WI)] = raw.k_w;
    a[(15, QS_HC)] = 1.0;
    b[15] = raw.k_w * w_i_sp;

    LinearSystem::new(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

    use crate::{
        models::hvac::ahu::core::{LinearError, test_support::design_scenario},
        support::psychro::HylandWexler,
    };

    #[test]
    fn design_system_solves() {
        let psychro = HylandWexler::default();
        let system = build(&design_scenario(), &psychro, 5.0);

        let state = system.solve().unwrap();
        let x = state.as_array();

        // The large temperature gain pins the indoor temperature to its setpoint.
        assert_relative_eq!(x[TI], 24.0, epsilon = 1e-4);
        assert!(x[TS_SAT] < x[TC] && x[TC] < x[TM]);
        assert!(x[QT_CC] < 0.0);
        assert_relative_eq!(x[QT_CC], x[QS_CC] + x[QL_CC], max_relative = 1e-9);
    }

    #[test]
    fn solution_satisfies_every_balance() {
        let psychro = HylandWexler::default();
        let system = build(&design_scenario(), &psychro, 5.0);
        let state = system.solve().unwrap();

        let x = state.to_vector();
        let residuals = system.residuals(&state);
        for (i, residual) in residuals.iter().enumerate() {
            let scale = system
                .matrix()
                .row(i)
                .iter()
                .zip(x.iter())
                .map(|(a, x)| (a * x).abs())
                .fold(system.rhs()[i].abs(), f64::max)
                .max(1.0);
            assert!(
                residual.abs() <= 1e-8 * scale,
                "row {i}: residual {residual} exceeds scale {scale}"
            );
        }
    }

    #[test]
    fn tangent_row_touches_the_saturation_curve() {
        let psychro = HylandWexler::default();
        let system = build(&design_scenario(), &psychro, 10.0);

        let matrix = system.matrix();
        let on_curve = matrix[(4, TS_SAT)] * 10.0 - psychro.saturation_value(10.0);
        assert_relative_eq!(on_curve, system.rhs()[4], max_relative = 1e-12);
    }

    #[test]
    fn zero_mass_flow_is_singular() {
        let psychro = HylandWexler::default();
        let scenario = design_scenario()
            .with_mass_flow(MassRate::new::<kilogram_per_second>(0.0))
            .unwrap();

        let system = build(&scenario, &psychro, 5.0);

        assert_eq!(system.solve(), Err(LinearError::SingularSystem));
    }
}
