//! Candidate trajectories of a falling body and the energy functional
//!
//! `J(y) = int_0^1 y'(t)^2 - 4 y(t) dt`
//!
//! evaluated on `y(t) = 1 - t^p`. All candidates meet the boundary values
//! `y(0) = 1`, `y(1) = 0`; only `p = 2` minimizes `J`.

use crate::dashboard::{
    Binding, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{linspace, map};

const POWER: &str = "power";

const SAMPLES: usize = 100;

/// `1 - t^p`.
pub fn trajectory(power: i32, t: f64) -> f64 {
    1.0 - t.powi(power)
}

/// `J(1 - t^p) = p^2 / (2p - 1) - 4 + 4 / (p + 1)`.
pub fn functional(power: i32) -> f64 {
    let p = f64::from(power);
    p * p / (2.0 * p - 1.0) - 4.0 + 4.0 / (p + 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Trajectory,
}

#[derive(Debug, Clone, Default)]
pub struct VariationalFormulation;

impl Visualization for VariationalFormulation {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![Widget::slider(POWER, "Power of the polynomial", 1.0, 6.0, 1.0, 1.0)]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Trajectory, &[POWER])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let power = snapshot.count(POWER)?.max(1) as i32;
        let t = linspace(0.0, 1.0, SAMPLES);
        let y = map(&t, |t| trajectory(power, t));
        let energy = functional(power);
        Ok(Update::new()
            .sink("trajectory", ColumnData::new().with("t", t).with("y", y))
            .text("function", format!("y(t) = 1 - t^{power}"))
            .text("functional", format!("J(y) = int_0^1 y'^2 - 4 y dt = {energy:.4}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};
    use crate::sampling::midpoint_rule;

    #[test]
    fn closed_form_matches_quadrature() {
        for power in 1..=6 {
            let p = f64::from(power);
            let integrand = |t: f64| {
                let slope = -p * t.powi(power - 1);
                slope * slope - 4.0 * trajectory(power, t)
            };
            let numeric = midpoint_rule(integrand, 0.0, 1.0, 20_000);
            assert!((numeric - functional(power)).abs() < 1e-6, "p = {power}");
        }
    }

    #[test]
    fn parabola_minimizes_the_functional() {
        assert_eq!(functional(1), -1.0);
        let best = (1..=6)
            .min_by(|&a, &b| functional(a).total_cmp(&functional(b)))
            .unwrap();
        assert_eq!(best, 2);
        assert!((functional(2) + 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn every_candidate_meets_the_boundary_values() {
        for power in 1..=6 {
            assert_eq!(trajectory(power, 0.0), 1.0);
            assert_eq!(trajectory(power, 1.0), 0.0);
        }
    }

    #[test]
    fn power_slider_updates_curve_and_labels() {
        let mut dashboard =
            Dashboard::new(VariationalFormulation, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_number(POWER, 2.0).unwrap();
        assert_eq!(frame.texts["function"], "y(t) = 1 - t^2");
        assert!(frame.texts["functional"].ends_with("= -1.3333"));
        let y = frame.sinks["trajectory"].values("y").unwrap();
        assert_eq!(y.len(), SAMPLES);
    }
}
