//! Sine, cosine and tangent read off the unit circle.

use std::f64::consts::PI;

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{linspace, map};

const FUNCTION: &str = "function";
const PHASE: &str = "phase";

/// Tangent values are clipped here so the curve stays drawable near poles.
const TANGENT_CLIP: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sine,
    Cosine,
    Tangent,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Sine, Function::Cosine, Function::Tangent];

    fn label(self) -> &'static str {
        match self {
            Function::Sine => "Sine",
            Function::Cosine => "Cosine",
            Function::Tangent => "Tangent",
        }
    }
}

impl Function {
    pub fn eval(self, phi: f64) -> f64 {
        match self {
            Function::Sine => phi.sin(),
            Function::Cosine => phi.cos(),
            Function::Tangent => phi.tan().clamp(-TANGENT_CLIP, TANGENT_CLIP),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Circle,
}

#[derive(Debug, Clone, Default)]
pub struct TrigonometricFunctions;

impl Visualization for TrigonometricFunctions {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FUNCTION, Function::Sine),
            Widget::slider(PHASE, "Angle (multiples of pi)", 0.0, 4.0, 0.05, 0.25),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Circle, &[FUNCTION, PHASE])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        let phi = snapshot.number(PHASE)? * PI;

        let x = linspace(0.0, phi, 100);
        let y = map(&x, |t| function.eval(t));

        let (cos, sin) = (phi.cos(), phi.sin());
        let triangle = ColumnData::xy(vec![0.0, cos, cos, 0.0], vec![0.0, 0.0, sin, 0.0]);
        let marker = match function {
            Function::Sine => ColumnData::lines(vec![vec![cos, cos]], vec![vec![0.0, sin]]),
            Function::Cosine => ColumnData::lines(vec![vec![0.0, cos]], vec![vec![0.0, 0.0]]),
            Function::Tangent => ColumnData::lines(
                vec![vec![1.0, 1.0]],
                vec![vec![0.0, function.eval(phi)]],
            ),
        };
        let highlight = ColumnData::xy(vec![phi], vec![function.eval(phi)]);

        Ok(Update::new()
            .sink("curve", ColumnData::xy(x, y))
            .sink("triangle", triangle)
            .sink("marker", marker)
            .sink("highlight", highlight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn curve_ends_at_the_angle() {
        let mut dashboard =
            Dashboard::new(TrigonometricFunctions, DashboardSettings::default()).unwrap();
        let frame = dashboard.populate().unwrap();
        let curve = &frame.sinks["curve"];
        let x = curve.values("x").unwrap();
        assert_eq!(x.len(), 100);
        assert!((x[99] - PI / 4.0).abs() < 1e-12);
        let highlight = frame.sinks["highlight"].values("y").unwrap()[0];
        assert!((highlight - (PI / 4.0).sin()).abs() < 1e-12);
    }

    #[test]
    fn tangent_is_clipped_at_pole() {
        assert_eq!(Function::Tangent.eval(PI / 2.0), TANGENT_CLIP);
    }
}
