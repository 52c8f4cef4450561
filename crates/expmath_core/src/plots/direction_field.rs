//! Direction fields of first order ODEs `y' = f(x, y)` with the exact
//! solution through a chosen initial point.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{grid, linspace};
use crate::traits::DynamicalSystem;

const FIELD: &str = "field";
const X0: &str = "x0";
const Y0: &str = "y0";

const DOMAIN: (f64, f64) = (-10.0, 10.0);
const GRID_POINTS: usize = 21;
const ARROW_LENGTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Growth,
    Parabola,
    Linear,
}

impl Choice for Field {
    const ALL: &'static [Self] = &[Field::Growth, Field::Parabola, Field::Linear];

    fn label(self) -> &'static str {
        match self {
            Field::Growth => "y' = y / 3",
            Field::Parabola => "y' = x",
            Field::Linear => "y' = x + y",
        }
    }
}

impl Field {
    pub fn slope(self, x: f64, y: f64) -> f64 {
        match self {
            Field::Growth => y / 3.0,
            Field::Parabola => x,
            Field::Linear => x + y,
        }
    }

    /// Closed form solution through `(x0, y0)`.
    pub fn solution(self, x0: f64, y0: f64, x: f64) -> f64 {
        match self {
            Field::Growth => y0 * ((x - x0) / 3.0).exp(),
            Field::Parabola => y0 + 0.5 * (x * x - x0 * x0),
            Field::Linear => (x0 + y0 + 1.0) * (x - x0).exp() - x - 1.0,
        }
    }
}

/// The scalar ODE seen as a one dimensional system with `x` as time.
impl DynamicalSystem<f64> for Field {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        out[0] = self.slope(t, x[0]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Arrows,
    Solution,
}

#[derive(Debug, Clone, Default)]
pub struct DirectionField;

impl Visualization for DirectionField {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FIELD, Field::Growth),
            Widget::slider(X0, "Initial x", -5.0, 5.0, 0.05, 0.0),
            Widget::slider(Y0, "Initial y", -5.0, 5.0, 0.05, 1.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Arrows, &[FIELD]),
            Binding::new(Recompute::Solution, &[FIELD, X0, Y0]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let field: Field = snapshot.choice(FIELD)?;
        match which {
            Recompute::Arrows => {
                let mut slope = [0.0];
                let (xs, ys): (Vec<_>, Vec<_>) = grid(DOMAIN.0, DOMAIN.1, GRID_POINTS)
                    .into_iter()
                    .map(|(x, y)| {
                        field.apply(x, &[y], &mut slope);
                        let norm = (1.0 + slope[0] * slope[0]).sqrt();
                        let dx = 0.5 * ARROW_LENGTH / norm;
                        let dy = slope[0] * dx;
                        (vec![x - dx, x + dx], vec![y - dy, y + dy])
                    })
                    .unzip();
                Ok(Update::new().sink("arrows", ColumnData::lines(xs, ys)))
            }
            Recompute::Solution => {
                let x0 = snapshot.number(X0)?;
                let y0 = snapshot.number(Y0)?;
                let x = linspace(DOMAIN.0, DOMAIN.1, 100);
                let y = x.iter().map(|&x| field.solution(x0, y0, x)).collect();
                Ok(Update::new()
                    .sink("solution", ColumnData::xy(x, y))
                    .sink("initial", ColumnData::xy(vec![x0], vec![y0])))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::ExplicitEuler;
    use crate::traits::Steppable;

    #[test]
    fn solutions_pass_through_initial_point() {
        for field in Field::ALL.iter().copied() {
            assert!((field.solution(1.5, -2.0, 1.5) + 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn closed_forms_match_numerical_integration() {
        for field in Field::ALL.iter().copied() {
            let mut solver = ExplicitEuler::new(field.dimension());
            let mut x = 0.0;
            let mut y = vec![1.0];
            let steps = 20_000;
            let dx = 1.0 / steps as f64;
            for _ in 0..steps {
                solver.step(&field, &mut x, &mut y, dx);
            }
            let exact = field.solution(0.0, 1.0, 1.0);
            assert!((y[0] - exact).abs() < 1e-3, "{field:?}: {} vs {exact}", y[0]);
        }
    }

    #[test]
    fn arrow_grid_covers_the_domain() {
        let snapshot = Snapshot::from_widgets(&DirectionField.widgets());
        let update = DirectionField.recompute(Recompute::Arrows, &snapshot).unwrap();
        let arrows = update.entry("arrows").unwrap();
        assert_eq!(arrows.len(), GRID_POINTS * GRID_POINTS);
        let xs = arrows.polylines("xs").unwrap();
        let ys = arrows.polylines("ys").unwrap();
        let length = ((xs[7][1] - xs[7][0]).powi(2) + (ys[7][1] - ys[7][0]).powi(2)).sqrt();
        assert!((length - ARROW_LENGTH).abs() < 1e-12);
    }
}
