//! A function shown next to its derivative and an antiderivative, with
//! tangents, signed areas and the midpoint-rule integral between two marks.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{linspace, map, midpoint_rule};

const FUNCTION: &str = "function";
const LEFT: &str = "left";
const RIGHT: &str = "right";

const TANGENT_HALF_LENGTH: f64 = 0.5;
const AREA_SAMPLES: usize = 50;
const QUADRATURE_PANELS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Linear,
    Trigonometric,
    Exponential,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Linear, Function::Trigonometric, Function::Exponential];

    fn label(self) -> &'static str {
        match self {
            Function::Linear => "f(x) = x",
            Function::Trigonometric => "f(x) = sin(2x)",
            Function::Exponential => "f(x) = exp(x)",
        }
    }
}

impl Function {
    pub fn derivative(self, x: f64) -> f64 {
        match self {
            Function::Linear => 1.0,
            Function::Trigonometric => 2.0 * (2.0 * x).cos(),
            Function::Exponential => x.exp(),
        }
    }

    pub fn value(self, x: f64) -> f64 {
        match self {
            Function::Linear => x,
            Function::Trigonometric => (2.0 * x).sin(),
            Function::Exponential => x.exp(),
        }
    }

    pub fn antiderivative(self, x: f64) -> f64 {
        match self {
            Function::Linear => 0.5 * x * x,
            Function::Trigonometric => -0.5 * (2.0 * x).cos(),
            Function::Exponential => x.exp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Curves,
    Markers,
}

#[derive(Debug, Clone, Default)]
pub struct IntegralsAndDerivatives;

fn tangent(x: f64, y: f64, slope: f64) -> (Vec<f64>, Vec<f64>) {
    let dx = TANGENT_HALF_LENGTH / (1.0 + slope * slope).sqrt();
    (vec![x - dx, x + dx], vec![y - slope * dx, y + slope * dx])
}

impl Visualization for IntegralsAndDerivatives {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FUNCTION, Function::Linear),
            Widget::slider(LEFT, "Left bound", -3.0, 3.0, 0.01, 0.0),
            Widget::slider(RIGHT, "Right bound", -3.0, 3.0, 0.01, 1.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Curves, &[FUNCTION]),
            Binding::new(Recompute::Markers, &[FUNCTION, LEFT, RIGHT]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        match which {
            Recompute::Curves => {
                let x = linspace(-3.0, 3.0, 50);
                Ok(Update::new()
                    .sink(
                        "derivative",
                        ColumnData::xy(x.clone(), map(&x, |x| function.derivative(x))),
                    )
                    .sink(
                        "function",
                        ColumnData::xy(x.clone(), map(&x, |x| function.value(x))),
                    )
                    .sink(
                        "antiderivative",
                        ColumnData::xy(x.clone(), map(&x, |x| function.antiderivative(x))),
                    ))
            }
            Recompute::Markers => {
                let left = snapshot.number(LEFT)?;
                let right = snapshot.number(RIGHT)?;
                let marks = vec![left, right];

                let dots = |f: &dyn Fn(f64) -> f64| ColumnData::xy(marks.clone(), map(&marks, f));

                let mut tangent_xs = Vec::new();
                let mut tangent_ys = Vec::new();
                for &x in &marks {
                    let (tx, ty) = tangent(x, function.value(x), function.derivative(x));
                    tangent_xs.push(tx);
                    tangent_ys.push(ty);
                    let (tx, ty) = tangent(x, function.antiderivative(x), function.value(x));
                    tangent_xs.push(tx);
                    tangent_ys.push(ty);
                }

                let band = linspace(left.min(right), left.max(right), AREA_SAMPLES);
                let values = map(&band, |x| function.value(x));
                let positive = ColumnData::new()
                    .with("x", band.clone())
                    .with("lower", vec![0.0; band.len()])
                    .with("upper", values.iter().map(|v| v.max(0.0)).collect::<Vec<_>>());
                let negative = ColumnData::new()
                    .with("x", band.clone())
                    .with("lower", values.iter().map(|v| v.min(0.0)).collect::<Vec<_>>())
                    .with("upper", vec![0.0; band.len()]);

                let verticals = ColumnData::lines(
                    vec![vec![left, left], vec![right, right]],
                    vec![
                        vec![function.value(left), function.antiderivative(left)],
                        vec![function.value(right), function.antiderivative(right)],
                    ],
                );

                let area = midpoint_rule(|x| function.value(x), left, right, QUADRATURE_PANELS);
                let exact = function.antiderivative(right) - function.antiderivative(left);

                Ok(Update::new()
                    .sink("derivative_dots", dots(&|x| function.derivative(x)))
                    .sink("function_dots", dots(&|x| function.value(x)))
                    .sink("antiderivative_dots", dots(&|x| function.antiderivative(x)))
                    .sink("tangents", ColumnData::lines(tangent_xs, tangent_ys))
                    .sink("positive_area", positive)
                    .sink("negative_area", negative)
                    .sink("verticals", verticals)
                    .text(
                        "area",
                        format!("integral from {left:.2} to {right:.2}: {area:.4} (F(b) - F(a) = {exact:.4})"),
                    ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antiderivatives_match_their_functions() {
        for function in Function::ALL.iter().copied() {
            for &x in &[-1.5, 0.0, 0.7, 2.0] {
                let h = 1e-5;
                let fd = (function.antiderivative(x + h) - function.antiderivative(x - h)) / (2.0 * h);
                assert!((fd - function.value(x)).abs() < 1e-6, "{function:?} at {x}");
                let fd = (function.value(x + h) - function.value(x - h)) / (2.0 * h);
                assert!((fd - function.derivative(x)).abs() < 1e-6, "{function:?} at {x}");
            }
        }
    }

    #[test]
    fn quadrature_agrees_with_antiderivative() {
        let snapshot = Snapshot::from_widgets(&IntegralsAndDerivatives.widgets());
        let update = IntegralsAndDerivatives
            .recompute(Recompute::Markers, &snapshot)
            .unwrap();
        assert_eq!(
            update.text_of("area"),
            Some("integral from 0.00 to 1.00: 0.5000 (F(b) - F(a) = 0.5000)")
        );
        assert_eq!(update.entry("tangents").unwrap().len(), 4);
    }
}
