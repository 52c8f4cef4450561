//! Left, right and central secants around a point, to compare one-sided
//! difference quotients of smooth and kinked functions.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{guarded_div, linspace, map};

const FUNCTION: &str = "function";
const POINT: &str = "point";
const SPACING: &str = "spacing";

/// Length by which each secant extends past its two anchor points.
const OVERHANG: f64 = 0.3;
const DOT_BASELINE: f64 = -3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Gaussian,
    Absolute,
    Piecewise,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Gaussian, Function::Absolute, Function::Piecewise];

    fn label(self) -> &'static str {
        match self {
            Function::Gaussian => "exp(-(x-1)^2)",
            Function::Absolute => "|x|",
            Function::Piecewise => "x^2/3 | -x + 4/3",
        }
    }
}

impl Function {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Function::Gaussian => (-(x - 1.0).powi(2)).exp(),
            Function::Absolute => x.abs(),
            Function::Piecewise => {
                if x < 1.0 {
                    x * x / 3.0
                } else {
                    -x + 4.0 / 3.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Curve,
    Secants,
}

#[derive(Debug, Clone, Default)]
pub struct Differentiability;

/// Segment through `(x0, y0)` and `(x1, y1)` extended by `OVERHANG` on both sides.
fn secant(x0: f64, y0: f64, x1: f64, y1: f64) -> (Vec<f64>, Vec<f64>) {
    let slope = guarded_div(y1 - y0, x1 - x0);
    let start = x0.min(x1) - OVERHANG;
    let end = x0.max(x1) + OVERHANG;
    (
        vec![start, end],
        vec![y0 + slope * (start - x0), y0 + slope * (end - x0)],
    )
}

impl Visualization for Differentiability {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FUNCTION, Function::Gaussian),
            Widget::slider(POINT, "Point", -4.0, 4.0, 0.1, 0.0),
            Widget::slider(SPACING, "Spacing", 0.001, 2.0, 0.05, 0.5),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Curve, &[FUNCTION]),
            Binding::new(Recompute::Secants, &[FUNCTION, POINT, SPACING]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        match which {
            Recompute::Curve => {
                let x = linspace(-5.0, 5.0, 200);
                let y = map(&x, |x| function.eval(x));
                Ok(Update::new().sink("curve", ColumnData::xy(x, y)))
            }
            Recompute::Secants => {
                let point = snapshot.number(POINT)?;
                let spacing = snapshot.number(SPACING)?;
                let left = point - spacing;
                let right = point + spacing;
                let (fl, fm, fr) = (function.eval(left), function.eval(point), function.eval(right));

                let segments = [
                    secant(left, fl, point, fm),
                    secant(point, fm, right, fr),
                    secant(left, fl, right, fr),
                ];
                let (xs, ys): (Vec<_>, Vec<_>) = segments.into_iter().unzip();
                let secants = ColumnData::lines(xs, ys)
                    .with(
                        "color",
                        vec!["blue".to_string(), "red".to_string(), "green".to_string()],
                    )
                    .with("line_width", vec![2.0, 2.0, 1.0]);

                let dots = ColumnData::xy(
                    vec![left, point, right, left, point, right],
                    vec![fl, fm, fr, DOT_BASELINE, DOT_BASELINE, DOT_BASELINE],
                );
                let quotients = format!(
                    "left: {:.4}, right: {:.4}, central: {:.4}",
                    guarded_div(fm - fl, spacing),
                    guarded_div(fr - fm, spacing),
                    guarded_div(fr - fl, 2.0 * spacing)
                );
                Ok(Update::new()
                    .sink("secants", secants)
                    .sink("dots", dots)
                    .text("quotients", quotients))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn kink_gives_opposite_one_sided_slopes() {
        let mut dashboard = Dashboard::new(Differentiability, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_choice(FUNCTION, Function::Absolute).unwrap();
        assert_eq!(frame.recomputes, 2);

        let secants = &frame.sinks["secants"];
        let ys = secants.polylines("ys").unwrap();
        let xs = secants.polylines("xs").unwrap();
        let slope = |i: usize| (ys[i][1] - ys[i][0]) / (xs[i][1] - xs[i][0]);
        assert!(slope(0) < -0.99);
        assert!(slope(1) > 0.99);
        assert!(slope(2).abs() < 1e-9);
    }

    #[test]
    fn tiny_spacing_stays_finite() {
        let snapshot = Snapshot::from_widgets(&Differentiability.widgets())
            .with(SPACING, crate::dashboard::WidgetValue::Number(0.0))
            .with(FUNCTION, crate::dashboard::WidgetValue::Index(1));
        let update = Differentiability
            .recompute(Recompute::Secants, &snapshot)
            .unwrap();
        let secants = update.entry("secants").unwrap();
        for line in secants.polylines("ys").unwrap() {
            assert!(line.iter().all(|v| v.is_finite()));
        }
        assert_eq!(update.entry("dots").unwrap().len(), 6);
    }
}
