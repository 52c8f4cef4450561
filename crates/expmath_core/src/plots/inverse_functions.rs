//! Inverse functions as the mirror image across `y = x`.
//!
//! A range slider picks two points on the mirror axis. Rays perpendicular to
//! the axis through those points hit the graph and its mirror image, and the
//! inverse is drawn between the two hits.

use std::f64::consts::SQRT_2;

use tracing::warn;

use crate::dashboard::{
    Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget,
};
use crate::sampling::{linspace, map};
use crate::special::lambert_w0;

const FUNCTION: &str = "function";
const INTERVAL: &str = "interval";

const DOMAIN: (f64, f64) = (-6.5, 6.5);
const SAMPLES: usize = 100;
const STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invertible {
    Line,
    Square,
    Exponential,
}

impl Choice for Invertible {
    const ALL: &'static [Self] = &[Invertible::Line, Invertible::Square, Invertible::Exponential];

    fn label(self) -> &'static str {
        match self {
            Invertible::Line => "Function 1",
            Invertible::Square => "Function 2",
            Invertible::Exponential => "Function 3",
        }
    }
}

impl Invertible {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Invertible::Line => 0.5 * x + 1.0,
            Invertible::Square => x * x,
            Invertible::Exponential => x.exp(),
        }
    }

    pub fn inverse(self, y: f64) -> f64 {
        match self {
            Invertible::Line => 2.0 * y - 2.0,
            Invertible::Square => y.sqrt(),
            Invertible::Exponential => y.ln(),
        }
    }

    /// Range of the position slider along the mirror axis.
    pub fn limits(self) -> (f64, f64) {
        match self {
            Invertible::Square => (0.0, 4.0),
            _ => (-4.0, 4.0),
        }
    }

    /// The `x` where the graph meets the ray `x + y = sqrt(2) t`.
    ///
    /// The exponential case needs Lambert W; a failed solve yields NaN.
    pub fn intersect(self, t: f64) -> f64 {
        let s = SQRT_2 * t;
        match self {
            Invertible::Line => 2.0 / 3.0 * (s - 1.0),
            Invertible::Square => -0.5 + (0.25 + s).sqrt(),
            Invertible::Exponential => match lambert_w0(s.exp()) {
                Ok(w) => s - w,
                Err(err) => {
                    warn!(%err, t, "no intersection with the exponential");
                    f64::NAN
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Original,
    Mirror,
}

#[derive(Debug, Clone, Default)]
pub struct InverseFunctions;

impl Visualization for InverseFunctions {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let (lo, hi) = Invertible::Line.limits();
        vec![
            Widget::buttons(FUNCTION, Invertible::Line),
            Widget::range_slider(
                INTERVAL,
                "Interval to invert",
                lo,
                hi,
                STEP,
                (lo + 1.0, hi - 1.0),
            ),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Original, &[FUNCTION]),
            Binding::new(Recompute::Mirror, &[FUNCTION, INTERVAL]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Invertible = snapshot.choice(FUNCTION)?;
        match which {
            Recompute::Original => {
                let x = linspace(DOMAIN.0, DOMAIN.1, SAMPLES);
                let y = map(&x, |x| function.eval(x));
                Ok(Update::new().sink("original", ColumnData::xy(x, y)))
            }
            Recompute::Mirror => {
                let (lo, hi) = snapshot.range(INTERVAL)?;
                let points = [lo, hi];
                let axis: Vec<f64> = points.iter().map(|t| t / SQRT_2).collect();

                // A hit (x, f(x)) on the graph mirrors to (f(x), x) on the inverse.
                let mut xs = Vec::with_capacity(2);
                let mut ys = Vec::with_capacity(2);
                let mut ends = Vec::with_capacity(2);
                for &t in &points {
                    let x = function.intersect(t);
                    let y = function.eval(x);
                    xs.push(vec![x, y]);
                    ys.push(vec![y, x]);
                    ends.push(y);
                }

                let x = linspace(ends[0], ends[1], SAMPLES);
                let y = map(&x, |x| function.inverse(x));
                Ok(Update::new()
                    .sink("axis_points", ColumnData::xy(axis.clone(), axis))
                    .sink("rays", ColumnData::lines(xs, ys))
                    .sink("inverse", ColumnData::xy(x, y)))
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(FUNCTION) {
            let function: Invertible = controls.choice(FUNCTION)?;
            let (lo, hi) = function.limits();
            controls.set_bounds(INTERVAL, Bounds::new(lo, hi, STEP))?;
            controls.set_range(INTERVAL, lo + 1.0, hi - 1.0)?;
        }
        Ok(())
    }
}
