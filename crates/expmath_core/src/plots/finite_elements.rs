//! Linear finite elements: hat functions scaled to the nodal values of a
//! known solution and the piecewise linear interpolant they add up to.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{interpolate, linspace, map};

const SOLUTION: &str = "solution";
const ELEMENTS: &str = "elements";

const DOMAIN: (f64, f64) = (0.0, 4.0);
const SOLUTION_SAMPLES: usize = 50;
const ERROR_SAMPLES: usize = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solution {
    Parabola,
    Line,
}

impl Choice for Solution {
    const ALL: &'static [Self] = &[Solution::Parabola, Solution::Line];

    fn label(self) -> &'static str {
        match self {
            Solution::Parabola => "Function 1",
            Solution::Line => "Function 2",
        }
    }
}

impl Solution {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Solution::Parabola => -0.5 * (x - 2.0).powi(2) + 2.0,
            Solution::Line => x,
        }
    }
}

/// Mesh nodes for `hats` interior hat functions; both ends are nodes too.
pub fn nodes(hats: usize) -> Vec<f64> {
    linspace(DOMAIN.0, DOMAIN.1, hats + 2)
}

/// Largest deviation of the nodal interpolant from the solution.
pub fn max_error(solution: Solution, hats: usize) -> f64 {
    let x = nodes(hats);
    let y = map(&x, |x| solution.eval(x));
    linspace(DOMAIN.0, DOMAIN.1, ERROR_SAMPLES)
        .into_iter()
        .map(|s| (solution.eval(s) - interpolate(&x, &y, s)).abs())
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Solution,
    Elements,
}

#[derive(Debug, Clone, Default)]
pub struct FiniteElements;

impl Visualization for FiniteElements {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SOLUTION, Solution::Parabola),
            Widget::slider(ELEMENTS, "Number of finite elements", 1.0, 25.0, 1.0, 3.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Solution, &[SOLUTION]),
            Binding::new(Recompute::Elements, &[SOLUTION, ELEMENTS]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let solution: Solution = snapshot.choice(SOLUTION)?;
        match which {
            Recompute::Solution => {
                let x = linspace(DOMAIN.0, DOMAIN.1, SOLUTION_SAMPLES);
                let y = map(&x, |x| solution.eval(x));
                Ok(Update::new().sink("exact", ColumnData::xy(x, y)))
            }
            Recompute::Elements => {
                let hats = snapshot.count(ELEMENTS)?;
                let x = nodes(hats);
                let y = map(&x, |x| solution.eval(x));
                let (xs, ys) = x
                    .windows(3)
                    .zip(y.windows(3))
                    .map(|(x, y)| (x.to_vec(), vec![0.0, y[1], 0.0]))
                    .unzip();
                Ok(Update::new()
                    .sink("hats", ColumnData::lines(xs, ys))
                    .sink("interpolant", ColumnData::xy(x, y))
                    .text(
                        "max_error",
                        format!("Maximum error: {:.4}", max_error(solution, hats)),
                    ))
            }
        }
    }
}
