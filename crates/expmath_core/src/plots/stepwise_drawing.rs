//! Drawing a composite function one building block at a time.

use crate::dashboard::{
    Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget,
};
use crate::sampling::{linspace, map};

const FUNCTION: &str = "function";
const STEP: &str = "step";

const DOMAIN: (f64, f64) = (-5.0, 5.0);
const SAMPLES: usize = 300;
/// Sinks `step_1` to `step_4`; the longest construction has four steps.
const MAX_STEPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    InverseRoot,
    ShiftedSineSquared,
    ShiftedReciprocal,
    Logistic,
}

impl Choice for Composite {
    const ALL: &'static [Self] = &[
        Composite::InverseRoot,
        Composite::ShiftedSineSquared,
        Composite::ShiftedReciprocal,
        Composite::Logistic,
    ];

    fn label(self) -> &'static str {
        match self {
            Composite::InverseRoot => "1 / sqrt(1 + x^2)",
            Composite::ShiftedSineSquared => "sin^2(x + pi/2)",
            Composite::ShiftedReciprocal => "1 / (x^2 - 2)",
            Composite::Logistic => "e^x / (1 + e^x)",
        }
    }
}

impl Composite {
    /// LaTeX of every intermediate function, the last one being the composite.
    pub fn steps(self) -> &'static [&'static str] {
        match self {
            Composite::InverseRoot => &[
                "x^2",
                "1 + x^2",
                "\\sqrt{1 + x^2}",
                "\\frac{1}{\\sqrt{1 + x^2}}",
            ],
            Composite::ShiftedSineSquared => &[
                "\\sin(x)",
                "\\sin\\left(x + \\frac{\\pi}{2}\\right)",
                "\\sin^2\\left(x + \\frac{\\pi}{2}\\right)",
            ],
            Composite::ShiftedReciprocal => &["x^2", "x^2 - 2", "\\frac{1}{x^2 - 2}"],
            Composite::Logistic => &[
                "{\\rm e}^x",
                "1 + {\\rm e}^x",
                "\\frac{1}{1 + {\\rm e}^x}",
                "\\frac{{\\rm e}^x}{1 + {\\rm e}^x}",
            ],
        }
    }

    /// Evaluates the intermediate function of zero-based `step`.
    pub fn eval(self, step: usize, x: f64) -> f64 {
        use std::f64::consts::FRAC_PI_2;
        match (self, step) {
            (Composite::InverseRoot, 0) => x * x,
            (Composite::InverseRoot, 1) => 1.0 + x * x,
            (Composite::InverseRoot, 2) => (1.0 + x * x).sqrt(),
            (Composite::InverseRoot, _) => (1.0 + x * x).sqrt().recip(),
            (Composite::ShiftedSineSquared, 0) => x.sin(),
            (Composite::ShiftedSineSquared, 1) => (x + FRAC_PI_2).sin(),
            (Composite::ShiftedSineSquared, _) => (x + FRAC_PI_2).sin().powi(2),
            (Composite::ShiftedReciprocal, 0) => x * x,
            (Composite::ShiftedReciprocal, 1) => x * x - 2.0,
            (Composite::ShiftedReciprocal, _) => (x * x - 2.0).recip(),
            (Composite::Logistic, 0) => x.exp(),
            (Composite::Logistic, 1) => 1.0 + x.exp(),
            (Composite::Logistic, 2) => (1.0 + x.exp()).recip(),
            (Composite::Logistic, _) => x.exp() / (1.0 + x.exp()),
        }
    }

    fn step_bounds(self) -> Bounds {
        Bounds::new(1.0, self.steps().len() as f64, 1.0)
    }
}

fn step_key(step: usize) -> String {
    format!("step_{}", step + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Steps,
}

#[derive(Debug, Clone, Default)]
pub struct StepwiseDrawing;

impl Visualization for StepwiseDrawing {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let bounds = Composite::InverseRoot.step_bounds();
        vec![
            Widget::buttons(FUNCTION, Composite::InverseRoot),
            Widget::slider(STEP, "Step", bounds.start, bounds.end, bounds.step, 1.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Steps, &[FUNCTION, STEP])]
    }

    /// Steps up to the current one are drawn, later sinks are emptied.
    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let composite: Composite = snapshot.choice(FUNCTION)?;
        let drawn = snapshot.count(STEP)?.clamp(1, composite.steps().len());
        let x = linspace(DOMAIN.0, DOMAIN.1, SAMPLES);
        let update = (0..MAX_STEPS).fold(Update::new(), |update, step| {
            let data = if step < drawn {
                ColumnData::xy(x.clone(), map(&x, |x| composite.eval(step, x)))
            } else {
                ColumnData::xy(Vec::new(), Vec::new())
            };
            update.sink(&step_key(step), data)
        });
        Ok(update.text("label", format!("f(x) = {}", composite.steps()[drawn - 1])))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(FUNCTION) {
            let composite: Composite = controls.choice(FUNCTION)?;
            controls.set_bounds(STEP, composite.step_bounds())?;
            controls.set_number(STEP, 1.0)?;
        }
        Ok(())
    }
}
