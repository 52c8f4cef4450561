//! Lower and upper Riemann sums over an adjustable interval.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{linspace, map};

const FUNCTION: &str = "function";
const INTERVAL: &str = "interval";
const BOXES: &str = "boxes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Identity,
    ArcTangent,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Identity, Function::ArcTangent];

    fn label(self) -> &'static str {
        match self {
            Function::Identity => "f(x) = x",
            Function::ArcTangent => "f(x) = arctan(x)",
        }
    }
}

impl Function {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Function::Identity => x,
            Function::ArcTangent => x.atan(),
        }
    }
}

/// Box centres, the shared width and the left and right heights.
///
/// Both functions are increasing, so the left endpoint gives the lower
/// sum and the right endpoint the upper one.
pub struct Boxes {
    pub centres: Vec<f64>,
    pub width: f64,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Boxes {
    pub fn new(function: Function, start: f64, end: f64, count: usize) -> Self {
        let count = count.max(1);
        let width = (end - start) / count as f64;
        let lefts: Vec<f64> = (0..count).map(|i| start + width * i as f64).collect();
        Self {
            centres: lefts.iter().map(|x| x + width / 2.0).collect(),
            width,
            lower: map(&lefts, |x| function.eval(x)),
            upper: map(&lefts, |x| function.eval(x + width)),
        }
    }

    pub fn lower_sum(&self) -> f64 {
        self.lower.iter().sum::<f64>() * self.width
    }

    pub fn upper_sum(&self) -> f64 {
        self.upper.iter().sum::<f64>() * self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Graph,
    Sums,
}

#[derive(Debug, Clone, Default)]
pub struct RiemannSums;

impl Visualization for RiemannSums {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FUNCTION, Function::Identity),
            Widget::range_slider(INTERVAL, "Interval", -5.0, 5.0, 0.1, (1.0, 3.0)),
            Widget::slider(BOXES, "Number of boxes", 1.0, 50.0, 1.0, 2.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Graph, &[FUNCTION]),
            Binding::new(Recompute::Sums, &[FUNCTION, INTERVAL, BOXES]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        match which {
            Recompute::Graph => {
                let x = linspace(-5.0, 5.0, 50);
                let y = map(&x, |x| function.eval(x));
                Ok(Update::new().sink("graph", ColumnData::xy(x, y)))
            }
            Recompute::Sums => {
                let (start, end) = snapshot.range(INTERVAL)?;
                let boxes = Boxes::new(function, start, end, snapshot.count(BOXES)?);
                let widths = vec![boxes.width; boxes.centres.len()];
                let lower = ColumnData::new()
                    .with("x", boxes.centres.clone())
                    .with("width", widths.clone())
                    .with("height", boxes.lower.clone());
                let upper = ColumnData::new()
                    .with("x", boxes.centres.clone())
                    .with("width", widths)
                    .with("height", boxes.upper.clone());
                Ok(Update::new()
                    .sink("lower", lower)
                    .sink("upper", upper)
                    .text("delta", format!("Delta x = {:.4}", boxes.width))
                    .text("lower_sum", format!("Lower sum = {:.4}", boxes.lower_sum()))
                    .text("upper_sum", format!("Upper sum = {:.4}", boxes.upper_sum())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardError, DashboardSettings};

    #[test]
    fn sums_bracket_the_integral() {
        let boxes = Boxes::new(Function::Identity, 1.0, 3.0, 2);
        assert_eq!(boxes.centres, vec![1.5, 2.5]);
        assert_eq!(boxes.lower_sum(), 3.0);
        assert_eq!(boxes.upper_sum(), 5.0);
    }

    #[test]
    fn refining_closes_the_gap() {
        let coarse = Boxes::new(Function::ArcTangent, -5.0, 5.0, 5);
        let fine = Boxes::new(Function::ArcTangent, -5.0, 5.0, 50);
        let gap = |b: &Boxes| b.upper_sum() - b.lower_sum();
        assert!(gap(&fine) < gap(&coarse));
        assert!(fine.lower_sum().abs() < 0.3);
    }

    #[test]
    fn interval_change_updates_texts() {
        let mut dashboard = Dashboard::new(RiemannSums, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_range(INTERVAL, 0.0, 2.0).unwrap();
        assert_eq!(frame.texts["lower_sum"], "Lower sum = 1.0000");
        assert_eq!(frame.texts["upper_sum"], "Upper sum = 3.0000");
        assert_eq!(frame.sinks["lower"].len(), 2);
    }

    #[test]
    fn interval_must_be_ordered_and_inside_the_axis() {
        let mut dashboard = Dashboard::new(RiemannSums, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let err = dashboard.set_range(INTERVAL, 3.0, 1.0).unwrap_err();
        assert!(matches!(err, DashboardError::ReversedRange { .. }));
        let err = dashboard.set_range(INTERVAL, -6.0, 0.0).unwrap_err();
        assert!(matches!(err, DashboardError::OutOfRange { value, .. } if value == -6.0));
        let err = dashboard.set_number(BOXES, 1e12).unwrap_err();
        assert!(matches!(err, DashboardError::OutOfRange { .. }));
        assert_eq!(dashboard.snapshot().range(INTERVAL).unwrap(), (1.0, 3.0));
    }
}
