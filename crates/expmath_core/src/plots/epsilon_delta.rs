//! Epsilon and delta tunnels around a point, to test continuity.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::linspace;

const FUNCTION: &str = "function";
const POSITION: &str = "position";
const EPSILON_WIDTH: &str = "epsilon";
const DELTA_WIDTH: &str = "delta";

const X_RANGE: (f64, f64) = (-6.0, 6.0);
const Y_RANGE: (f64, f64) = (-5.0, 5.0);
const JUMP_AT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Parabola,
    Absolute,
    Jump,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Parabola, Function::Absolute, Function::Jump];

    fn label(self) -> &'static str {
        match self {
            Function::Parabola => "x^2 / 2",
            Function::Absolute => "|x|",
            Function::Jump => "Jump at 1",
        }
    }
}

impl Function {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Function::Parabola => 0.5 * x * x,
            Function::Absolute => x.abs(),
            Function::Jump => {
                if x < JUMP_AT {
                    x + 0.5
                } else {
                    2.5 * x
                }
            }
        }
    }

    /// The graph as polylines, split wherever the function jumps.
    pub fn polylines(self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let x = linspace(X_RANGE.0, X_RANGE.1, 200);
        match self {
            Function::Jump => {
                let mut left: Vec<f64> = x.iter().copied().filter(|&v| v < JUMP_AT).collect();
                left.push(JUMP_AT);
                let mut right = vec![JUMP_AT];
                right.extend(x.iter().copied().filter(|&v| v > JUMP_AT));

                let left_y = left.iter().map(|&v| v + 0.5).collect();
                let right_y = right.iter().map(|&v| self.eval(v)).collect();
                (vec![left, right], vec![left_y, right_y])
            }
            _ => {
                let y = x.iter().map(|&v| self.eval(v)).collect();
                (vec![x], vec![y])
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Graph,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Default)]
pub struct EpsilonDelta;

impl Visualization for EpsilonDelta {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(FUNCTION, Function::Parabola),
            Widget::slider(POSITION, "Position", -4.5, 4.5, 0.01, 1.0),
            Widget::slider(EPSILON_WIDTH, "Epsilon", 0.05, 2.0, 0.05, 0.3),
            Widget::slider(DELTA_WIDTH, "Delta", 0.05, 2.0, 0.05, 0.3),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Graph, &[FUNCTION]),
            Binding::new(Recompute::Horizontal, &[FUNCTION, POSITION, EPSILON_WIDTH]),
            Binding::new(Recompute::Vertical, &[FUNCTION, POSITION, DELTA_WIDTH]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        let position = snapshot.number(POSITION)?;
        match which {
            Recompute::Graph => {
                let (xs, ys) = function.polylines();
                Ok(Update::new().sink("graph", ColumnData::lines(xs, ys)))
            }
            Recompute::Horizontal => {
                let epsilon = snapshot.number(EPSILON_WIDTH)?;
                let value = function.eval(position);
                let (lower, upper) = (value - epsilon, value + epsilon);
                let tunnel = ColumnData::new()
                    .with("x", vec![X_RANGE.0, X_RANGE.1])
                    .with("lower", vec![lower, lower])
                    .with("upper", vec![upper, upper]);
                let bounds = ColumnData::lines(
                    vec![vec![X_RANGE.0, X_RANGE.1]; 2],
                    vec![vec![lower, lower], vec![upper, upper]],
                );
                Ok(Update::new()
                    .sink("horizontal_tunnel", tunnel)
                    .sink("horizontal_bounds", bounds))
            }
            Recompute::Vertical => {
                let delta = snapshot.number(DELTA_WIDTH)?;
                let (left, right) = (position - delta, position + delta);
                let tunnel = ColumnData::new()
                    .with("y", vec![Y_RANGE.0, Y_RANGE.1])
                    .with("left", vec![left, left])
                    .with("right", vec![right, right]);
                let bounds = ColumnData::lines(
                    vec![vec![left, left], vec![right, right]],
                    vec![vec![Y_RANGE.0, Y_RANGE.1]; 2],
                );
                Ok(Update::new()
                    .sink("vertical_tunnel", tunnel)
                    .sink("vertical_bounds", bounds))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn jump_is_drawn_as_two_pieces() {
        let (xs, ys) = Function::Jump.polylines();
        assert_eq!(xs.len(), 2);
        assert_eq!(*xs[0].last().unwrap(), JUMP_AT);
        assert_eq!(*ys[0].last().unwrap(), 1.5);
        assert_eq!(xs[1][0], JUMP_AT);
        assert_eq!(ys[1][0], 2.5);
    }

    #[test]
    fn delta_change_only_moves_vertical_tunnel() {
        let mut dashboard = Dashboard::new(EpsilonDelta, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_number(DELTA_WIDTH, 0.5).unwrap();
        assert_eq!(frame.recomputes, 1);
        assert!(frame.sinks.contains_key("vertical_tunnel"));
        assert!(!frame.sinks.contains_key("horizontal_tunnel"));
        let left = frame.sinks["vertical_tunnel"].values("left").unwrap()[0];
        assert!((left - 0.5).abs() < 1e-12);
    }

    #[test]
    fn epsilon_tunnel_is_centred_on_the_value() {
        let snapshot = Snapshot::from_widgets(&EpsilonDelta.widgets());
        let update = EpsilonDelta.recompute(Recompute::Horizontal, &snapshot).unwrap();
        let tunnel = update.entry("horizontal_tunnel").unwrap();
        let lower = tunnel.values("lower").unwrap()[0];
        let upper = tunnel.values("upper").unwrap()[0];
        assert!(((lower + upper) / 2.0 - 0.5).abs() < 1e-12);
        assert!((upper - lower - 0.6).abs() < 1e-12);
    }
}
