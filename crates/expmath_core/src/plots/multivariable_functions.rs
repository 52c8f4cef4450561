//! Surfaces of functions of two variables over a square grid.

use crate::dashboard::{
    Binding, Choice, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::grid;

const FUNCTION: &str = "function";

const DOMAIN: (f64, f64) = (-5.0, 5.0);
const SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Plane,
    Diagonal,
    Paraboloid,
}

impl Choice for Function {
    const ALL: &'static [Self] = &[Function::Plane, Function::Diagonal, Function::Paraboloid];

    fn label(self) -> &'static str {
        match self {
            Function::Plane => "f(x, y) = x",
            Function::Diagonal => "f(x, y) = x + y",
            Function::Paraboloid => "f(x, y) = x^2 + y^2",
        }
    }
}

impl Function {
    pub fn eval(self, x: f64, y: f64) -> f64 {
        match self {
            Function::Plane => x,
            Function::Diagonal => x + y,
            Function::Paraboloid => x * x + y * y,
        }
    }
}

/// The surface as three flat columns, row-major with `y` in the outer loop.
pub fn surface(function: Function) -> ColumnData {
    let points = grid(DOMAIN.0, DOMAIN.1, SAMPLES);
    let z: Vec<f64> = points.iter().map(|&(x, y)| function.eval(x, y)).collect();
    let (x, y) = points.into_iter().unzip();
    ColumnData::xy(x, y).with("z", z)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Surface,
}

#[derive(Debug, Clone, Default)]
pub struct MultivariableFunctions;

impl Visualization for MultivariableFunctions {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![Widget::buttons(FUNCTION, Function::Plane)]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Surface, &[FUNCTION])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let function: Function = snapshot.choice(FUNCTION)?;
        Ok(Update::new()
            .sink("surface", surface(function))
            .text("function", function.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn grid_covers_the_square() {
        let data = surface(Function::Plane);
        assert_eq!(data.len(), SAMPLES * SAMPLES);
        let x = data.values("x").unwrap();
        let y = data.values("y").unwrap();
        assert_eq!((x[0], y[0]), (-5.0, -5.0));
        assert_eq!((x[SAMPLES - 1], y[SAMPLES - 1]), (5.0, -5.0));
        assert_eq!(x[SAMPLES], -5.0);
        assert!(y[SAMPLES] > -5.0);
        assert_eq!(*x.last().unwrap(), 5.0);
        assert_eq!(*y.last().unwrap(), 5.0);
    }

    #[test]
    fn paraboloid_has_its_minimum_off_grid() {
        let data = surface(Function::Paraboloid);
        let z = data.values("z").unwrap();
        let min = z.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(min > 0.0 && min < 0.01);
        assert_eq!(z.iter().copied().fold(0.0, f64::max), 50.0);
    }

    #[test]
    fn switching_function_replaces_the_surface() {
        let mut dashboard =
            Dashboard::new(MultivariableFunctions, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_choice(FUNCTION, Function::Diagonal).unwrap();
        assert_eq!(frame.recomputes, 1);
        assert_eq!(frame.texts["function"], "f(x, y) = x + y");
        let z = frame.sinks["surface"].values("z").unwrap();
        assert_eq!(z[0], -10.0);
        assert_eq!(*z.last().unwrap(), 10.0);
    }
}
