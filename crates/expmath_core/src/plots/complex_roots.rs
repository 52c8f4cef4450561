//! The n-th roots of a complex number, which lie on a circle and form a
//! regular polygon.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::dashboard::{
    Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::plots::complex_numbers::{from_polar, to_polar, CoordinateSystem};
use crate::sampling::linspace;

const SYSTEM: &str = "system";
const FIRST: &str = "first";
const SECOND: &str = "second";
const ORDER: &str = "order";

const CIRCLE_HALF_SAMPLES: usize = 60;

const CARTESIAN_BOUNDS: Bounds = Bounds {
    start: -5.0,
    end: 5.0,
    step: 0.1,
};
const RADIUS_BOUNDS: Bounds = Bounds {
    start: 0.3,
    end: 7.0,
    step: 0.1,
};
const ANGLE_BOUNDS: Bounds = Bounds {
    start: -180.0,
    end: 180.0,
    step: 5.0,
};

/// All `n` roots of `z`, starting from the principal one.
pub fn roots(z: Complex64, n: usize, held: f64) -> Vec<Complex64> {
    let n = n.max(1);
    let (radius, angle) = to_polar(z, held);
    let modulus = radius.powf(1.0 / n as f64);
    (0..n)
        .map(|k| from_polar(modulus, (angle + 2.0 * PI * k as f64) / n as f64))
        .collect()
}

/// Upper half of the circle of radius `r` followed by the lower half.
fn circle(r: f64) -> (Vec<f64>, Vec<f64>) {
    let upper_x = linspace(-r, r, CIRCLE_HALF_SAMPLES);
    let upper_y: Vec<f64> = upper_x.iter().map(|x| (r * r - x * x).max(0.0).sqrt()).collect();
    let mut x = upper_x.clone();
    x.extend(upper_x.iter().rev());
    let mut y = upper_y.clone();
    y.extend(upper_y.iter().rev().map(|v| -v));
    (x, y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Roots,
}

#[derive(Debug, Clone)]
pub struct ComplexRoots {
    held_angle: f64,
}

impl Default for ComplexRoots {
    fn default() -> Self {
        Self {
            held_angle: PI / 4.0,
        }
    }
}

impl ComplexRoots {
    fn radicand(&self, system: CoordinateSystem, first: f64, second: f64) -> Complex64 {
        match system {
            CoordinateSystem::Cartesian => Complex64::new(first, second),
            CoordinateSystem::Polar => from_polar(first, second.to_radians()),
        }
    }
}

impl Visualization for ComplexRoots {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SYSTEM, CoordinateSystem::Cartesian),
            Widget::slider(FIRST, "Real part x", -5.0, 5.0, 0.1, 1.0),
            Widget::slider(SECOND, "Imaginary part y", -5.0, 5.0, 0.1, 1.0),
            Widget::slider(ORDER, "Order n", 2.0, 10.0, 1.0, 2.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Roots, &[SYSTEM, FIRST, SECOND, ORDER])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let system = snapshot.choice(SYSTEM)?;
        let z = self.radicand(system, snapshot.number(FIRST)?, snapshot.number(SECOND)?);
        let n = snapshot.count(ORDER)?;
        let roots = roots(z, n, self.held_angle);

        let radius = roots.first().map_or(0.0, |r| r.norm());
        let (circle_x, circle_y) = circle(radius);

        let mut polygon_x: Vec<f64> = roots.iter().map(|r| r.re).collect();
        let mut polygon_y: Vec<f64> = roots.iter().map(|r| r.im).collect();
        if let Some(first) = roots.first() {
            polygon_x.push(first.re);
            polygon_y.push(first.im);
        }

        Ok(Update::new()
            .sink(
                "radicand",
                ColumnData::new()
                    .with("x", vec![0.0, z.re])
                    .with("y", vec![0.0, z.im])
                    .with("size", vec![0.0, 15.0]),
            )
            .sink("circle", ColumnData::xy(circle_x, circle_y))
            .sink("polygon", ColumnData::xy(polygon_x, polygon_y))
            .sink(
                "roots",
                ColumnData::xy(
                    roots.iter().map(|r| r.re).collect(),
                    roots.iter().map(|r| r.im).collect(),
                ),
            ))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        let system: CoordinateSystem = controls.choice(SYSTEM)?;
        let first = controls.number(FIRST)?;
        let second = controls.number(SECOND)?;

        if change.is(SYSTEM) {
            let WidgetValue::Index(previous) = change.old else {
                return Ok(());
            };
            let previous = CoordinateSystem::from_index(previous).unwrap_or(system);
            let z = self.radicand(previous, first, second);
            match system {
                CoordinateSystem::Polar => {
                    let (radius, angle) = to_polar(z, self.held_angle);
                    controls.configure_slider(FIRST, "Radius r", RADIUS_BOUNDS, radius)?;
                    controls.configure_slider(SECOND, "Angle phi", ANGLE_BOUNDS, angle.to_degrees())?;
                }
                CoordinateSystem::Cartesian => {
                    controls.configure_slider(FIRST, "Real part x", CARTESIAN_BOUNDS, z.re)?;
                    controls.configure_slider(SECOND, "Imaginary part y", CARTESIAN_BOUNDS, z.im)?;
                }
            }
        } else if change.is(FIRST) || change.is(SECOND) {
            let z = self.radicand(system, first, second);
            self.held_angle = to_polar(z, self.held_angle).1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn roots_raised_to_n_give_the_radicand() {
        let z = Complex64::new(1.0, 1.0);
        for n in 2..=10 {
            let all = roots(z, n, 0.0);
            assert_eq!(all.len(), n);
            for root in all {
                let back = root.powu(n as u32);
                assert!((back - z).norm() < 1e-9, "n = {n}");
            }
        }
    }

    #[test]
    fn polygon_is_closed() {
        let mut dashboard =
            Dashboard::new(ComplexRoots::default(), DashboardSettings::default()).unwrap();
        let frame = dashboard.populate().unwrap();
        let polygon = &frame.sinks["polygon"];
        assert_eq!(polygon.len(), 3);
        let x = polygon.values("x").unwrap();
        assert_eq!(x[0], x[2]);
        assert_eq!(frame.sinks["circle"].len(), 2 * CIRCLE_HALF_SAMPLES);

        let frame = dashboard.set_number(ORDER, 5.0).unwrap();
        assert_eq!(frame.sinks["roots"].len(), 5);
    }

    #[test]
    fn zero_radicand_keeps_angle_in_polar_switch() {
        let mut dashboard =
            Dashboard::new(ComplexRoots::default(), DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard.set_number(FIRST, 0.0).unwrap();
        dashboard.set_number(SECOND, 0.0).unwrap();
        dashboard.set_choice(SYSTEM, CoordinateSystem::Polar).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number(FIRST).unwrap(), 0.0);
        assert!((snapshot.number(SECOND).unwrap() - 90.0).abs() < 1e-9);
    }
}
