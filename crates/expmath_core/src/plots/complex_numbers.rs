//! A complex number entered in cartesian or polar form.
//!
//! Switching the coordinate system or the angle unit converts the slider
//! values in place, so the plotted number stays where it is.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::dashboard::{
    Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};

const SYSTEM: &str = "system";
const UNIT: &str = "angle_unit";
const FIRST: &str = "first";
const SECOND: &str = "second";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    Cartesian,
    Polar,
}

impl Choice for CoordinateSystem {
    const ALL: &'static [Self] = &[CoordinateSystem::Cartesian, CoordinateSystem::Polar];

    fn label(self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian => "Cartesian",
            CoordinateSystem::Polar => "Polar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl Choice for AngleUnit {
    const ALL: &'static [Self] = &[AngleUnit::Degrees, AngleUnit::Radians];

    fn label(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "Degrees",
            AngleUnit::Radians => "Radians",
        }
    }
}

impl AngleUnit {
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_degrees(),
            AngleUnit::Radians => angle,
        }
    }

    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    fn bounds(self) -> Bounds {
        match self {
            AngleUnit::Degrees => Bounds::new(-180.0, 360.0, 2.0),
            AngleUnit::Radians => Bounds::new(-PI, PI, 0.1),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "°",
            AngleUnit::Radians => " rad",
        }
    }
}

/// Radius and angle in radians of `z`. The origin has no angle of its own,
/// so `held` is returned there.
pub fn to_polar(z: Complex64, held: f64) -> (f64, f64) {
    let (radius, angle) = z.to_polar();
    if radius == 0.0 {
        (0.0, held)
    } else {
        (radius, angle)
    }
}

pub fn from_polar(radius: f64, angle: f64) -> Complex64 {
    Complex64::from_polar(radius, angle)
}

const CARTESIAN_BOUNDS: Bounds = Bounds {
    start: -5.0,
    end: 5.0,
    step: 0.1,
};
const RADIUS_BOUNDS: Bounds = Bounds {
    start: 0.0,
    end: 5.0,
    step: 0.1,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Number,
}

#[derive(Debug, Clone)]
pub struct ComplexNumbers {
    /// Angle in radians kept while the number sits at the origin.
    held_angle: f64,
}

impl Default for ComplexNumbers {
    fn default() -> Self {
        Self {
            held_angle: 3.0f64.atan2(4.0),
        }
    }
}

impl ComplexNumbers {
    pub fn held_angle(&self) -> f64 {
        self.held_angle
    }

    /// The number the sliders describe, interpreted in `system`.
    fn number(&self, system: CoordinateSystem, unit: AngleUnit, first: f64, second: f64) -> Complex64 {
        match system {
            CoordinateSystem::Cartesian => Complex64::new(first, second),
            CoordinateSystem::Polar => from_polar(first, unit.to_radians(second)),
        }
    }
}

impl Visualization for ComplexNumbers {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SYSTEM, CoordinateSystem::Cartesian),
            Widget::buttons(UNIT, AngleUnit::Degrees),
            Widget::slider(FIRST, "Real part x", -5.0, 5.0, 0.1, 4.0),
            Widget::slider(SECOND, "Imaginary part y", -5.0, 5.0, 0.1, 3.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Number, &[SYSTEM, UNIT, FIRST, SECOND])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let system: CoordinateSystem = snapshot.choice(SYSTEM)?;
        let unit: AngleUnit = snapshot.choice(UNIT)?;
        let z = self.number(
            system,
            unit,
            snapshot.number(FIRST)?,
            snapshot.number(SECOND)?,
        );
        let (radius, angle) = to_polar(z, self.held_angle);

        let (first_info, second_info) = match system {
            CoordinateSystem::Cartesian => (
                format!("Radius r = {radius:.2}"),
                format!("Angle phi = {:.2}{}", unit.from_radians(angle), unit.symbol()),
            ),
            CoordinateSystem::Polar => (
                format!("Real part x = {:.2}", z.re),
                format!("Imaginary part y = {:.2}", z.im),
            ),
        };

        Ok(Update::new()
            .sink(
                "number",
                ColumnData::new()
                    .with("x", vec![0.0, z.re])
                    .with("y", vec![0.0, z.im])
                    .with("size", vec![0.0, 15.0]),
            )
            .text("first_info", first_info)
            .text("second_info", second_info))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        let system: CoordinateSystem = controls.choice(SYSTEM)?;
        let unit: AngleUnit = controls.choice(UNIT)?;
        let first = controls.number(FIRST)?;
        let second = controls.number(SECOND)?;

        if change.is(SYSTEM) {
            let WidgetValue::Index(previous) = change.old else {
                return Ok(());
            };
            let previous = CoordinateSystem::from_index(previous).unwrap_or(system);
            let z = self.number(previous, unit, first, second);
            match system {
                CoordinateSystem::Polar => {
                    let (radius, angle) = to_polar(z, self.held_angle);
                    controls.configure_slider(FIRST, "Radius r", RADIUS_BOUNDS, radius)?;
                    controls.configure_slider(
                        SECOND,
                        "Angle phi",
                        unit.bounds(),
                        unit.from_radians(angle),
                    )?;
                }
                CoordinateSystem::Cartesian => {
                    controls.configure_slider(FIRST, "Real part x", CARTESIAN_BOUNDS, z.re)?;
                    controls.configure_slider(SECOND, "Imaginary part y", CARTESIAN_BOUNDS, z.im)?;
                }
            }
        } else if change.is(UNIT) && system == CoordinateSystem::Polar {
            let WidgetValue::Index(previous) = change.old else {
                return Ok(());
            };
            let previous = AngleUnit::from_index(previous).unwrap_or(unit);
            let angle = unit.from_radians(previous.to_radians(second));
            controls.set_bounds(SECOND, unit.bounds())?;
            controls.set_number(SECOND, angle)?;
        } else if change.is(FIRST) || change.is(SECOND) {
            let z = self.number(system, unit, first, second);
            match system {
                CoordinateSystem::Cartesian => self.held_angle = to_polar(z, self.held_angle).1,
                CoordinateSystem::Polar => self.held_angle = unit.to_radians(second),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn dashboard() -> Dashboard<ComplexNumbers> {
        let mut dashboard =
            Dashboard::new(ComplexNumbers::default(), DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard
    }

    #[test]
    fn polar_round_trip() {
        for &(x, y) in &[(4.0, 3.0), (-2.5, 0.1), (0.0, -4.0), (-3.0, -3.0)] {
            let z = Complex64::new(x, y);
            let (r, phi) = to_polar(z, 0.0);
            let back = from_polar(r, phi);
            assert!((back.re - x).abs() < 1e-6);
            assert!((back.im - y).abs() < 1e-6);
        }
    }

    #[test]
    fn switching_to_polar_keeps_the_point() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(SYSTEM, CoordinateSystem::Polar).unwrap();
        let snapshot = dashboard.snapshot();
        assert!((snapshot.number(FIRST).unwrap() - 5.0).abs() < 1e-9);
        assert!((snapshot.number(SECOND).unwrap() - 3.0f64.atan2(4.0).to_degrees()).abs() < 1e-9);
        assert_eq!(frame.widget(FIRST).unwrap().title, "Radius r");
        assert_eq!(frame.recomputes, 1);

        let number = &frame.sinks["number"];
        assert!((number.values("x").unwrap()[1] - 4.0).abs() < 1e-9);
        assert!((number.values("y").unwrap()[1] - 3.0).abs() < 1e-9);
        assert_eq!(frame.texts["first_info"], "Real part x = 4.00");
    }

    #[test]
    fn radius_beyond_the_slider_is_clamped() {
        let mut dashboard = dashboard();
        dashboard
            .apply_batch(&[
                (FIRST.to_string(), WidgetValue::Number(-5.0)),
                (SECOND.to_string(), WidgetValue::Number(-5.0)),
            ])
            .unwrap();
        dashboard.set_choice(SYSTEM, CoordinateSystem::Polar).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number(FIRST).unwrap(), RADIUS_BOUNDS.end);
        assert!((snapshot.number(SECOND).unwrap() + 135.0).abs() < 1e-9);
    }

    #[test]
    fn origin_keeps_the_last_angle() {
        let mut dashboard = dashboard();
        dashboard.set_number(FIRST, 0.0).unwrap();
        dashboard.set_number(SECOND, 0.0).unwrap();
        let held = dashboard.visualization().held_angle();
        assert!((held - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let frame = dashboard.set_choice(SYSTEM, CoordinateSystem::Polar).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number(FIRST).unwrap(), 0.0);
        assert!((snapshot.number(SECOND).unwrap() - 90.0).abs() < 1e-9);
        assert!(frame.sinks["number"]
            .values("x")
            .unwrap()
            .iter()
            .all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn unit_switch_converts_the_angle() {
        let mut dashboard = dashboard();
        dashboard.set_choice(SYSTEM, CoordinateSystem::Polar).unwrap();
        let degrees = dashboard.snapshot().number(SECOND).unwrap();
        let frame = dashboard.set_choice(UNIT, AngleUnit::Radians).unwrap();
        let radians = dashboard.snapshot().number(SECOND).unwrap();
        assert!((radians - degrees.to_radians()).abs() < 1e-12);
        assert_eq!(frame.widget(SECOND).unwrap().bounds, Some(AngleUnit::Radians.bounds()));
    }

    #[test]
    fn unit_switch_in_cartesian_mode_only_relabels() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(UNIT, AngleUnit::Radians).unwrap();
        assert!(frame.widgets.is_empty());
        assert!(frame.texts["second_info"].ends_with(" rad"));
    }
}
