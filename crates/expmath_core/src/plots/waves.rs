//! One dimensional wave propagation via d'Alembert's formula
//!
//! `u(t, x) = (u0(x + ct) + u0(x - ct)) / 2 + (V(x + ct) - V(x - ct)) / 2c`
//!
//! where `V` is an antiderivative of the initial velocity.

use crate::dashboard::{
    AnimationSpec, Binding, Change, Choice, ColumnData, Controls, DashboardResult, Origin,
    Snapshot, Update, Visualization, Widget, WidgetValue,
};
use crate::sampling::{linspace, map};

const SHAPE: &str = "shape";
const SPEED: &str = "speed";
const SHAPE_SCALE: &str = "shape_scale";
const ANIMATE: &str = "animate";
const TIME: &str = "time";
const ADVANCED: &str = "advanced";
const VELOCITY: &str = "velocity";
const VELOCITY_SCALE: &str = "velocity_scale";

const DOMAIN: (f64, f64) = (-10.0, 10.0);
const SAMPLES: usize = 200;
const DEFAULT_VELOCITY_SCALE: f64 = 0.2;

/// Initial displacement `u(0, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bell,
    Hat,
}

impl Choice for Shape {
    const ALL: &'static [Self] = &[Shape::Bell, Shape::Hat];

    fn label(self) -> &'static str {
        match self {
            Shape::Bell => "Bell",
            Shape::Hat => "Hat",
        }
    }
}

impl Shape {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Shape::Bell => (-x * x).exp(),
            Shape::Hat => (1.0 - x.abs()).max(0.0),
        }
    }
}

/// Initial velocity `u_t(0, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Velocity {
    Sigmoid,
    Constant,
    Ramp,
}

impl Choice for Velocity {
    const ALL: &'static [Self] = &[Velocity::Sigmoid, Velocity::Constant, Velocity::Ramp];

    fn label(self) -> &'static str {
        match self {
            Velocity::Sigmoid => "1/(1+e^(-x)) - 0.5",
            Velocity::Constant => "1",
            Velocity::Ramp => "x, x in (-1, 1)",
        }
    }
}

impl Velocity {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Velocity::Sigmoid => 1.0 / (1.0 + (-x).exp()) - 0.5,
            Velocity::Constant => 1.0,
            Velocity::Ramp if x.abs() < 1.0 => x,
            Velocity::Ramp => 0.0,
        }
    }

    /// A continuous antiderivative.
    pub fn antiderivative(self, x: f64) -> f64 {
        match self {
            Velocity::Sigmoid => 0.5 * x + (-x).exp().ln_1p(),
            Velocity::Constant => x,
            Velocity::Ramp => 0.5 * x.clamp(-1.0, 1.0).powi(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub shape: Shape,
    pub shape_scale: f64,
    pub velocity: Velocity,
    pub velocity_scale: f64,
    pub speed: f64,
}

impl Wave {
    pub fn displacement(&self, x: f64, t: f64) -> f64 {
        let ahead = x + self.speed * t;
        let behind = x - self.speed * t;
        let travelling = self.shape_scale * (self.shape.eval(ahead) + self.shape.eval(behind));
        let momentum = self.velocity_scale
            * (self.velocity.antiderivative(ahead) - self.velocity.antiderivative(behind))
            / self.speed;
        0.5 * (travelling + momentum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Displacement,
}

#[derive(Debug, Clone, Default)]
pub struct Waves;

impl Visualization for Waves {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SHAPE, Shape::Bell),
            Widget::slider(SPEED, "Propagation speed", 0.1, 2.0, 0.1, 1.0),
            Widget::slider(SHAPE_SCALE, "Scale of the initial displacement", 0.1, 2.0, 0.1, 1.0),
            Widget::toggle(ANIMATE, "Animate"),
            Widget::slider(TIME, "Time", 0.0, 10.0, 0.1, 0.0),
            Widget::toggle(ADVANCED, "Enable the initial velocity"),
            Widget::buttons(VELOCITY, Velocity::Sigmoid).hidden(),
            Widget::slider(VELOCITY_SCALE, "Scale of the initial velocity", 0.0, 2.0, 0.1, 0.0)
                .hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(
            Recompute::Displacement,
            &[SHAPE, SPEED, SHAPE_SCALE, TIME, VELOCITY, VELOCITY_SCALE],
        )]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let wave = Wave {
            shape: snapshot.choice(SHAPE)?,
            shape_scale: snapshot.number(SHAPE_SCALE)?,
            velocity: snapshot.choice(VELOCITY)?,
            velocity_scale: snapshot.number(VELOCITY_SCALE)?,
            speed: snapshot.number(SPEED)?,
        };
        let t = snapshot.number(TIME)?;
        let x = linspace(DOMAIN.0, DOMAIN.1, SAMPLES);
        let y = map(&x, |x| wave.displacement(x, t));
        Ok(Update::new().sink("wave", ColumnData::xy(x, y)))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            controls.set_visible(VELOCITY, true)?;
            controls.set_visible(VELOCITY_SCALE, true)?;
            controls.set_number(TIME, 0.0)?;
            controls.set_number(VELOCITY_SCALE, DEFAULT_VELOCITY_SCALE)?;
        } else if change.origin == Origin::User && change.is(SHAPE) {
            controls.set_number(SHAPE_SCALE, 1.0)?;
        } else if change.origin == Origin::User && change.is(VELOCITY) {
            controls.set_number(VELOCITY_SCALE, DEFAULT_VELOCITY_SCALE)?;
        }
        Ok(())
    }

    fn animation(&self) -> Option<AnimationSpec> {
        Some(AnimationSpec {
            toggle: ANIMATE,
            target: TIME,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn wave(velocity: Velocity) -> Wave {
        Wave {
            shape: Shape::Bell,
            shape_scale: 1.3,
            velocity,
            velocity_scale: 0.7,
            speed: 1.5,
        }
    }

    #[test]
    fn antiderivatives_match_velocities() {
        let h = 1e-6;
        for velocity in Velocity::ALL.iter().copied() {
            for &x in &[-3.0, -0.4, 0.2, 0.9, 4.0] {
                let slope =
                    (velocity.antiderivative(x + h) - velocity.antiderivative(x - h)) / (2.0 * h);
                assert!((slope - velocity.eval(x)).abs() < 1e-6, "{velocity:?} at {x}");
            }
        }
    }

    #[test]
    fn initial_conditions_hold() {
        for velocity in Velocity::ALL.iter().copied() {
            let wave = wave(velocity);
            for &x in &[-2.0, -0.3, 0.0, 0.5, 1.7] {
                assert!((wave.displacement(x, 0.0) - 1.3 * Shape::Bell.eval(x)).abs() < 1e-12);
                let h = 1e-5;
                let u_t = (wave.displacement(x, h) - wave.displacement(x, -h)) / (2.0 * h);
                assert!((u_t - 0.7 * velocity.eval(x)).abs() < 1e-5, "{velocity:?} at {x}");
            }
        }
    }

    #[test]
    fn hat_splits_into_two_half_height_pulses() {
        let wave = Wave {
            shape: Shape::Hat,
            shape_scale: 1.0,
            velocity: Velocity::Constant,
            velocity_scale: 0.0,
            speed: 1.0,
        };
        assert!((wave.displacement(5.0, 5.0) - 0.5).abs() < 1e-12);
        assert!((wave.displacement(-5.0, 5.0) - 0.5).abs() < 1e-12);
        assert_eq!(wave.displacement(0.0, 5.0), 0.0);
    }

    #[test]
    fn advanced_toggle_resets_time_and_velocity_scale() {
        let mut dashboard = Dashboard::new(Waves, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard.set_number(TIME, 3.0).unwrap();

        let frame = dashboard.set_flag(ADVANCED, true).unwrap();
        assert_eq!(frame.recomputes, 1);
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number(TIME).unwrap(), 0.0);
        assert_eq!(snapshot.number(VELOCITY_SCALE).unwrap(), DEFAULT_VELOCITY_SCALE);
        let names: Vec<&str> = frame.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec![TIME, ADVANCED, VELOCITY, VELOCITY_SCALE]);
    }

    #[test]
    fn switching_shape_resets_its_scale() {
        let mut dashboard = Dashboard::new(Waves, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard.set_number(SHAPE_SCALE, 0.4).unwrap();
        let frame = dashboard.set_choice(SHAPE, Shape::Hat).unwrap();
        assert_eq!(dashboard.snapshot().number(SHAPE_SCALE).unwrap(), 1.0);
        let peak = frame.sinks["wave"]
            .values("y")
            .unwrap()
            .iter()
            .cloned()
            .fold(0.0, f64::max);
        assert!(peak > 0.9 && peak <= 1.0);
    }
}
