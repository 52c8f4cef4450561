//! Phase portraits of the harmonic oscillator and the Lotka-Volterra
//! predator-prey model, with a trajectory up to an animated end time.

use std::f64::consts::PI;

use crate::dashboard::{
    AnimationSpec, Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult,
    Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{grid, linspace, EPSILON};
use crate::solvers::ExplicitEuler;
use crate::traits::{DynamicalSystem, Steppable};

const SYSTEM: &str = "system";
const PARAMETERS: [&str; 4] = ["p1", "p2", "p3", "p4"];
const U0: &str = "u0";
const V0: &str = "v0";
const ANIMATE: &str = "animate";
const TIME: &str = "time";

const HEAD_OFFSET: f64 = 0.1;
const TRAJECTORY_SAMPLES: usize = 100;
const EULER_STEPS: usize = 4000;
const KEEP_EVERY: usize = 100;
/// Euler steps leaving this box are rejected and the previous state is kept.
const ESCAPE_BOX: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    UndampedOscillator,
    DampedOscillator,
    PredatorPrey,
}

impl Choice for SystemKind {
    const ALL: &'static [Self] = &[
        SystemKind::UndampedOscillator,
        SystemKind::DampedOscillator,
        SystemKind::PredatorPrey,
    ];

    fn label(self) -> &'static str {
        match self {
            SystemKind::UndampedOscillator => "Undamped oscillator",
            SystemKind::DampedOscillator => "Damped oscillator",
            SystemKind::PredatorPrey => "Predator-prey model",
        }
    }
}

struct SliderConfig {
    title: &'static str,
    bounds: Bounds,
    value: f64,
    visible: bool,
}

const fn slider(title: &'static str, start: f64, end: f64, step: f64, value: f64) -> SliderConfig {
    SliderConfig {
        title,
        bounds: Bounds {
            start,
            end,
            step,
        },
        value,
        visible: true,
    }
}

const UNUSED: SliderConfig = SliderConfig {
    title: "Unused",
    bounds: Bounds {
        start: 0.0,
        end: 1.0,
        step: 0.1,
    },
    value: 0.0,
    visible: false,
};

impl SystemKind {
    /// Parameter sliders, initial values and end time for this system.
    fn sliders(self) -> [SliderConfig; 7] {
        match self {
            SystemKind::UndampedOscillator => [
                slider("Mass m", 0.1, 5.0, 0.1, 1.0),
                slider("Spring stiffness k", 0.1, 5.0, 0.1, 1.0),
                UNUSED,
                UNUSED,
                slider("Initial displacement y(0)", -5.0, 5.0, 0.1, 1.0),
                slider("Initial velocity y'(0)", -5.0, 5.0, 0.1, 0.0),
                slider("End time", 0.0, 30.0, 0.1, 1.0),
            ],
            SystemKind::DampedOscillator => [
                slider("Mass m", 0.1, 5.0, 0.1, 1.0),
                slider("Spring stiffness k", 0.1, 5.0, 0.1, 1.0),
                slider("Damping d", 0.0, 3.0, 0.1, 0.5),
                UNUSED,
                slider("Initial displacement y(0)", -5.0, 5.0, 0.1, 1.0),
                slider("Initial velocity y'(0)", -5.0, 5.0, 0.1, 0.0),
                slider("End time", 0.0, 30.0, 0.1, 1.0),
            ],
            SystemKind::PredatorPrey => [
                slider("Prey birth rate alpha", 0.1, 10.0, 0.1, 6.0),
                slider("Predation rate beta", 0.1, 5.0, 0.1, 2.0),
                slider("Predator growth rate gamma", 0.1, 5.0, 0.1, 1.0),
                slider("Predator death rate delta", 0.1, 10.0, 0.1, 3.0),
                slider("Initial prey u(0)", 0.0, 12.0, 0.1, 5.0),
                slider("Initial predators v(0)", 0.0, 12.0, 0.1, 2.0),
                slider("End time", 0.0, 1.5, 0.01, 0.2),
            ],
        }
    }

    fn axes(self) -> (&'static str, &'static str) {
        match self {
            SystemKind::PredatorPrey => ("Prey u", "Predators v"),
            _ => ("Displacement y", "Velocity y'"),
        }
    }
}

/// A concrete vector field with its parameters read from the sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model {
    Oscillator { mass: f64, stiffness: f64, damping: f64 },
    LotkaVolterra { alpha: f64, beta: f64, gamma: f64, delta: f64 },
}

impl Model {
    fn from_snapshot(kind: SystemKind, snapshot: &Snapshot) -> DashboardResult<Self> {
        let mut p = [0.0; 4];
        for (slot, name) in p.iter_mut().zip(PARAMETERS) {
            *slot = snapshot.number(name)?;
        }
        Ok(match kind {
            SystemKind::UndampedOscillator => Model::Oscillator {
                mass: p[0],
                stiffness: p[1],
                damping: 0.0,
            },
            SystemKind::DampedOscillator => Model::Oscillator {
                mass: p[0],
                stiffness: p[1],
                damping: p[2],
            },
            SystemKind::PredatorPrey => Model::LotkaVolterra {
                alpha: p[0],
                beta: p[1],
                gamma: p[2],
                delta: p[3],
            },
        })
    }

    fn window(&self) -> (f64, f64, usize, f64) {
        match self {
            Model::Oscillator { .. } => (-5.0, 5.0, 11, 10.0),
            Model::LotkaVolterra { .. } => (0.0, 12.0, 13, 7.0),
        }
    }

    /// Samples of the trajectory starting at `(u0, v0)` up to `end`.
    pub fn trajectory(&self, u0: f64, v0: f64, end: f64) -> (Vec<f64>, Vec<f64>) {
        match *self {
            Model::Oscillator {
                mass,
                stiffness,
                damping,
            } => {
                linspace(0.0, end, TRAJECTORY_SAMPLES)
                    .into_iter()
                    .map(|t| oscillator_state(mass, stiffness, damping, u0, v0, t))
                    .unzip()
            }
            Model::LotkaVolterra { .. } => {
                let dt = if EULER_STEPS > 1 {
                    end / (EULER_STEPS - 1) as f64
                } else {
                    0.0
                };
                let mut solver = ExplicitEuler::new(self.dimension());
                let mut t = 0.0;
                let mut state = [u0, v0];
                let mut us = vec![u0];
                let mut vs = vec![v0];
                for i in 1..EULER_STEPS {
                    let previous = state;
                    solver.step(self, &mut t, &mut state, dt);
                    if state[0].abs() > ESCAPE_BOX || state[1].abs() > ESCAPE_BOX {
                        state = previous;
                    }
                    if i % KEEP_EVERY == 0 {
                        us.push(state[0]);
                        vs.push(state[1]);
                    }
                }
                (us, vs)
            }
        }
    }
}

impl DynamicalSystem<f64> for Model {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        match *self {
            Model::Oscillator {
                mass,
                stiffness,
                damping,
            } => {
                out[0] = x[1];
                out[1] = -(stiffness * x[0] + damping * x[1]) / mass;
            }
            Model::LotkaVolterra {
                alpha,
                beta,
                gamma,
                delta,
            } => {
                out[0] = x[0] * (alpha - beta * x[1]);
                out[1] = x[1] * (gamma * x[0] - delta);
            }
        }
    }
}

/// Displacement and velocity at `t` of `m y'' + d y' + k y = 0`.
///
/// Damping close to critical is treated as critical.
pub fn oscillator_state(m: f64, k: f64, d: f64, y0: f64, v0: f64, t: f64) -> (f64, f64) {
    let omega = (k / m).sqrt();
    let delta = d / (2.0 * m);
    if d == 0.0 {
        let (sin, cos) = (omega * t).sin_cos();
        (y0 * cos + v0 / omega * sin, v0 * cos - y0 * omega * sin)
    } else if (delta * delta - omega * omega).abs() < 0.1 {
        let b = v0 + delta * y0;
        let decay = (-delta * t).exp();
        let y = (y0 + b * t) * decay;
        (y, b * decay - delta * y)
    } else if delta > omega {
        let mu = (delta * delta - omega * omega).sqrt();
        let (r1, r2) = (-delta + mu, -delta - mu);
        let c1 = (v0 + (delta + mu) * y0) / (2.0 * mu);
        let c2 = y0 - c1;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    } else {
        let nu = (omega * omega - delta * delta).sqrt();
        let b = (v0 + delta * y0) / nu;
        let decay = (-delta * t).exp();
        let (sin, cos) = (nu * t).sin_cos();
        let y = decay * (y0 * cos + b * sin);
        (y, decay * nu * (b * cos - y0 * sin) - delta * y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Field,
    Initial,
    Trajectory,
    Axes,
}

#[derive(Debug, Clone, Default)]
pub struct PhasePortrait;

impl Visualization for PhasePortrait {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let configs = SystemKind::UndampedOscillator.sliders();
        let names = [PARAMETERS[0], PARAMETERS[1], PARAMETERS[2], PARAMETERS[3], U0, V0, TIME];
        let mut widgets = vec![Widget::dropdown(
            SYSTEM,
            "System",
            SystemKind::UndampedOscillator,
        )];
        for (name, config) in names.into_iter().zip(configs) {
            let mut widget = Widget::slider(
                name,
                config.title,
                config.bounds.start,
                config.bounds.end,
                config.bounds.step,
                config.value,
            );
            widget.visible = config.visible;
            if name == TIME {
                widgets.push(Widget::toggle(ANIMATE, "Animate"));
            }
            widgets.push(widget);
        }
        widgets
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Field, &[SYSTEM, "p1", "p2", "p3", "p4"]),
            Binding::new(Recompute::Initial, &[U0, V0]),
            Binding::new(
                Recompute::Trajectory,
                &[SYSTEM, "p1", "p2", "p3", "p4", U0, V0, TIME],
            ),
            Binding::new(Recompute::Axes, &[SYSTEM]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let kind: SystemKind = snapshot.choice(SYSTEM)?;
        match which {
            Recompute::Field => {
                let model = Model::from_snapshot(kind, snapshot)?;
                let (start, end, n, head_size) = model.window();
                let points = grid(start, end, n);
                let mut derivative = [0.0; 2];
                let vectors: Vec<(f64, f64)> = points
                    .iter()
                    .map(|&(u, v)| {
                        model.apply(0.0, &[u, v], &mut derivative);
                        (derivative[0], derivative[1])
                    })
                    .collect();
                let longest = vectors
                    .iter()
                    .map(|(du, dv)| du.hypot(*dv))
                    .fold(0.0, f64::max)
                    .max(EPSILON);

                let mut xs = Vec::with_capacity(points.len());
                let mut ys = Vec::with_capacity(points.len());
                let mut head_x = Vec::with_capacity(points.len());
                let mut head_y = Vec::with_capacity(points.len());
                let mut angle = Vec::with_capacity(points.len());
                for (&(u, v), &(du, dv)) in points.iter().zip(&vectors) {
                    let (du, dv) = (du / longest, dv / longest);
                    let direction = dv.atan2(du);
                    xs.push(vec![u, u + du]);
                    ys.push(vec![v, v + dv]);
                    head_x.push(u + du + HEAD_OFFSET * direction.cos());
                    head_y.push(v + dv + HEAD_OFFSET * direction.sin());
                    angle.push(direction);
                }
                let sizes = vec![head_size; head_x.len()];
                Ok(Update::new()
                    .sink("arrows", ColumnData::lines(xs, ys))
                    .sink(
                        "heads",
                        ColumnData::new()
                            .with("x", head_x)
                            .with("y", head_y)
                            .with("angle", angle)
                            .with("size", sizes),
                    ))
            }
            Recompute::Initial => Ok(Update::new().sink(
                "initial",
                ColumnData::xy(vec![snapshot.number(U0)?], vec![snapshot.number(V0)?]),
            )),
            Recompute::Trajectory => {
                let model = Model::from_snapshot(kind, snapshot)?;
                let (u, v) = model.trajectory(
                    snapshot.number(U0)?,
                    snapshot.number(V0)?,
                    snapshot.number(TIME)?,
                );
                Ok(Update::new().sink("trajectory", ColumnData::xy(u, v)))
            }
            Recompute::Axes => {
                let (x_label, y_label) = kind.axes();
                Ok(Update::new().text("x_axis", x_label).text("y_axis", y_label))
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if !change.is(SYSTEM) {
            return Ok(());
        }
        let kind: SystemKind = controls.choice(SYSTEM)?;
        let names = [PARAMETERS[0], PARAMETERS[1], PARAMETERS[2], PARAMETERS[3], U0, V0, TIME];
        for (name, config) in names.into_iter().zip(kind.sliders()) {
            controls.configure_slider(name, config.title, config.bounds, config.value)?;
            controls.set_visible(name, config.visible)?;
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
    use crate::dashboard::{AnimationEvent, Dashboard, DashboardSettings};

    fn dashboard() -> Dashboard<PhasePortrait> {
        let mut dashboard = Dashboard::new(PhasePortrait, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard
    }

    #[test]
    fn damping_regimes_satisfy_initial_conditions() {
        for &d in &[0.0, 0.5, 2.0, 4.0] {
            let (y, v) = oscillator_state(1.0, 1.0, d, 1.5, -0.5, 0.0);
            assert!((y - 1.5).abs() < 1e-12, "d = {d}");
            assert!((v + 0.5).abs() < 1e-12, "d = {d}");
        }
    }

    #[test]
    fn underdamped_solution_solves_the_ode() {
        let (m, k, d) = (2.0, 3.0, 0.4);
        let y = |t| oscillator_state(m, k, d, 1.0, 0.0, t).0;
        let h = 1e-4;
        let t = 1.7;
        let acc = (y(t + h) - 2.0 * y(t) + y(t - h)) / (h * h);
        let vel = (y(t + h) - y(t - h)) / (2.0 * h);
        assert!((m * acc + d * vel + k * y(t)).abs() < 1e-4);
    }

    #[test]
    fn velocity_is_the_derivative_of_displacement() {
        for &d in &[0.0, 0.5, 2.0, 4.0] {
            let y = |t| oscillator_state(1.0, 1.0, d, 1.5, -0.5, t).0;
            for &t in &[0.3, 1.0, 2.5] {
                let h = 1e-6;
                let slope = (y(t + h) - y(t - h)) / (2.0 * h);
                let (_, v) = oscillator_state(1.0, 1.0, d, 1.5, -0.5, t);
                assert!((slope - v).abs() < 1e-6, "d = {d}, t = {t}");
            }
        }
    }

    #[test]
    fn undamped_orbit_stays_on_energy_level() {
        let model = Model::Oscillator {
            mass: 1.0,
            stiffness: 1.0,
            damping: 0.0,
        };
        let (u, v) = model.trajectory(1.0, 0.0, 2.0 * PI);
        assert_eq!(u.len(), TRAJECTORY_SAMPLES);
        for (u, v) in u.iter().zip(&v) {
            assert!((u * u + v * v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn predator_prey_keeps_every_hundredth_step_inside_box() {
        let model = Model::LotkaVolterra {
            alpha: 6.0,
            beta: 2.0,
            gamma: 1.0,
            delta: 3.0,
        };
        let (u, v) = model.trajectory(5.0, 2.0, 0.2);
        assert_eq!(u.len(), EULER_STEPS / KEEP_EVERY);
        assert!(u.iter().chain(&v).all(|x| x.abs() <= ESCAPE_BOX));
        assert_eq!((u[0], v[0]), (5.0, 2.0));
    }

    #[test]
    fn switching_system_reconfigures_sliders() {
        let mut dashboard = dashboard();
        let frame = dashboard
            .set_choice(SYSTEM, SystemKind::PredatorPrey)
            .unwrap();
        assert_eq!(frame.recomputes, 4);
        assert_eq!(frame.texts["x_axis"], "Prey u");
        let p4 = dashboard.widget("p4").unwrap();
        assert!(p4.visible);
        assert_eq!(p4.title, "Predator death rate delta");
        assert_eq!(dashboard.snapshot().number(TIME).unwrap(), 0.2);
        assert_eq!(frame.sinks["heads"].values("size").unwrap()[0], 7.0);
    }

    #[test]
    fn field_vectors_are_scaled_to_unit_maximum() {
        let dashboard = dashboard();
        let arrows = dashboard.sink().get("arrows").unwrap();
        let xs = arrows.polylines("xs").unwrap();
        let ys = arrows.polylines("ys").unwrap();
        let longest = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| (x[1] - x[0]).hypot(y[1] - y[0]))
            .fold(0.0, f64::max);
        assert!((longest - 1.0).abs() < 1e-12);
    }

    #[test]
    fn animation_advances_end_time() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_flag(ANIMATE, true).unwrap();
        let Some(AnimationEvent::Started { handle, interval_ms, .. }) = frame.animation else {
            panic!("animation did not start");
        };
        assert_eq!(interval_ms, 100);
        let frame = dashboard.tick(handle).unwrap();
        assert!((dashboard.snapshot().number(TIME).unwrap() - 1.1).abs() < 1e-12);
        assert!(frame.sinks.contains_key("trajectory"));
    }
}
