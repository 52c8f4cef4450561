//! Scalar conservation laws `u_t + F(u, x)_x = 0` solved along characteristics.
//!
//! The upper plot shows `u(t, x)`, the lower one the characteristics in the
//! `(x, t)` plane together with the current time. Traffic fluxes propagate
//! the initial density unchanged, Burgers' flux steepens it into a shock
//! (the drawn profile overturns past the breaking time) and opens
//! rarefaction gaps, and a location dependent flux bends the characteristics.

use crate::dashboard::{
    AnimationSpec, Binding, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot,
    Update, Visualization, Widget, WidgetValue,
};
use crate::sampling::{linspace, EPSILON};

const FLUX: &str = "flux";
const PARAMETER: &str = "parameter";
const ANIMATE: &str = "animate";
const TIME: &str = "time";
const ADVANCED: &str = "advanced";
const INITIAL: &str = "initial";
const INITIAL_C: &str = "initial_c";
const INITIAL_D: &str = "initial_d";

const DOMAIN: (f64, f64) = (-5.0, 5.0);
const SAMPLES: usize = 100;
/// Four characteristics per unit length.
const CHARACTERISTICS: usize = 41;
/// Horizontal extent of a drawn straight characteristic.
const OFFSET: f64 = 5.0;
/// End time of vertical characteristics, far above the view.
const VERTICAL_END: f64 = 1e4;
const CURVE_SAMPLES: usize = 50;
/// "Half the speedometer" rule of driving schools, in 1/h.
const K: f64 = 2000.0;
const TIME_LINE: (f64, f64) = (-20.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flux {
    Constant,
    IdealSchool,
    School,
    Burgers,
    LocationDependent,
}

impl Choice for Flux {
    const ALL: &'static [Self] = &[
        Flux::Constant,
        Flux::IdealSchool,
        Flux::School,
        Flux::Burgers,
        Flux::LocationDependent,
    ];

    fn label(self) -> &'static str {
        match self {
            Flux::Constant => "Constant speed u_t + [c u]_x = 0",
            Flux::IdealSchool => "Idealized driving school u_t + [k]_x = 0",
            Flux::School => "Driving school u_t + [k (1/u - l) u]_x = 0",
            Flux::Burgers => "Burgers' equation u_t + [a u^2]_x = 0",
            Flux::LocationDependent => "Location dependent flux u_t + [a x u]_x = 0",
        }
    }
}

impl Flux {
    pub fn parameter_title(self) -> &'static str {
        match self {
            Flux::Constant => "Vehicle speed in km/h",
            Flux::IdealSchool => "Without effect",
            Flux::School => "Vehicle length in m",
            Flux::Burgers | Flux::LocationDependent => "Parameter a",
        }
    }

    /// Speed of the characteristics when it does not depend on `u` or `x`.
    fn constant_speed(self, a: f64) -> Option<f64> {
        match self {
            Flux::Constant => Some(a),
            Flux::IdealSchool => Some(0.0),
            // The length slider is in metres.
            Flux::School => Some(-a * 0.001 * K),
            Flux::Burgers | Flux::LocationDependent => None,
        }
    }

    /// Solution samples over the view as polylines `(xs, us)`.
    pub fn solution(self, a: f64, t: f64, initial: &Profile) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let grid = linspace(DOMAIN.0, DOMAIN.1, SAMPLES);
        let points: Vec<(usize, f64, f64)> = match self {
            // Forward along the characteristics, so the profile may overturn.
            Flux::Burgers => grid
                .iter()
                .filter_map(|&xi| {
                    let (branch, u) = initial.eval(xi)?;
                    Some((branch, xi + a * u * t, u))
                })
                .collect(),
            Flux::LocationDependent => {
                let decay = (-a * t).exp();
                grid.iter()
                    .filter_map(|&x| {
                        let (branch, u) = initial.eval(x * decay)?;
                        Some((branch, x, u * decay))
                    })
                    .collect()
            }
            _ => {
                let speed = self.constant_speed(a).unwrap_or(0.0);
                grid.iter()
                    .filter_map(|&x| {
                        let (branch, u) = initial.eval(x - speed * t)?;
                        Some((branch, x, u))
                    })
                    .collect()
            }
        };
        split_branches(points)
    }

    /// Characteristics starting on the x axis, as polylines `(xs, ts)`.
    pub fn characteristics(self, a: f64, initial: &Profile) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        linspace(DOMAIN.0, DOMAIN.1, CHARACTERISTICS)
            .into_iter()
            .filter_map(|x0| match self {
                Flux::Burgers => {
                    let (_, u) = initial.eval(x0)?;
                    Some(straight(x0, a * u))
                }
                Flux::LocationDependent => bent(x0, a),
                _ => Some(straight(x0, self.constant_speed(a).unwrap_or(0.0))),
            })
            .unzip()
    }
}

/// A straight characteristic of slope `dx/dt = speed`, spanning `OFFSET` in x.
fn straight(x0: f64, speed: f64) -> (Vec<f64>, Vec<f64>) {
    if speed.abs() < EPSILON {
        return (vec![x0, x0], vec![0.0, VERTICAL_END]);
    }
    let end = OFFSET / speed.abs();
    if speed > 0.0 {
        (vec![x0, x0 + OFFSET], vec![0.0, end])
    } else {
        (vec![x0 - OFFSET, x0], vec![end, 0.0])
    }
}

/// `t = ln(x / x0) / a` along `dx/dt = a x`. No characteristic leaves the origin.
fn bent(x0: f64, a: f64) -> Option<(Vec<f64>, Vec<f64>)> {
    if x0.abs() < EPSILON {
        return None;
    }
    let xs = if x0 < 0.0 {
        linspace(x0 - OFFSET, x0, CURVE_SAMPLES)
    } else {
        linspace(x0, x0 + OFFSET, CURVE_SAMPLES)
    };
    let ts = xs.iter().map(|&x| (x / x0).ln() / a).collect();
    Some((xs, ts))
}

/// Starts a new polyline wherever the branch of the initial condition changes.
fn split_branches(points: Vec<(usize, f64, f64)>) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut xs: Vec<Vec<f64>> = Vec::new();
    let mut us: Vec<Vec<f64>> = Vec::new();
    let mut current = None;
    for (branch, x, u) in points {
        if current != Some(branch) {
            xs.push(Vec::new());
            us.push(Vec::new());
            current = Some(branch);
        }
        if let (Some(line_x), Some(line_u)) = (xs.last_mut(), us.last_mut()) {
            line_x.push(x);
            line_u.push(u);
        }
    }
    (xs, us)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initial {
    Bell,
    PiecewiseLinear,
    JumpWithGap,
}

impl Choice for Initial {
    const ALL: &'static [Self] = &[Initial::Bell, Initial::PiecewiseLinear, Initial::JumpWithGap];

    fn label(self) -> &'static str {
        match self {
            Initial::Bell => "Bell",
            Initial::PiecewiseLinear => "Piecewise linear",
            Initial::JumpWithGap => "Jump with gap",
        }
    }
}

impl Initial {
    pub fn titles(self) -> (&'static str, &'static str) {
        match self {
            Initial::Bell => ("Mean", "Standard deviation"),
            Initial::PiecewiseLinear => ("First corner", "Second corner"),
            Initial::JumpWithGap => ("Height of the right part", "Start of the right part"),
        }
    }
}

/// An initial condition with its two parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub shape: Initial,
    pub c: f64,
    pub d: f64,
}

impl Profile {
    /// `u(0, x)` and the branch it lies on, `None` inside the gap.
    pub fn eval(&self, x: f64) -> Option<(usize, f64)> {
        let Profile { shape, c, d } = *self;
        match shape {
            Initial::Bell => {
                let variance = d * d;
                let density = (-(x - c).powi(2) / (2.0 * variance)).exp()
                    / (2.0 * std::f64::consts::PI * variance).sqrt();
                Some((0, density))
            }
            Initial::PiecewiseLinear => {
                let left = c.min(d);
                let mut right = c.max(d);
                if right == left {
                    right += EPSILON;
                }
                let u = if x < left {
                    1.0
                } else if x <= right {
                    (right - x) / (right - left)
                } else {
                    0.0
                };
                Some((0, u))
            }
            Initial::JumpWithGap if x < 0.0 => Some((0, 0.0)),
            Initial::JumpWithGap if x >= d => Some((1, c)),
            Initial::JumpWithGap => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Solution,
    Characteristics,
    TimeLine,
}

#[derive(Debug, Clone, Default)]
pub struct TransportEquation;

fn profile(snapshot: &Snapshot) -> DashboardResult<Profile> {
    Ok(Profile {
        shape: snapshot.choice(INITIAL)?,
        c: snapshot.number(INITIAL_C)?,
        d: snapshot.number(INITIAL_D)?,
    })
}

impl Visualization for TransportEquation {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let (title_c, title_d) = Initial::Bell.titles();
        vec![
            Widget::dropdown(FLUX, "Type of the flux", Flux::Constant),
            Widget::slider(PARAMETER, Flux::Constant.parameter_title(), 0.1, 10.0, 0.1, 1.0),
            Widget::toggle(ANIMATE, "Animate"),
            Widget::slider(TIME, "Time", 0.0, 10.0, 0.1, 0.0),
            Widget::toggle(ADVANCED, "More options"),
            Widget::buttons(INITIAL, Initial::Bell).hidden(),
            Widget::slider(INITIAL_C, title_c, 0.0, 5.0, 0.1, 1.0).hidden(),
            Widget::slider(INITIAL_D, title_d, 0.1, 5.0, 0.1, 0.4).hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(
                Recompute::Solution,
                &[FLUX, PARAMETER, TIME, INITIAL, INITIAL_C, INITIAL_D],
            ),
            Binding::new(
                Recompute::Characteristics,
                &[FLUX, PARAMETER, INITIAL, INITIAL_C, INITIAL_D],
            ),
            Binding::new(Recompute::TimeLine, &[TIME]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        match which {
            Recompute::Solution => {
                let flux: Flux = snapshot.choice(FLUX)?;
                let (xs, us) = flux.solution(
                    snapshot.number(PARAMETER)?,
                    snapshot.number(TIME)?,
                    &profile(snapshot)?,
                );
                Ok(Update::new().sink("solution", ColumnData::lines(xs, us)))
            }
            Recompute::Characteristics => {
                let flux: Flux = snapshot.choice(FLUX)?;
                let a = snapshot.number(PARAMETER)?;
                let (xs, ts) = flux.characteristics(a, &profile(snapshot)?);
                Ok(Update::new().sink(
                    "characteristics",
                    ColumnData::new().with("xs", xs).with("ts", ts),
                ))
            }
            Recompute::TimeLine => {
                let t = snapshot.number(TIME)?;
                Ok(Update::new().sink(
                    "time_line",
                    ColumnData::xy(vec![TIME_LINE.0, TIME_LINE.1], vec![t, t]),
                ))
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(FLUX) {
            let flux: Flux = controls.choice(FLUX)?;
            controls.set_title(PARAMETER, flux.parameter_title())?;
        } else if change.is(INITIAL) {
            let (title_c, title_d) = controls.choice::<Initial>(INITIAL)?.titles();
            controls.set_title(INITIAL_C, title_c)?;
            controls.set_title(INITIAL_D, title_d)?;
        } else if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            for name in [INITIAL, INITIAL_C, INITIAL_D] {
                controls.set_visible(name, true)?;
            }
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

    const BELL: Profile = Profile {
        shape: Initial::Bell,
        c: 1.0,
        d: 0.4,
    };

    const JUMP: Profile = Profile {
        shape: Initial::JumpWithGap,
        c: 1.0,
        d: 0.4,
    };

    fn peak(xs: &[Vec<f64>], us: &[Vec<f64>]) -> f64 {
        let (x, _) = xs[0]
            .iter()
            .zip(&us[0])
            .fold((f64::NAN, f64::NEG_INFINITY), |best, (&x, &u)| {
                if u > best.1 {
                    (x, u)
                } else {
                    best
                }
            });
        x
    }

    #[test]
    fn bell_is_a_normal_density() {
        let (_, top) = BELL.eval(1.0).unwrap();
        assert!((top - 1.0 / (0.4 * (2.0 * std::f64::consts::PI).sqrt())).abs() < 1e-12);
        let (_, side) = BELL.eval(1.4).unwrap();
        assert!((side / top - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn piecewise_linear_drops_between_its_corners() {
        let ramp = Profile {
            shape: Initial::PiecewiseLinear,
            c: 2.0,
            d: 1.0,
        };
        assert_eq!(ramp.eval(0.5), Some((0, 1.0)));
        assert_eq!(ramp.eval(1.5), Some((0, 0.5)));
        assert_eq!(ramp.eval(3.0), Some((0, 0.0)));
        let step = Profile { c: 1.0, ..ramp };
        assert_eq!(step.eval(0.99), Some((0, 1.0)));
        assert_eq!(step.eval(1.01), Some((0, 0.0)));
    }

    #[test]
    fn jump_leaves_a_gap() {
        assert_eq!(JUMP.eval(-0.1), Some((0, 0.0)));
        assert_eq!(JUMP.eval(0.2), None);
        assert_eq!(JUMP.eval(0.4), Some((1, 1.0)));
    }

    #[test]
    fn constant_flux_moves_the_bell_right() {
        let (xs, us) = Flux::Constant.solution(2.0, 1.0, &BELL);
        assert_eq!(xs.len(), 1);
        assert!((peak(&xs, &us) - 3.0).abs() < 0.06);
    }

    #[test]
    fn driving_school_moves_the_bell_against_the_traffic() {
        let (xs, us) = Flux::School.solution(1.0, 1.0, &BELL);
        assert!((peak(&xs, &us) + 1.0).abs() < 0.06);
        let (still_x, still_u) = Flux::IdealSchool.solution(7.0, 9.0, &BELL);
        assert!((peak(&still_x, &still_u) - 1.0).abs() < 0.06);
    }

    #[test]
    fn burgers_profile_overturns_after_breaking() {
        let monotone = |xs: &[Vec<f64>]| xs[0].windows(2).all(|w| w[0] <= w[1]);
        let (early, _) = Flux::Burgers.solution(1.0, 0.1, &BELL);
        assert!(monotone(&early));
        let (late, _) = Flux::Burgers.solution(1.0, 2.0, &BELL);
        assert!(!monotone(&late));
    }

    #[test]
    fn burgers_jump_opens_a_rarefaction_gap() {
        let (xs, us) = Flux::Burgers.solution(1.0, 2.0, &JUMP);
        assert_eq!(xs.len(), 2);
        assert!(us[0].iter().all(|&u| u == 0.0));
        assert!(*xs[0].last().unwrap() < 0.0);
        assert!(us[1].iter().all(|&u| u == 1.0));
        assert!(xs[1][0] >= 0.4 + 2.0);

        let (starts, _) = Flux::Burgers.characteristics(1.0, &JUMP);
        assert_eq!(starts.len(), CHARACTERISTICS - 2);
    }

    #[test]
    fn location_dependent_flux_conserves_mass_and_bends_characteristics() {
        let a = 0.3;
        let (xs, us) = Flux::LocationDependent.solution(a, 0.0, &BELL);
        assert!((peak(&xs, &us) - 1.0).abs() < 0.06);

        // u decays like exp(-a t) while x stretches like exp(a t).
        let t = 1.0;
        let (_, later) = Flux::LocationDependent.solution(a, t, &BELL);
        let (_, top) = BELL.eval(1.0).unwrap();
        let highest = later[0].iter().copied().fold(0.0, f64::max);
        assert!(highest <= top * (-a * t).exp() + 1e-12);

        let (cx, ct) = Flux::LocationDependent.characteristics(a, &BELL);
        assert_eq!(cx.len(), CHARACTERISTICS - 1);
        let line = cx.iter().position(|x| x[0] == 1.0).unwrap();
        let at_e = cx[line]
            .iter()
            .position(|&x| x >= std::f64::consts::E)
            .unwrap();
        assert!((ct[line][at_e] - (cx[line][at_e]).ln() / a).abs() < 1e-12);
    }

    #[test]
    fn school_characteristics_lean_left() {
        let (xs, ts) = Flux::School.characteristics(1.0, &BELL);
        assert_eq!(xs.len(), CHARACTERISTICS);
        assert_eq!(xs[0], vec![-10.0, -5.0]);
        assert_eq!(ts[0][0], OFFSET / 2.0);
        assert_eq!(ts[0][1], 0.0);
        let (vertical, _) = Flux::IdealSchool.characteristics(1.0, &BELL);
        assert!(vertical.iter().all(|x| x[0] == x[1]));
    }

    #[test]
    fn time_only_moves_the_solution_and_the_time_line() {
        let mut dashboard = Dashboard::new(TransportEquation, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_number(TIME, 2.0).unwrap();
        assert_eq!(frame.recomputes, 2);
        assert!(!frame.sinks.contains_key("characteristics"));
        assert_eq!(frame.sinks["time_line"].values("y").unwrap(), &[2.0, 2.0]);
    }

    #[test]
    fn flux_and_initial_retitle_their_sliders() {
        let mut dashboard = Dashboard::new(TransportEquation, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_choice(FLUX, Flux::School).unwrap();
        assert_eq!(frame.widget(PARAMETER).unwrap().title, "Vehicle length in m");

        let frame = dashboard.set_flag(ADVANCED, true).unwrap();
        assert_eq!(frame.widgets.len(), 4);
        assert!(!dashboard.widget(ADVANCED).unwrap().visible);
        assert!(dashboard.widget(INITIAL_D).unwrap().visible);

        let frame = dashboard.set_choice(INITIAL, Initial::JumpWithGap).unwrap();
        assert_eq!(frame.widget(INITIAL_C).unwrap().title, "Height of the right part");
        assert_eq!(frame.sinks["solution"].polylines("xs").unwrap().len(), 2);
    }
}
