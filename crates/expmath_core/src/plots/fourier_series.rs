//! Truncated Fourier series of three periodic signals, with the magnitude
//! spectrum of the sampled original.

use std::f64::consts::PI;

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::dashboard::{
    Binding, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::sampling::{linspace, map};

const SIGNAL: &str = "signal";
const ORDER: &str = "order";
const ADVANCED: &str = "advanced";
const PERIOD: &str = "period";
const AMPLITUDE: &str = "amplitude";

const DOMAIN: (f64, f64) = (-3.0, 3.0);
const ORIGINAL_SAMPLES: usize = 200;
const APPROXIMATION_SAMPLES: usize = 3000;
/// Samples per period fed to the FFT.
pub const FFT_SIZE: usize = 256;
pub const HARMONICS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Rectangle,
    SawTooth,
    ArcWithGap,
}

impl Choice for Signal {
    const ALL: &'static [Self] = &[Signal::Rectangle, Signal::SawTooth, Signal::ArcWithGap];

    fn label(self) -> &'static str {
        match self {
            Signal::Rectangle => "Rectangle",
            Signal::SawTooth => "Saw tooth",
            Signal::ArcWithGap => "Arc with gap",
        }
    }
}

impl Signal {
    pub fn eval(self, x: f64, period: f64, amplitude: f64) -> f64 {
        let phase = x.rem_euclid(period);
        let first_half = phase < period / 2.0;
        match self {
            Signal::Rectangle if first_half => amplitude,
            Signal::Rectangle => -amplitude,
            Signal::SawTooth => phase * 2.0 * amplitude / period - amplitude,
            Signal::ArcWithGap if first_half => amplitude * (2.0 * PI * x / period).sin(),
            Signal::ArcWithGap => 0.0,
        }
    }

    /// Partial sum of the series up to harmonic `order`.
    pub fn approximate(self, x: f64, period: f64, amplitude: f64, order: usize) -> f64 {
        let w = 2.0 * PI * x / period;
        let mut y = match self {
            Signal::ArcWithGap => amplitude / PI,
            _ => 0.0,
        };
        for k in 1..=order {
            let kf = k as f64;
            y += match self {
                Signal::Rectangle if k % 2 == 1 => 4.0 * amplitude / (PI * kf) * (kf * w).sin(),
                Signal::Rectangle => 0.0,
                Signal::SawTooth => -2.0 * amplitude / (PI * kf) * (kf * w).sin(),
                Signal::ArcWithGap if k == 1 => amplitude / 2.0 * w.sin(),
                Signal::ArcWithGap if k % 2 == 0 => {
                    2.0 * amplitude / PI / (1.0 - kf * kf) * (kf * w).cos()
                }
                Signal::ArcWithGap => 0.0,
            };
        }
        y
    }
}

/// Amplitudes of the first `HARMONICS` harmonics, from one sampled period.
///
/// Index 0 is the mean; index `k` is `sqrt(a_k^2 + b_k^2)`.
pub fn spectrum(signal: Signal, period: f64, amplitude: f64) -> Vec<f64> {
    let mut buffer: Vec<Complex64> = (0..FFT_SIZE)
        .map(|i| {
            let x = period * i as f64 / FFT_SIZE as f64;
            Complex64::new(signal.eval(x, period, amplitude), 0.0)
        })
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);
    fft.process(&mut buffer);

    let scale = 1.0 / FFT_SIZE as f64;
    buffer
        .iter()
        .take(HARMONICS)
        .enumerate()
        .map(|(k, c)| if k == 0 { c.norm() * scale } else { 2.0 * c.norm() * scale })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Original,
    Approximation,
    Spectrum,
}

#[derive(Debug, Clone, Default)]
pub struct FourierSeries;

impl Visualization for FourierSeries {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SIGNAL, Signal::Rectangle),
            Widget::slider(ORDER, "Order of the approximation", 1.0, 50.0, 1.0, 2.0),
            Widget::toggle(ADVANCED, "Enable advanced options"),
            Widget::slider(PERIOD, "Period of the original", 0.1, 2.0, 0.1, 1.0).hidden(),
            Widget::slider(AMPLITUDE, "Amplitude of the original", -2.0, 2.0, 0.1, 1.0).hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Original, &[SIGNAL, PERIOD, AMPLITUDE]),
            Binding::new(Recompute::Approximation, &[SIGNAL, PERIOD, AMPLITUDE, ORDER]),
            Binding::new(Recompute::Spectrum, &[SIGNAL, PERIOD, AMPLITUDE]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let signal: Signal = snapshot.choice(SIGNAL)?;
        let period = snapshot.number(PERIOD)?;
        let amplitude = snapshot.number(AMPLITUDE)?;
        match which {
            Recompute::Original => {
                let x = linspace(DOMAIN.0, DOMAIN.1, ORIGINAL_SAMPLES);
                let y = map(&x, |x| signal.eval(x, period, amplitude));
                Ok(Update::new().sink("original", ColumnData::xy(x, y)))
            }
            Recompute::Approximation => {
                let order = snapshot.count(ORDER)?;
                let x = linspace(DOMAIN.0, DOMAIN.1, APPROXIMATION_SAMPLES);
                let y = map(&x, |x| signal.approximate(x, period, amplitude, order));
                Ok(Update::new().sink("approximation", ColumnData::xy(x, y)))
            }
            Recompute::Spectrum => {
                let magnitudes = spectrum(signal, period, amplitude);
                let harmonics = (0..magnitudes.len()).map(|k| k as f64).collect();
                Ok(Update::new().sink("spectrum", ColumnData::xy(harmonics, magnitudes)))
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            controls.set_visible(PERIOD, true)?;
            controls.set_visible(AMPLITUDE, true)?;
        }
        Ok(())
    }
}
