//! The interactive explorations, one module per plot.

pub mod complex_numbers;
pub mod complex_roots;
pub mod differentiability;
pub mod direction_field;
pub mod elementary_functions;
pub mod epsilon_delta;
pub mod epsilon_sequences;
pub mod finite_elements;
pub mod fourier_series;
pub mod heat_conduction;
pub mod integrals_and_derivatives;
pub mod inverse_functions;
pub mod linear_maps;
pub mod multivariable_functions;
pub mod parametric_curves;
pub mod phase_portrait;
pub mod riemann_sums;
pub mod series;
pub mod stepwise_drawing;
pub mod string_vibration;
pub mod taylor_polynomials;
pub mod transport_equation;
pub mod trigonometric_functions;
pub mod variational_formulation;
pub mod waves;

use crate::dashboard::{
    Dashboard, DashboardResult, DashboardSession, DashboardSettings, Visualization,
};

/// Every plot the crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    ElementaryFunctions,
    Differentiability,
    TaylorPolynomials,
    TrigonometricFunctions,
    EpsilonDelta,
    EpsilonSequences,
    StepwiseDrawing,
    IntegralsAndDerivatives,
    RiemannSums,
    Series,
    InverseFunctions,
    ComplexNumbers,
    ComplexRoots,
    LinearMaps,
    MultivariableFunctions,
    ParametricCurves,
    DirectionField,
    PhasePortrait,
    FourierSeries,
    HeatConduction,
    Waves,
    StringVibration,
    FiniteElements,
    VariationalFormulation,
    TransportEquation,
}

fn boxed<V>(
    visualization: V,
    settings: DashboardSettings,
) -> DashboardResult<Box<dyn DashboardSession>>
where
    V: Visualization + 'static,
{
    Ok(Box::new(Dashboard::new(visualization, settings)?))
}

impl PlotKind {
    /// Builds a fresh dashboard for this plot. It still needs `populate`.
    pub fn open(self, settings: DashboardSettings) -> DashboardResult<Box<dyn DashboardSession>> {
        match self {
            PlotKind::ElementaryFunctions => {
                boxed(elementary_functions::ElementaryFunctions::default(), settings)
            }
            PlotKind::Differentiability => boxed(differentiability::Differentiability, settings),
            PlotKind::TaylorPolynomials => boxed(taylor_polynomials::TaylorPolynomials, settings),
            PlotKind::TrigonometricFunctions => {
                boxed(trigonometric_functions::TrigonometricFunctions, settings)
            }
            PlotKind::EpsilonDelta => boxed(epsilon_delta::EpsilonDelta, settings),
            PlotKind::EpsilonSequences => boxed(epsilon_sequences::EpsilonSequences, settings),
            PlotKind::StepwiseDrawing => boxed(stepwise_drawing::StepwiseDrawing, settings),
            PlotKind::IntegralsAndDerivatives => {
                boxed(integrals_and_derivatives::IntegralsAndDerivatives, settings)
            }
            PlotKind::RiemannSums => boxed(riemann_sums::RiemannSums, settings),
            PlotKind::Series => boxed(series::Series, settings),
            PlotKind::InverseFunctions => boxed(inverse_functions::InverseFunctions, settings),
            PlotKind::ComplexNumbers => {
                boxed(complex_numbers::ComplexNumbers::default(), settings)
            }
            PlotKind::ComplexRoots => boxed(complex_roots::ComplexRoots::default(), settings),
            PlotKind::LinearMaps => boxed(linear_maps::LinearMaps, settings),
            PlotKind::MultivariableFunctions => {
                boxed(multivariable_functions::MultivariableFunctions, settings)
            }
            PlotKind::ParametricCurves => boxed(parametric_curves::ParametricCurves, settings),
            PlotKind::DirectionField => boxed(direction_field::DirectionField, settings),
            PlotKind::PhasePortrait => boxed(phase_portrait::PhasePortrait, settings),
            PlotKind::FourierSeries => boxed(fourier_series::FourierSeries, settings),
            PlotKind::HeatConduction => boxed(heat_conduction::HeatConduction, settings),
            PlotKind::Waves => boxed(waves::Waves, settings),
            PlotKind::StringVibration => boxed(string_vibration::StringVibration, settings),
            PlotKind::FiniteElements => boxed(finite_elements::FiniteElements, settings),
            PlotKind::VariationalFormulation => {
                boxed(variational_formulation::VariationalFormulation, settings)
            }
            PlotKind::TransportEquation => {
                boxed(transport_equation::TransportEquation, settings)
            }
        }
    }
}
