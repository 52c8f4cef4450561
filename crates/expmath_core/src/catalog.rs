//! Routing from URL paths to plots.

use serde::Serialize;
use thiserror::Error;

use crate::dashboard::{DashboardError, DashboardSession, DashboardSettings};
use crate::plots::PlotKind;

/// Slugs at least this similar to an unknown path are offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Analysis1,
    LinearAlgebra,
    Analysis2,
    OrdinaryDifferentialEquations,
    PartialDifferentialEquations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub topic: Topic,
    #[serde(skip)]
    pub kind: PlotKind,
}

const fn entry(
    slug: &'static str,
    title: &'static str,
    topic: Topic,
    kind: PlotKind,
) -> CatalogEntry {
    CatalogEntry {
        slug,
        title,
        topic,
        kind,
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    entry(
        "elementary_functions",
        "Elementary functions",
        Topic::Analysis1,
        PlotKind::ElementaryFunctions,
    ),
    entry("differentiability", "Differentiability", Topic::Analysis1, PlotKind::Differentiability),
    entry(
        "taylor_polynomials",
        "Taylor polynomials",
        Topic::Analysis1,
        PlotKind::TaylorPolynomials,
    ),
    entry(
        "trigonometric_functions",
        "Trigonometric functions",
        Topic::Analysis1,
        PlotKind::TrigonometricFunctions,
    ),
    entry("epsilon_delta", "Epsilon-delta criterion", Topic::Analysis1, PlotKind::EpsilonDelta),
    entry(
        "epsilon_sequences",
        "Epsilon criterion for sequences",
        Topic::Analysis1,
        PlotKind::EpsilonSequences,
    ),
    entry("stepwise_drawing", "Drawing step by step", Topic::Analysis1, PlotKind::StepwiseDrawing),
    entry(
        "integrals_and_derivatives",
        "Integrals and derivatives",
        Topic::Analysis1,
        PlotKind::IntegralsAndDerivatives,
    ),
    entry("riemann_sums", "Riemann sums", Topic::Analysis1, PlotKind::RiemannSums),
    entry("series", "Series", Topic::Analysis1, PlotKind::Series),
    entry("inverse_functions", "Inverse functions", Topic::Analysis1, PlotKind::InverseFunctions),
    entry("complex_numbers", "Complex numbers", Topic::LinearAlgebra, PlotKind::ComplexNumbers),
    entry(
        "complex_roots",
        "Roots of complex numbers",
        Topic::LinearAlgebra,
        PlotKind::ComplexRoots,
    ),
    entry("linear_maps", "Linear maps", Topic::LinearAlgebra, PlotKind::LinearMaps),
    entry(
        "multivariable_functions",
        "Functions of several variables",
        Topic::Analysis2,
        PlotKind::MultivariableFunctions,
    ),
    entry(
        "parametric_curves",
        "Parametrized curves in the plane",
        Topic::Analysis2,
        PlotKind::ParametricCurves,
    ),
    entry(
        "direction_field",
        "Direction fields",
        Topic::OrdinaryDifferentialEquations,
        PlotKind::DirectionField,
    ),
    entry(
        "phase_portrait",
        "Phase portraits",
        Topic::OrdinaryDifferentialEquations,
        PlotKind::PhasePortrait,
    ),
    entry(
        "fourier_series",
        "Fourier series",
        Topic::PartialDifferentialEquations,
        PlotKind::FourierSeries,
    ),
    entry(
        "heat_conduction",
        "Heat conduction",
        Topic::PartialDifferentialEquations,
        PlotKind::HeatConduction,
    ),
    entry("waves", "Waves", Topic::PartialDifferentialEquations, PlotKind::Waves),
    entry(
        "string_vibration",
        "Vibrating string",
        Topic::PartialDifferentialEquations,
        PlotKind::StringVibration,
    ),
    entry(
        "finite_elements",
        "Finite elements",
        Topic::PartialDifferentialEquations,
        PlotKind::FiniteElements,
    ),
    entry(
        "variational_formulation",
        "Variational formulation",
        Topic::PartialDifferentialEquations,
        PlotKind::VariationalFormulation,
    ),
    entry(
        "transport_equation",
        "Transport equation",
        Topic::PartialDifferentialEquations,
        PlotKind::TransportEquation,
    ),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Plot {path} not found{}", suggestion_hint(.suggestion))]
    NotFound {
        path: String,
        suggestion: Option<&'static str>,
    },
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(slug) => format!(", did you mean {slug}?"),
        None => String::new(),
    }
}

pub fn entries() -> &'static [CatalogEntry] {
    CATALOG
}

/// Maps a path such as `/Complex_Numbers/` to its entry.
pub fn resolve(path: &str) -> Result<&'static CatalogEntry, CatalogError> {
    let slug = path.trim_matches('/').to_lowercase();
    CATALOG
        .iter()
        .find(|e| e.slug == slug)
        .ok_or_else(|| CatalogError::NotFound {
            path: path.to_string(),
            suggestion: suggest(&slug),
        })
}

/// The known slug closest to `slug`, if any is close enough.
pub fn suggest(slug: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .map(|e| (e.slug, strsim::jaro_winkler(slug, e.slug)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slug, _)| slug)
}

/// Resolves `path` and opens its dashboard, which still needs `populate`.
pub fn open(
    path: &str,
    settings: DashboardSettings,
) -> Result<(&'static CatalogEntry, Box<dyn DashboardSession>), CatalogError> {
    let entry = resolve(path)?;
    let session = entry.kind.open(settings)?;
    Ok((entry, session))
}
