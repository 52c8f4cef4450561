//! The `expmath_core` crate holds the reactive engine behind the expmath
//! teaching dashboards and every plot built on it.
//!
//! Key components:
//! - **Dashboard**: widgets, change batches, reactions, the data sink and animation handles.
//! - **Plots**: one `Visualization` per topic, from elementary functions to the transport equation.
//! - **Catalog**: slug routing with fuzzy suggestions for mistyped paths.
//! - **Numerics**: sampling helpers, Newton iteration with Lambert W, the Euler stepper
//!   behind the ODE plots and 2x2 eigenpairs.
pub mod catalog;
pub mod dashboard;
pub mod linalg;
pub mod plots;
pub mod sampling;
pub mod solvers;
pub mod special;
pub mod traits;
