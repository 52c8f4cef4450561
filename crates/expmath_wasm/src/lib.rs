//! Browser bindings for the expmath dashboards.
//!
//! The host page opens a [`WasmDashboard`] for the current route, renders the
//! frame returned by `populate`, and forwards every widget edit. Frames are
//! plain JS objects; animation frames carry the handle the host timer must
//! pass back to `tick`.

mod catalog;
mod session;

pub use catalog::{list_plots, resolve_plot};
pub use session::WasmDashboard;
