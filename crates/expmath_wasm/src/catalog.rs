//! Plot listing and routing for the site navigation.

use expmath_core::catalog::{self, CatalogEntry};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// All plots as `{slug, title, topic}` objects, in menu order.
#[wasm_bindgen]
pub fn list_plots() -> Result<JsValue, JsValue> {
    let entries: Vec<&CatalogEntry> = catalog::entries().iter().collect();
    to_value(&entries).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Resolves a URL path to its catalog entry, or rejects with a message that
/// may name the closest known plot.
#[wasm_bindgen]
pub fn resolve_plot(path: &str) -> Result<JsValue, JsValue> {
    let entry = catalog::resolve(path).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_value(entry).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::{list_plots, resolve_plot};
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn list_has_one_object_per_plot() {
        let plots = list_plots().expect("list");
        let plots = js_sys::Array::from(&plots);
        assert_eq!(plots.length() as usize, expmath_core::catalog::CATALOG.len());
    }

    #[wasm_bindgen_test]
    fn misspelt_path_names_the_closest_plot() {
        let message = resolve_plot("/rieman_sums")
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("did you mean riemann_sums?"));
    }
}
