//! A dashboard session driven from the browser.

use anyhow::{Context, Result};
use expmath_core::catalog;
use expmath_core::dashboard::{
    AnimationHandle, DashboardSession, DashboardSettings, Frame, WidgetValue,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub struct WasmDashboard {
    slug: &'static str,
    session: Box<dyn DashboardSession>,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Opens the plot at `path`. `settings_val` may be `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(path: &str, settings_val: JsValue) -> Result<WasmDashboard, JsValue> {
        console_error_panic_hook::set_once();

        let settings: DashboardSettings = if settings_val.is_undefined() || settings_val.is_null()
        {
            DashboardSettings::default()
        } else {
            from_value(settings_val)
                .map_err(|e| JsValue::from_str(&format!("Invalid dashboard settings: {}", e)))?
        };
        Self::open(path, settings).map_err(to_js_error)
    }

    pub fn slug(&self) -> String {
        self.slug.to_string()
    }

    pub fn populate(&mut self) -> Result<JsValue, JsValue> {
        let frame = self.populate_frame().map_err(to_js_error)?;
        to_js(&frame)
    }

    pub fn refresh(&mut self) -> Result<JsValue, JsValue> {
        let frame = self
            .session
            .refresh()
            .context("Refresh failed")
            .map_err(to_js_error)?;
        to_js(&frame)
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> Result<JsValue, JsValue> {
        self.write(name, WidgetValue::Number(value))
    }

    pub fn set_index(&mut self, name: &str, index: u32) -> Result<JsValue, JsValue> {
        self.write(name, WidgetValue::Index(index as usize))
    }

    pub fn set_flag(&mut self, name: &str, flag: bool) -> Result<JsValue, JsValue> {
        self.write(name, WidgetValue::Flag(flag))
    }

    pub fn set_range(&mut self, name: &str, lo: f64, hi: f64) -> Result<JsValue, JsValue> {
        self.write(name, WidgetValue::Range(lo, hi))
    }

    /// Applies several writes at once, e.g. `[["a", {"type": "number", "value": 1}]]`.
    pub fn apply_batch(&mut self, writes_val: JsValue) -> Result<JsValue, JsValue> {
        let writes: Vec<(String, WidgetValue)> = from_value(writes_val)
            .map_err(|e| JsValue::from_str(&format!("Invalid widget writes: {}", e)))?;
        let frame = self.apply(&writes).map_err(to_js_error)?;
        to_js(&frame)
    }

    /// Called by the host timer with the handle it was started with.
    pub fn tick(&mut self, handle: u32) -> Result<JsValue, JsValue> {
        let frame = self.tick_frame(handle).map_err(to_js_error)?;
        to_js(&frame)
    }

    pub fn widgets(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.widgets())
    }

    pub fn animation_handle(&self) -> Option<u32> {
        self.session.animation_handle().map(AnimationHandle::id)
    }
}

impl WasmDashboard {
    fn open(path: &str, settings: DashboardSettings) -> Result<Self> {
        let (entry, session) = catalog::open(path, settings)?;
        Ok(Self {
            slug: entry.slug,
            session,
        })
    }

    fn populate_frame(&mut self) -> Result<Frame> {
        self.session
            .populate()
            .with_context(|| format!("Populating {} failed", self.slug))
    }

    fn write(&mut self, name: &str, value: WidgetValue) -> Result<JsValue, JsValue> {
        let frame = self
            .apply(&[(name.to_string(), value)])
            .map_err(to_js_error)?;
        to_js(&frame)
    }

    fn apply(&mut self, writes: &[(String, WidgetValue)]) -> Result<Frame> {
        self.session
            .apply_batch(writes)
            .with_context(|| format!("Updating {} failed", self.slug))
    }

    fn tick_frame(&mut self, handle: u32) -> Result<Frame> {
        self.session
            .tick(AnimationHandle::from_id(handle))
            .context("Animation tick failed")
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::WasmDashboard;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn constructor_rejects_unknown_plots() {
        let result = WasmDashboard::new("nowhere", JsValue::UNDEFINED);
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("Plot nowhere not found"));
    }

    #[wasm_bindgen_test]
    fn populate_returns_a_frame_object() {
        let mut dashboard = WasmDashboard::new("linear_maps", JsValue::UNDEFINED).expect("open");
        let frame = dashboard.populate().expect("populate");
        assert!(frame.is_object());
    }
}
