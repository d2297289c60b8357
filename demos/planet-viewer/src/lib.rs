use wasm_bindgen::prelude::*;
use globe_engine::*;

pub mod catalog;
pub mod panel;
pub mod settings;
pub mod viewer;
use viewer::PlanetViewer;

globe_web::export_viewer!(PlanetViewer, "planet-viewer");

/// Catalog names in table order, for the host's datalist and selector.
#[wasm_bindgen]
pub fn planet_names() -> js_sys::Array {
    match catalog::PlanetCatalog::load() {
        Ok(catalog) => catalog.names().map(JsValue::from).collect(),
        Err(err) => {
            log::error!("planet table failed to load: {err}");
            js_sys::Array::new()
        }
    }
}

/// Texture paths in table order; empty strings where a planet has none.
#[wasm_bindgen]
pub fn planet_textures() -> js_sys::Array {
    match catalog::PlanetCatalog::load() {
        Ok(catalog) => catalog
            .iter()
            .map(|p| JsValue::from(p.texture.as_deref().unwrap_or("")))
            .collect(),
        Err(err) => {
            log::error!("planet table failed to load: {err}");
            js_sys::Array::new()
        }
    }
}
