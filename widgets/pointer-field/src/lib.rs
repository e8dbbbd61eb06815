use wasm_bindgen::prelude::*;
use folio_engine::*;

pub mod field;
pub mod glow;
pub mod widget;
pub use widget::PointerField;

folio_web::export_widget!(PointerField, "pointer-field", vectors);
