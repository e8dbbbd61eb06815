use wasm_bindgen::prelude::*;
use folio_engine::*;

pub mod catalog;
pub mod drag;
pub mod sphere;
pub mod widget;
pub mod wireframe;
pub use widget::SkillGlobe;

folio_web::export_widget!(SkillGlobe, "skill-globe", vectors);
