pub mod color;
pub mod draw_list;
pub mod surface;
#[cfg(feature = "vectors")]
pub mod tessellate;
