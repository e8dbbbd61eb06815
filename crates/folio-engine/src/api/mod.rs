pub mod error;
pub mod overrides;
pub mod types;
pub mod widget;
