//! Built-in formats

pub mod js;
pub mod json;

pub use js::JsModuleFormat;
pub use json::JsonFormat;
