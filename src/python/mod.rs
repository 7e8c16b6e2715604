//! Python extension module (`python` feature).

pub mod bindings;
pub mod numpy_bridge;
