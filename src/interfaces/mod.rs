//! Boundary adapters consumed by the demo driver: CSV seed loading and final
//! state output.

pub mod csv;
