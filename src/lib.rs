//! Ozone hole evolution engine: a bounded B3/S23 variant checked against a
//! predicted end state.

pub mod ozone;
pub use ozone::{Grid, OzoneConfig, OzoneEngine, OzoneError};
