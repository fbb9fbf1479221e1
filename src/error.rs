//! Start-up errors
//!
//! The simulation itself never fails; everything here happens while the
//! host wires up the page, the GPU and the configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// No browser window or document
    #[error("No browser window/document available")]
    NoWindow,

    /// Canvas element missing or of the wrong type
    #[error("Canvas element '{0}' not found")]
    NoCanvas(String),

    /// Surface creation failed
    #[error("Failed to create render surface: {0}")]
    Surface(String),

    /// No suitable GPU adapter found
    #[error("No suitable GPU adapter found: {0}")]
    NoAdapter(String),

    /// GPU device request failed
    #[error("GPU device request failed: {0}")]
    Device(String),

    /// Tuning file could not be read (native runs)
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning override could not be parsed
    #[error("Invalid tuning: {0}")]
    Tuning(#[from] serde_json::Error),

    /// Tuning override parsed but holds an unusable value
    #[error("Invalid tuning value for {field}: {value}")]
    TuningValue { field: &'static str, value: f32 },
}
