// Library exports for reuse by integration tests and other tools
pub mod cli;
pub mod outline;
pub mod utils;

// Re-export commonly used types
pub use outline::{
    output_path_for, render_outline, OutlineConfig, OutlineEngine, OutlineResult,
};
