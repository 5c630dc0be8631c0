pub mod randomized;

// Re-export all modules
pub use randomized::*;
