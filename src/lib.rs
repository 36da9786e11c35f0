pub mod allocator;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logging;
pub mod memory;
pub mod page_table;
pub mod process_table;
pub mod report;

// Re-export commonly used items for convenience
pub use allocator::{Allocator, FreeOutcome};
pub use config::MemoryConfig;
pub use constants::*;
pub use error::AllocError;
