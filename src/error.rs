use std::fmt;

/// Reasons an allocation request is refused. A refused request never changes
/// the page table or the process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    ProcessTableFull,
    InsufficientMemory {
        process_id: i32,
        pages_needed: usize,
        pages_free: usize,
    },
    DuplicateProcessId(i32),
    InvalidProcessId(i32),
    ZeroSize(i32),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::ProcessTableFull => write!(f, "process table full"),
            AllocError::InsufficientMemory { process_id, pages_needed, pages_free } => write!(
                f,
                "not enough memory for process {} (needs {} pages, {} free)",
                process_id, pages_needed, pages_free
            ),
            AllocError::DuplicateProcessId(id) => write!(f, "process {} is already in memory", id),
            AllocError::InvalidProcessId(id) => write!(f, "invalid process id {}", id),
            AllocError::ZeroSize(id) => write!(f, "process {} requested 0 bytes", id),
        }
    }
}

impl std::error::Error for AllocError {}
