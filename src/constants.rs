// size of simulated RAM in bytes
pub const RAM_SIZE: usize = 1024;
pub const PAGE_SIZE: usize = 64;
pub const NUM_PAGES: usize = RAM_SIZE / PAGE_SIZE;

pub const MAX_PROCESSES: usize = 10;

// ceilings for user-supplied geometry; both tables are allocated up front
pub const MAX_RAM_SIZE: usize = 64 * 1024 * 1024;
pub const MAX_NUM_PAGES: usize = 1 << 20;
pub const MAX_PROCESS_SLOTS: usize = 1 << 16;

// owner id of an unallocated frame, and id of a process slot that was never filled
pub const NO_PROCESS: i32 = -1;
