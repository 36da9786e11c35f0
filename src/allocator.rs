use std::fmt;

use log::{debug, info, warn};

use crate::config::MemoryConfig;
use crate::constants::NO_PROCESS;
use crate::error::AllocError;
use crate::memory::PhysicalMemory;
use crate::page_table::PageTable;
use crate::process_table::ProcessTable;

/// Result of releasing a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeOutcome {
    Freed { process_id: i32, pages: usize },
    NotFound { process_id: i32 },
}

impl FreeOutcome {
    #[inline]
    pub fn is_freed(&self) -> bool {
        matches!(self, FreeOutcome::Freed { .. })
    }
}

impl fmt::Display for FreeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeOutcome::Freed { process_id, .. } => {
                write!(f, "process {} freed from memory.", process_id)
            }
            FreeOutcome::NotFound { process_id } => {
                write!(f, "process {} not found in memory.", process_id)
            }
        }
    }
}

/// Owns the simulated RAM and both tables. Every mutation goes through
/// `allocate` or `free`.
pub struct Allocator {
    config: MemoryConfig,
    memory: PhysicalMemory,
    page_table: PageTable,
    process_table: ProcessTable,
}

impl Allocator {
    /// Build an allocator in the all-free state. `config` must be valid.
    pub fn new(config: MemoryConfig) -> Self {
        let memory = PhysicalMemory::new(&config);
        let mut allocator = Allocator {
            page_table: PageTable::new(memory.num_frames()),
            memory,
            process_table: ProcessTable::new(config.max_processes),
            config,
        };
        allocator.init();
        allocator
    }

    /// Zero RAM and clear both tables
    pub fn init(&mut self) {
        self.memory.clear();
        self.page_table.reset();
        self.process_table.reset();
        debug!(
            "memory initialized: {} bytes, {} pages of {} bytes, {} process slots",
            self.memory.size(),
            self.page_table.len(),
            self.config.page_size,
            self.process_table.len()
        );
    }

    /// Grant `process_id` enough frames to hold `size` bytes.
    ///
    /// Frames are taken first-fit from frame 0 with no contiguity requirement.
    /// Returns the byte offset of the first frame granted. Use `frames_of`
    /// for the full set.
    ///
    /// On error neither table is modified.
    pub fn allocate(&mut self, process_id: i32, size: usize) -> Result<usize, AllocError> {
        let result = self.try_allocate(process_id, size);
        match &result {
            Ok(offset) => info!(
                "process {} allocated {} bytes at offset {}",
                process_id, size, offset
            ),
            Err(e) => warn!("allocation for process {} refused: {}", process_id, e),
        }
        result
    }

    fn try_allocate(&mut self, process_id: i32, size: usize) -> Result<usize, AllocError> {
        if process_id < 0 {
            return Err(AllocError::InvalidProcessId(process_id));
        }
        if size == 0 {
            return Err(AllocError::ZeroSize(process_id));
        }
        let pages_needed = self.config.pages_needed(size);

        let slot = self.process_table.find_free_slot()?;
        if self.process_table.is_active(process_id) {
            return Err(AllocError::DuplicateProcessId(process_id));
        }

        let frames = self.page_table.first_free_frames(pages_needed);
        if frames.len() < pages_needed {
            return Err(AllocError::InsufficientMemory {
                process_id,
                pages_needed,
                pages_free: frames.len(),
            });
        }

        for &frame in &frames {
            self.page_table.assign(frame, process_id);
        }
        self.process_table.activate(slot, process_id, size);
        debug!("process {} -> slot {}, frames {:?}", process_id, slot, frames);

        // pages_needed >= 1, so frames is non-empty
        Ok(self.memory.frame_to_address(frames[0]))
    }

    /// Release every frame owned by `process_id` and deactivate its slots.
    ///
    /// Freeing an unknown id changes nothing and reports `NotFound`.
    pub fn free(&mut self, process_id: i32) -> FreeOutcome {
        let frames = self.page_table.frames_owned_by(process_id);
        for &frame in &frames {
            self.page_table.release(frame);
        }
        let slots = self.process_table.deactivate_by_id(process_id);
        debug!(
            "process {}: released frames {:?}, deactivated {} slot(s)",
            process_id, frames, slots
        );

        let outcome = if frames.is_empty() {
            FreeOutcome::NotFound { process_id }
        } else {
            FreeOutcome::Freed {
                process_id,
                pages: frames.len(),
            }
        };
        info!("{}", outcome);
        outcome
    }

    /// Frames currently owned by `process_id`, lowest first
    pub fn frames_of(&self, process_id: i32) -> Vec<usize> {
        self.page_table.frames_owned_by(process_id)
    }

    #[inline]
    pub fn free_pages(&self) -> usize {
        self.page_table.free_count()
    }

    #[inline]
    pub fn pages_needed(&self, size: usize) -> usize {
        self.config.pages_needed(size)
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn process_table(&self) -> &ProcessTable {
        &self.process_table
    }

    /// Verify that the two tables agree:
    /// - a frame is allocated iff it has an owner
    /// - every owner is an active process
    /// - every active process owns at least ceil(size / page_size) frames
    pub fn check_invariants(&self) -> Result<(), String> {
        for (frame, entry) in self.page_table.iter() {
            let has_owner = entry.process_id != NO_PROCESS;
            if entry.allocated != has_owner {
                return Err(format!(
                    "frame {}: allocated={} but owner={}",
                    frame, entry.allocated, entry.process_id
                ));
            }
            if entry.allocated && !self.process_table.is_active(entry.process_id) {
                return Err(format!(
                    "frame {} owned by process {} which is not active",
                    frame, entry.process_id
                ));
            }
        }

        for process in self.process_table.iter_active() {
            if process.size == 0 {
                return Err(format!("active process {} has size 0", process.id));
            }
            let owned = self.page_table.frames_owned_by(process.id).len();
            let needed = self.config.pages_needed(process.size);
            if owned < needed {
                return Err(format!(
                    "process {} owns {} frames, needs {}",
                    process.id, owned, needed
                ));
            }
        }
        Ok(())
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}
