use crate::constants::NO_PROCESS;

/// Ownership record for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    pub allocated: bool,
    pub process_id: i32,
}

impl PageTableEntry {
    pub const FREE: PageTableEntry = PageTableEntry {
        allocated: false,
        process_id: NO_PROCESS,
    };
}

impl Default for PageTableEntry {
    fn default() -> Self {
        Self::FREE
    }
}

/// One entry per frame, indexed by frame number. Sized once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    entries: Box<[PageTableEntry]>,
}

impl PageTable {
    pub fn new(num_pages: usize) -> Self {
        PageTable {
            entries: vec![PageTableEntry::FREE; num_pages].into_boxed_slice(),
        }
    }

    pub fn reset(&mut self) {
        self.entries.fill(PageTableEntry::FREE);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Panics if `frame` is out of range
    #[inline]
    pub fn is_free(&self, frame: usize) -> bool {
        !self.entries[frame].allocated
    }

    #[inline]
    pub fn entry(&self, frame: usize) -> &PageTableEntry {
        &self.entries[frame]
    }

    /// Mark `frame` as owned by `process_id`.
    ///
    /// Does not check the previous owner: assigning an allocated frame
    /// replaces its owner. Callers check `is_free` first.
    pub fn assign(&mut self, frame: usize, process_id: i32) {
        self.entries[frame] = PageTableEntry {
            allocated: true,
            process_id,
        };
    }

    /// Return `frame` to the free state. Releasing a free frame is a no-op.
    pub fn release(&mut self, frame: usize) {
        self.entries[frame] = PageTableEntry::FREE;
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PageTableEntry)> {
        self.entries.iter().enumerate()
    }

    pub fn free_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.allocated).count()
    }

    /// Frames owned by `process_id`, lowest first
    pub fn frames_owned_by(&self, process_id: i32) -> Vec<usize> {
        self.iter()
            .filter(|(_, e)| e.allocated && e.process_id == process_id)
            .map(|(frame, _)| frame)
            .collect()
    }

    /// Up to `count` free frames, scanning from frame 0
    pub fn first_free_frames(&self, count: usize) -> Vec<usize> {
        self.iter()
            .filter(|(_, e)| !e.allocated)
            .map(|(frame, _)| frame)
            .take(count)
            .collect()
    }
}
