use crate::config::MemoryConfig;

/// Simulated RAM. Frames are addressed by index; byte content is only ever zeroed.
pub struct PhysicalMemory {
    data: Box<[u8]>,
    page_size: usize,
}

impl PhysicalMemory {
    /// Create a new physical memory initialized to all zeros
    pub fn new(config: &MemoryConfig) -> Self {
        PhysicalMemory {
            data: vec![0u8; config.ram_size].into_boxed_slice(),
            page_size: config.page_size,
        }
    }

    /// Zero every byte
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.data.len() / self.page_size
    }

    /// Calculate the starting byte offset of a frame
    #[inline]
    pub fn frame_to_address(&self, frame: usize) -> usize {
        frame * self.page_size
    }

    /// Get direct access to the underlying bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new(&MemoryConfig::default())
    }
}
