use std::fmt;

use crate::constants::*;

/// Geometry of a simulated memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub ram_size: usize,
    pub page_size: usize,
    pub max_processes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPageSize,
    /// RAM size is not a whole number of pages
    UnalignedRamSize { ram_size: usize, page_size: usize },
    NoFrames,
    NoProcessSlots,
    /// A dimension exceeds its ceiling
    TooLarge { what: &'static str, value: usize, limit: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "page size must be greater than 0"),
            ConfigError::UnalignedRamSize { ram_size, page_size } => write!(
                f,
                "ram size {} is not a multiple of page size {}",
                ram_size, page_size
            ),
            ConfigError::NoFrames => write!(f, "ram size must hold at least one page"),
            ConfigError::NoProcessSlots => write!(f, "process table needs at least one slot"),
            ConfigError::TooLarge { what, value, limit } => {
                write!(f, "{} {} exceeds the limit of {}", what, value, limit)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl MemoryConfig {
    pub fn new(ram_size: usize, page_size: usize, max_processes: usize) -> Result<Self, ConfigError> {
        let config = MemoryConfig { ram_size, page_size, max_processes };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.ram_size % self.page_size != 0 {
            return Err(ConfigError::UnalignedRamSize {
                ram_size: self.ram_size,
                page_size: self.page_size,
            });
        }
        if self.num_pages() == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.max_processes == 0 {
            return Err(ConfigError::NoProcessSlots);
        }
        check_limit("ram size", self.ram_size, MAX_RAM_SIZE)?;
        check_limit("page count", self.num_pages(), MAX_NUM_PAGES)?;
        check_limit("process slot count", self.max_processes, MAX_PROCESS_SLOTS)?;
        Ok(())
    }

    #[inline]
    pub fn num_pages(&self) -> usize {
        self.ram_size / self.page_size
    }

    /// Number of whole pages covering `size` bytes
    #[inline]
    pub fn pages_needed(&self, size: usize) -> usize {
        size.div_ceil(self.page_size)
    }
}

fn check_limit(what: &'static str, value: usize, limit: usize) -> Result<(), ConfigError> {
    if value > limit {
        return Err(ConfigError::TooLarge { what, value, limit });
    }
    Ok(())
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            ram_size: RAM_SIZE,
            page_size: PAGE_SIZE,
            max_processes: MAX_PROCESSES,
        }
    }
}
