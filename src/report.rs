//! Text rendering of the page table and process table.

use std::fmt;

use crate::allocator::Allocator;

/// One line per frame: index, status and owner
pub struct MemoryReport<'a>(pub &'a Allocator);

/// One line per active process slot
pub struct ProcessReport<'a>(pub &'a Allocator);

impl fmt::Display for MemoryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "memory state:")?;
        for (frame, entry) in self.0.page_table().iter() {
            writeln!(
                f,
                "page {} | {} | process {}",
                frame,
                if entry.allocated { "allocated" } else { "free" },
                entry.process_id
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ProcessReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "processes:")?;
        for process in self.0.process_table().iter_active() {
            writeln!(f, "process id: {} | size: {} bytes", process.id, process.size)?;
        }
        Ok(())
    }
}

pub fn display_memory(allocator: &Allocator) {
    print!("\n{}", MemoryReport(allocator));
}

pub fn display_processes(allocator: &Allocator) {
    print!("\n{}", ProcessReport(allocator));
}
