use crate::constants::NO_PROCESS;
use crate::error::AllocError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessEntry {
    pub id: i32,
    /// Bytes requested at allocation time
    pub size: usize,
    pub active: bool,
}

impl ProcessEntry {
    pub const EMPTY: ProcessEntry = ProcessEntry {
        id: NO_PROCESS,
        size: 0,
        active: false,
    };
}

impl Default for ProcessEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fixed number of process slots.
///
/// Deactivated slots keep their id and size; only `active` is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    slots: Box<[ProcessEntry]>,
}

impl ProcessTable {
    pub fn new(max_processes: usize) -> Self {
        ProcessTable {
            slots: vec![ProcessEntry::EMPTY; max_processes].into_boxed_slice(),
        }
    }

    pub fn reset(&mut self) {
        self.slots.fill(ProcessEntry::EMPTY);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &ProcessEntry {
        &self.slots[index]
    }

    /// Index of the first inactive slot
    pub fn find_free_slot(&self) -> Result<usize, AllocError> {
        self.slots
            .iter()
            .position(|s| !s.active)
            .ok_or(AllocError::ProcessTableFull)
    }

    /// Fill `index` and mark it active. Does not check for duplicate ids.
    pub fn activate(&mut self, index: usize, process_id: i32, size: usize) {
        self.slots[index] = ProcessEntry {
            id: process_id,
            size,
            active: true,
        };
    }

    /// Deactivate every slot carrying `process_id`.
    /// Returns how many of them were active.
    pub fn deactivate_by_id(&mut self, process_id: i32) -> usize {
        let mut deactivated = 0;
        for slot in self.slots.iter_mut().filter(|s| s.id == process_id) {
            if slot.active {
                deactivated += 1;
            }
            slot.active = false;
        }
        deactivated
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &ProcessEntry> {
        self.slots.iter().filter(|s| s.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn find_active(&self, process_id: i32) -> Option<&ProcessEntry> {
        self.iter_active().find(|s| s.id == process_id)
    }

    #[inline]
    pub fn is_active(&self, process_id: i32) -> bool {
        self.find_active(process_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = ProcessTable::new(10);
        assert_eq!(table.len(), 10);
        assert_eq!(table.active_count(), 0);
        assert_eq!(table.find_free_slot(), Ok(0));
        assert_eq!(*table.slot(9), ProcessEntry::EMPTY);
    }

    #[test]
    fn test_activate_takes_first_free_slot() {
        let mut table = ProcessTable::new(3);
        table.activate(0, 1, 120);
        assert_eq!(table.find_free_slot(), Ok(1));
        table.activate(1, 2, 180);
        assert_eq!(table.find_free_slot(), Ok(2));

        assert!(table.is_active(1));
        assert_eq!(table.find_active(2).map(|p| p.size), Some(180));
    }

    #[test]
    fn test_table_full() {
        let mut table = ProcessTable::new(2);
        table.activate(0, 1, 10);
        table.activate(1, 2, 10);
        assert_eq!(table.find_free_slot(), Err(AllocError::ProcessTableFull));

        table.deactivate_by_id(1);
        assert_eq!(table.find_free_slot(), Ok(0));
    }

    #[test]
    fn test_deactivate_keeps_id_and_size() {
        let mut table = ProcessTable::new(3);
        table.activate(0, 4, 64);

        assert_eq!(table.deactivate_by_id(4), 1);
        let slot = table.slot(0);
        assert!(!slot.active);
        assert_eq!(slot.id, 4);
        assert_eq!(slot.size, 64);
        assert!(!table.is_active(4));

        // second deactivation finds the slot but nothing was active
        assert_eq!(table.deactivate_by_id(4), 0);
    }

    #[test]
    fn test_deactivate_all_matching_slots() {
        let mut table = ProcessTable::new(4);
        table.activate(0, 8, 1);
        table.activate(1, 9, 1);
        table.activate(2, 8, 1);

        assert_eq!(table.deactivate_by_id(8), 2);
        assert_eq!(table.active_count(), 1);
        assert!(table.is_active(9));
    }

    #[test]
    fn test_deactivate_unknown_id() {
        let mut table = ProcessTable::new(4);
        table.activate(0, 1, 1);
        let before = table.clone();
        assert_eq!(table.deactivate_by_id(42), 0);
        assert_eq!(table, before);
    }

    #[test]
    fn test_reset() {
        let mut table = ProcessTable::new(2);
        table.activate(0, 1, 1);
        table.activate(1, 2, 2);
        table.reset();
        assert_eq!(table.active_count(), 0);
        assert_eq!(*table.slot(0), ProcessEntry::EMPTY);
    }
}
