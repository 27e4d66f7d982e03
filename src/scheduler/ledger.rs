use parking_lot::Mutex;

use crate::foundation::core::PixelRect;

/// Intended write area of one z-position and whether it has been composited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Area the widget will write on the shared canvas.
    pub area: PixelRect,
    /// Set once the widget has finished compositing (or given up).
    pub drawn: bool,
}

#[derive(Debug)]
struct LedgerState {
    entries: Vec<Option<LedgerEntry>>,
    current_z: usize,
    changes: u64,
}

/// Shared record of per-z intended areas, used to decide when a widget may composite.
///
/// A widget at z-position `p` may composite once every lower, not yet drawn z-position has
/// logged an area that does not overlap its own. `current_z` is the lowest z-position not yet
/// drawn; it only moves forward.
#[derive(Debug)]
pub struct DrawLedger {
    state: Mutex<LedgerState>,
}

impl DrawLedger {
    /// Ledger for `len` z-positions (`0..len`).
    pub fn new(len: usize) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                entries: vec![None; len],
                current_z: 0,
                changes: 0,
            }),
        }
    }

    /// Number of z-positions tracked.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Return `true` when the ledger tracks no z-positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record the area z-position `z` intends to write.
    ///
    /// # Panics
    ///
    /// If `z` is out of range or has already logged an area.
    pub fn log_area(&self, z: usize, area: PixelRect) {
        let mut st = self.state.lock();
        let len = st.entries.len();
        let slot = st
            .entries
            .get_mut(z)
            .unwrap_or_else(|| panic!("z-position {z} out of range for a ledger of {len}"));
        assert!(slot.is_none(), "z-position {z} logged its area twice");
        *slot = Some(LedgerEntry { area, drawn: false });
        st.changes += 1;
    }

    /// Return `true` when z-position `z` may composite `area` now.
    pub fn is_clear(&self, z: usize, area: PixelRect) -> bool {
        let st = self.state.lock();
        if z == st.current_z {
            return true;
        }
        for entry in st.entries.iter().take(z).skip(st.current_z) {
            match entry {
                None => return false,
                Some(e) if e.drawn => {}
                Some(e) if e.area.overlaps(area) => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// Mark z-position `z` as drawn and advance `current_z` past every drawn position.
    ///
    /// # Panics
    ///
    /// If `z` never logged an area or is completed twice.
    pub fn complete(&self, z: usize) {
        let mut st = self.state.lock();
        let entry = match st.entries.get_mut(z) {
            Some(Some(e)) => e,
            Some(None) => panic!("z-position {z} completed before logging its area"),
            None => panic!("z-position {z} out of range"),
        };
        assert!(!entry.drawn, "z-position {z} completed twice");
        entry.drawn = true;
        st.changes += 1;

        if z == st.current_z {
            while let Some(Some(e)) = st.entries.get(st.current_z)
                && e.drawn
            {
                st.current_z += 1;
            }
        }
    }

    /// Lowest z-position not yet drawn (`len` once everything is drawn).
    pub fn current_z(&self) -> usize {
        self.state.lock().current_z
    }

    /// Number of areas logged plus positions completed so far.
    ///
    /// Any change means some waiter may have become clear.
    pub fn changes(&self) -> u64 {
        self.state.lock().changes
    }

    /// Entry for `z`, `None` before it logs an area.
    pub fn entry(&self, z: usize) -> Option<LedgerEntry> {
        self.state.lock().entries.get(z).copied().flatten()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/ledger.rs"]
mod tests;
