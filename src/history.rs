use crate::surface::PixelSurface;

/// Immutable full copy of the pixel buffer at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    bytes: Vec<u8>,
}

impl Snapshot {
    fn capture(surface: &PixelSurface) -> Self {
        Self {
            bytes: surface.as_bytes().to_vec(),
        }
    }
}

/// Linear undo/redo history over full-canvas snapshots.
///
/// The cursor always points at the entry representing the current canvas
/// state; entry 0 is the canvas captured at construction. Committing after an
/// undo prunes the abandoned redo branch for good; the sequence is a line,
/// never a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    pub fn new(surface: &PixelSurface) -> Self {
        Self {
            entries: vec![Snapshot::capture(surface)],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn commit(&mut self, surface: &PixelSurface) {
        if self.can_redo() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(Snapshot::capture(surface));
        self.cursor += 1;
    }

    /// Step the cursor back one entry. Returns false (and changes nothing)
    /// when already at the initial state. The caller restores the surface.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step the cursor forward one entry. Returns false (and changes
    /// nothing) when already at the newest state.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Overwrite the surface's whole buffer with the entry under the cursor.
    /// Full replacement, never a blend; the length check inside `write_all`
    /// runs before any byte moves.
    pub fn restore(&self, surface: &mut PixelSurface) {
        surface.write_all(&self.entries[self.cursor].bytes);
    }
}
