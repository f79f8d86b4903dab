/// Inclusive rectangle of chunk indices touched by one edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl ChunkRange {
    #[inline]
    pub fn chunk_count(&self) -> usize {
        (self.x_end - self.x_start + 1) * (self.y_end - self.y_start + 1)
    }

    /// Row-major chunk coordinates in the range.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y_start..=self.y_end)
            .flat_map(move |y| (self.x_start..=self.x_end).map(move |x| (x, y)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditReport {
    /// Grid cell the edit was centered on.
    pub center: (i32, i32),
    pub chunks_visited: usize,
    pub cells_changed: usize,
    pub chunks_rebuilt: usize,
}

impl EditReport {
    #[inline]
    pub fn untouched(center: (i32, i32)) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.cells_changed == 0 && self.chunks_rebuilt == 0
    }
}
