#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
        }
    }
}

/// Indices of the right, upper and upper-right chunks in the owning map's storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkLinks {
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub xy: Option<usize>,
}

impl ChunkLinks {
    #[inline]
    pub const fn none() -> Self {
        Self {
            x: None,
            y: None,
            xy: None,
        }
    }
}
