use contour_chunk::Chunk;

/// Read-only views of the chunks a mesher borrows ghost cells from.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkNeighbors<'a> {
    pub x: Option<&'a Chunk>,
    pub y: Option<&'a Chunk>,
    pub xy: Option<&'a Chunk>,
}

impl<'a> ChunkNeighbors<'a> {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            x: None,
            y: None,
            xy: None,
        }
    }

    #[inline]
    pub const fn new(x: Option<&'a Chunk>, y: Option<&'a Chunk>, xy: Option<&'a Chunk>) -> Self {
        Self { x, y, xy }
    }

    /// Resolve a chunk's links against the slice that owns it.
    #[inline]
    pub fn from_links(chunks: &'a [Chunk], chunk: &Chunk) -> Self {
        Self {
            x: chunk.links.x.map(|i| &chunks[i]),
            y: chunk.links.y.map(|i| &chunks[i]),
            xy: chunk.links.xy.map(|i| &chunks[i]),
        }
    }
}
