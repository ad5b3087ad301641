//! User edits captured between ticks and the queue that holds them.

use super::{Texel, TexelGrid};

/// What an edit does to the cells under the brush
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditKind {
    Paint,
    Erase,
}

impl EditKind {
    /// Texel pattern written by this edit
    pub const fn texel(self) -> Texel {
        match self {
            EditKind::Paint => Texel::ALIVE,
            EditKind::Erase => Texel::DEAD,
        }
    }
}

/// A single paint or erase action in grid coordinates.
/// Coordinates may lie outside the grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Edit {
    pub x: i32,
    pub y: i32,
    pub kind: EditKind,
}

impl Edit {
    pub const fn new(x: i32, y: i32, kind: EditKind) -> Self {
        Self { x, y, kind }
    }

    pub const fn paint(x: i32, y: i32) -> Self {
        Self::new(x, y, EditKind::Paint)
    }

    pub const fn erase(x: i32, y: i32) -> Self {
        Self::new(x, y, EditKind::Erase)
    }
}

/// Square brush of side `2 * radius + 1` centred on the edited cell
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Brush {
    pub radius: usize,
}

impl Default for Brush {
    fn default() -> Self {
        Self { radius: 1 }
    }
}

/// Clipped rectangle covered by a brush stroke
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Footprint {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Brush {
    /// Part of the brush square around `(x, y)` that lies inside a grid
    /// of the given size, or `None` when nothing does
    pub fn footprint(&self, x: i32, y: i32, grid: (usize, usize)) -> Option<Footprint> {
        let r = self.radius as i64;
        let (x, y) = (x as i64, y as i64);
        let x0 = (x - r).max(0);
        let y0 = (y - r).max(0);
        let x1 = (x + r).min(grid.0 as i64 - 1);
        let y1 = (y + r).min(grid.1 as i64 - 1);

        (x0 <= x1 && y0 <= y1).then(|| Footprint {
            x: x0 as usize,
            y: y0 as usize,
            width: (x1 - x0 + 1) as usize,
            height: (y1 - y0 + 1) as usize,
        })
    }
}

/// Anything edits can be written into
pub trait EditTarget {
    fn dimensions(&self) -> (usize, usize);

    fn write_region(&mut self, data: &[u8], x: usize, y: usize, w: usize, h: usize);
}

impl EditTarget for TexelGrid {
    fn dimensions(&self) -> (usize, usize) {
        TexelGrid::dimensions(self)
    }

    fn write_region(&mut self, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
        TexelGrid::write_region(self, data, x, y, w, h);
    }
}

/// Edits waiting for the next tick, in arrival order
#[derive(Clone, Debug, Default)]
pub struct EditQueue {
    pending: Vec<Edit>,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edit; may be called at any time between ticks
    pub fn push(&mut self, edit: Edit) {
        self.pending.push(edit);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.pending.iter()
    }

    /// Apply every queued edit to `target` in queue order, then empty the queue.
    ///
    /// Later edits overwrite earlier ones where brushes overlap. Texels
    /// outside the target are dropped. Returns the number of edits that
    /// touched at least one texel.
    pub fn drain_into(&mut self, target: &mut impl EditTarget, brush: Brush) -> usize {
        let size = target.dimensions();
        let mut applied = 0;

        for edit in self.pending.drain(..) {
            let Some(area) = brush.footprint(edit.x, edit.y, size) else {
                continue;
            };
            let data: Vec<u8> = std::iter::repeat(edit.kind.texel().bytes())
                .take(area.width * area.height)
                .flatten()
                .collect();
            target.write_region(&data, area.x, area.y, area.width, area.height);
            applied += 1;
        }

        applied
    }
}
