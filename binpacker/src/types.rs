use crate::geometry::Rect;

/// An input to the rectangle packing routines.
///
/// `InputItem` is just a 2D size. Its identity is its position in the sequence
/// handed to a packer: output placements come back in the same order, so
/// consumers can zip them with their own objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputItem {
    pub(crate) size: (u32, u32),
}

impl InputItem {
    #[inline]
    pub fn new(size: (u32, u32)) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl From<(u32, u32)> for InputItem {
    fn from(size: (u32, u32)) -> Self {
        Self::new(size)
    }
}

/// Where an item ended up after packing.
///
/// `Placement` values correspond 1:1 to the `InputItem` values that were
/// passed into the packing function, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub(crate) rect: Rect,
    pub(crate) rotated: bool,
}

impl Placement {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    /// The lower-left corner, `(x1, y1)`.
    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.rect.pos
    }

    /// The upper-right corner, `(x2, y2)`.
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }

    /// Whether the item was turned 90 degrees to fit. The packers never rotate
    /// items, so this is currently always false.
    #[inline]
    pub fn rotated(&self) -> bool {
        self.rotated
    }
}

/// A `Placement` produced by a packer that spreads items over several bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinPlacement {
    pub(crate) bin: usize,
    pub(crate) placement: Placement,
}

impl BinPlacement {
    /// Zero-based index of the bin, in the order bins were opened.
    #[inline]
    pub fn bin(&self) -> usize {
        self.bin
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }
}

/// Something owned by the caller that can be packed in place.
///
/// Packers read `size` from every target and, once every target has found a
/// spot, hand each of them its result. A failed pack leaves all targets
/// untouched.
pub trait PackTarget {
    fn size(&self) -> (u32, u32);

    fn set_placement(&mut self, placement: Placement);

    /// Called by multi-bin packers before `set_placement`.
    fn set_bin(&mut self, _bin: usize) {}
}
