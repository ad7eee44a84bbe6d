/// An axis-aligned rectangle in bin coordinates.
///
/// The origin is the lower-left corner of the bin, with x growing to the right
/// and y growing upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    /// The corner opposite to `pos`.
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }

    /// Tells whether the interiors of the two rectangles overlap. Rectangles
    /// that only share an edge do not intersect, and neither do rectangles
    /// with zero width or height.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.area() == 0 || other.area() == 0 {
            return false;
        }

        let (a_max, b_max) = (self.max(), other.max());

        let x_overlap = self.pos.0 < b_max.0 && other.pos.0 < a_max.0;
        let y_overlap = self.pos.1 < b_max.1 && other.pos.1 < a_max.1;

        x_overlap && y_overlap
    }

    /// Tells whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());

        other.pos.0 >= self.pos.0
            && other.pos.1 >= self.pos.1
            && b_max.0 <= a_max.0
            && b_max.1 <= a_max.1
    }

    /// Whether a rectangle of the given size fits in this one without
    /// rotating it.
    #[inline]
    pub(crate) fn fits(&self, size: (u32, u32)) -> bool {
        size.0 <= self.size.0 && size.1 <= self.size.1
    }
}
