//! State shared by the packers: the candidate list and the region tree.
//!
//! The region tree lives in a flat arena. A region is created either as the
//! root of a bin or as one of the two children produced when an item is split
//! out of its parent; regions are never removed individually, the arena is
//! cleared as a whole at the start of every pack.

use crate::{error::PackError, geometry::Rect, types::Placement};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub size: (u32, u32),
    pub order: usize,
    pub packed: bool,
}

impl Candidate {
    fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Region {
    pub rect: Rect,

    /// Index of the input item placed in this region, if any.
    pub order: Option<usize>,

    pub rotated: bool,

    /// Arena indices of the free space left over after an item was placed.
    pub children: Option<(usize, usize)>,
}

impl Region {
    fn free(rect: Rect) -> Self {
        Self {
            rect,
            order: None,
            rotated: false,
            children: None,
        }
    }

    pub fn placement(&self) -> Placement {
        Placement {
            rect: self.rect,
            rotated: self.rotated,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct PackState {
    pub candidates: Vec<Candidate>,
    pub regions: Vec<Region>,
    pub packed: usize,
}

impl PackState {
    /// Forgets everything from the previous pack and takes on a new set of
    /// items, sorted largest first. Fails if any single item is larger than
    /// the bin.
    pub fn begin<I>(&mut self, sizes: I, bin_size: (u32, u32)) -> Result<(), PackError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        self.candidates.clear();
        self.regions.clear();
        self.packed = 0;

        self.candidates
            .extend(sizes.into_iter().enumerate().map(|(order, size)| Candidate {
                size,
                order,
                packed: false,
            }));

        log::trace!(
            "Packing {} items into {}x{} bins",
            self.candidates.len(),
            bin_size.0,
            bin_size.1
        );

        let bin = Rect::new((0, 0), bin_size);
        if let Some(oversized) = self.candidates.iter().find(|c| !bin.fits(c.size)) {
            log::debug!(
                "Item {} ({}x{}) is larger than the bin",
                oversized.order,
                oversized.size.0,
                oversized.size.1
            );

            return Err(PackError::Oversized {
                index: oversized.order,
                size: oversized.size,
                bin_size,
            });
        }

        // sort_by is stable, so equal areas keep their input order.
        self.candidates.sort_by(|a, b| b.area().cmp(&a.area()));

        Ok(())
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.packed == self.candidates.len()
    }

    /// Adds an empty bin-sized region to the arena and returns its index.
    pub fn push_root(&mut self, bin_size: (u32, u32)) -> usize {
        self.regions.push(Region::free(Rect::new((0, 0), bin_size)));
        self.regions.len() - 1
    }

    /// Greedily places items into the region at `root` and everything split
    /// off from it.
    ///
    /// Each region receives the first unpacked candidate that fits, so larger
    /// items always win. The first child of a split is filled completely
    /// before the second one.
    pub fn fill(&mut self, root: usize) {
        let mut pending = vec![root];

        while let Some(index) = pending.pop() {
            let available = self.regions[index].rect;

            let found = self
                .candidates
                .iter()
                .position(|candidate| !candidate.packed && available.fits(candidate.size));

            if let Some(candidate) = found {
                let (first, second) = self.split(index, candidate);
                self.candidates[candidate].packed = true;
                self.packed += 1;

                pending.push(second);
                pending.push(first);
            }
        }
    }

    /// Places the candidate at the lower-left corner of the region and
    /// appends the two free regions that remain, larger first.
    fn split(&mut self, index: usize, candidate: usize) -> (usize, usize) {
        let Candidate { size, order, .. } = self.candidates[candidate];
        let region = &mut self.regions[index];
        let Rect {
            pos: (x, y),
            size: (width, height),
        } = region.rect;

        let left = Rect::new((x, y + size.1), (size.0, height - size.1));
        let right = Rect::new((x + size.0, y), (width - size.0, height));
        let bottom = Rect::new((x + size.0, y), (width - size.0, size.1));
        let top = Rect::new((x, y + size.1), (width, height - size.1));

        let max_left_right = left.area().max(right.area());
        let max_bottom_top = bottom.area().max(top.area());

        let (a, b) = if max_left_right > max_bottom_top {
            (left, right)
        } else {
            (bottom, top)
        };
        let (larger, smaller) = if a.area() > b.area() { (a, b) } else { (b, a) };

        region.rect.size = size;
        region.order = Some(order);

        let first = self.regions.len();
        let second = first + 1;
        self.regions[index].children = Some((first, second));
        self.regions.push(Region::free(larger));
        self.regions.push(Region::free(smaller));

        log::trace!(
            "Placed item {} ({}x{}) at ({}, {})",
            order,
            size.0,
            size.1,
            x,
            y
        );

        (first, second)
    }

    /// Every placed region in the tree under `root`, as `(arena index, input
    /// index)`.
    pub fn placed_under(&self, root: usize) -> Vec<(usize, usize)> {
        let mut placed = Vec::new();
        let mut pending = vec![root];

        while let Some(index) = pending.pop() {
            let region = &self.regions[index];

            if let Some(order) = region.order {
                placed.push((index, order));
            }

            if let Some((first, second)) = region.children {
                pending.push(second);
                pending.push(first);
            }
        }

        placed
    }
}
