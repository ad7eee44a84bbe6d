use std::borrow::Borrow;

use crate::{
    error::PackError,
    region::PackState,
    types::{InputItem, PackTarget, Placement},
};

/// The single bin's region is always the first one in the arena.
const ROOT: usize = 0;

/// Packs items into a single bin of fixed size.
///
/// Items are placed largest area first. Each placement carves the item out of
/// the lower-left corner of a free region and splits the remaining space into
/// two new free regions, keeping the larger of the possible leftovers as
/// intact as it can.
///
/// A packer keeps its working buffers between calls, but every call starts
/// from scratch: nothing from a previous pack affects the next one.
#[derive(Debug)]
pub struct BinPacker {
    bin_size: (u32, u32),
    allow_rotation: bool,
    state: PackState,
}

impl BinPacker {
    pub fn new(bin_size: (u32, u32)) -> Self {
        Self {
            bin_size,
            allow_rotation: false,
            state: PackState::default(),
        }
    }

    /// Accepted for compatibility with layouts that record it; items are
    /// never rotated by this packer.
    pub fn allow_rotation(self, allow_rotation: bool) -> Self {
        Self {
            allow_rotation,
            ..self
        }
    }

    #[inline]
    pub fn bin_size(&self) -> (u32, u32) {
        self.bin_size
    }

    /// Changes the bin used by the next pack. Growing the bin and packing the
    /// same items again is the way to recover from a `PackError`.
    #[inline]
    pub fn set_bin_size(&mut self, bin_size: (u32, u32)) {
        self.bin_size = bin_size;
    }

    #[inline]
    pub fn rotation_allowed(&self) -> bool {
        self.allow_rotation
    }

    /// Packs the given items, returning one placement per item in the same
    /// order.
    ///
    /// Accepts anything that can turn into an iterator of `InputItem` or
    /// `&InputItem`.
    pub fn pack<I, T>(&mut self, items: I) -> Result<Vec<Placement>, PackError>
    where
        I: IntoIterator<Item = T>,
        T: Borrow<InputItem>,
    {
        self.run(items.into_iter().map(|item| item.borrow().size))?;

        let mut output = vec![None; self.state.total()];
        for (index, order) in self.state.placed_under(ROOT) {
            output[order] = Some(self.state.regions[index].placement());
        }

        Ok(output.into_iter().flatten().collect())
    }

    /// Packs the targets, writing each result back through
    /// `PackTarget::set_placement`.
    pub fn pack_in_place<T: PackTarget>(&mut self, targets: &mut [T]) -> Result<(), PackError> {
        self.run(targets.iter().map(|target| target.size()))?;

        for (index, order) in self.state.placed_under(ROOT) {
            targets[order].set_placement(self.state.regions[index].placement());
        }

        Ok(())
    }

    fn run<I>(&mut self, sizes: I) -> Result<(), PackError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        self.state.begin(sizes, self.bin_size)?;

        let root = self.state.push_root(self.bin_size);
        debug_assert_eq!(root, ROOT);
        self.state.fill(root);

        if !self.state.is_done() {
            log::debug!(
                "Packed {} of {} items before running out of space",
                self.state.packed,
                self.state.total()
            );

            return Err(PackError::Exhausted {
                packed: self.state.packed,
                total: self.state.total(),
                bin_size: self.bin_size,
            });
        }

        log::trace!(
            "Finished packing {} items into {} regions",
            self.state.total(),
            self.state.regions.len()
        );

        Ok(())
    }
}
