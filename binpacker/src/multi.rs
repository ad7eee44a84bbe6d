use std::borrow::Borrow;

use crate::{
    error::PackError,
    region::PackState,
    types::{BinPlacement, InputItem, PackTarget},
};

/// Packs items into as many fixed-size bins as it takes.
///
/// Placement works exactly like [`BinPacker`](struct.BinPacker.html), except
/// that running out of space opens a fresh bin for the items that are left
/// instead of failing. Bins are numbered in the order they were opened.
#[derive(Debug)]
pub struct MultiBinPacker {
    bin_size: (u32, u32),
    allow_rotation: bool,
    state: PackState,

    /// Arena index of each bin's root region, in the order bins were opened.
    bin_starts: Vec<usize>,
}

impl MultiBinPacker {
    pub fn new(bin_size: (u32, u32)) -> Self {
        Self {
            bin_size,
            allow_rotation: false,
            state: PackState::default(),
            bin_starts: Vec::new(),
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

    #[inline]
    pub fn set_bin_size(&mut self, bin_size: (u32, u32)) {
        self.bin_size = bin_size;
    }

    #[inline]
    pub fn rotation_allowed(&self) -> bool {
        self.allow_rotation
    }

    /// The number of bins used by the last successful pack.
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_starts.len()
    }

    /// Packs the given items, returning one placement per item in the same
    /// order, each tagged with the bin it landed in.
    pub fn pack<I, T>(&mut self, items: I) -> Result<Vec<BinPlacement>, PackError>
    where
        I: IntoIterator<Item = T>,
        T: Borrow<InputItem>,
    {
        self.run(items.into_iter().map(|item| item.borrow().size))?;

        let mut output = vec![None; self.state.total()];
        for (bin, &root) in self.bin_starts.iter().enumerate() {
            for (index, order) in self.state.placed_under(root) {
                output[order] = Some(BinPlacement {
                    bin,
                    placement: self.state.regions[index].placement(),
                });
            }
        }

        Ok(output.into_iter().flatten().collect())
    }

    /// Packs the targets, telling each one its bin through
    /// `PackTarget::set_bin` and then its spot through
    /// `PackTarget::set_placement`.
    pub fn pack_in_place<T: PackTarget>(&mut self, targets: &mut [T]) -> Result<(), PackError> {
        self.run(targets.iter().map(|target| target.size()))?;

        for (bin, &root) in self.bin_starts.iter().enumerate() {
            for (index, order) in self.state.placed_under(root) {
                let target = &mut targets[order];
                target.set_bin(bin);
                target.set_placement(self.state.regions[index].placement());
            }
        }

        Ok(())
    }

    fn run<I>(&mut self, sizes: I) -> Result<(), PackError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        self.bin_starts.clear();
        self.state.begin(sizes, self.bin_size)?;

        while !self.state.is_done() {
            let packed_before = self.state.packed;

            let root = self.state.push_root(self.bin_size);
            self.bin_starts.push(root);
            self.state.fill(root);

            log::trace!(
                "Bin {} took {} items, {} left",
                self.bin_starts.len() - 1,
                self.state.packed - packed_before,
                self.state.total() - self.state.packed
            );

            // Sizes were checked up front, so an empty bin always takes at
            // least one item.
            if self.state.packed == packed_before {
                self.bin_starts.clear();

                return Err(PackError::Exhausted {
                    packed: self.state.packed,
                    total: self.state.total(),
                    bin_size: self.bin_size,
                });
            }
        }

        log::trace!(
            "Finished packing {} items into {} bins",
            self.state.total(),
            self.bin_starts.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::BTreeMap;

    use crate::{geometry::Rect, types::Placement};

    fn items(sizes: &[(u32, u32)]) -> Vec<InputItem> {
        sizes.iter().copied().map(InputItem::new).collect()
    }

    fn assert_valid(inputs: &[InputItem], placements: &[BinPlacement], bin_size: (u32, u32)) {
        let bin = Rect::new((0, 0), bin_size);

        assert_eq!(inputs.len(), placements.len());

        let mut by_bin: BTreeMap<usize, Vec<Rect>> = BTreeMap::new();
        for (input, placed) in inputs.iter().zip(placements) {
            let rect = placed.placement().rect();

            assert_eq!(rect.size, input.size());
            assert!(bin.contains(&rect), "{:?} escapes the bin", placed);

            by_bin.entry(placed.bin()).or_default().push(rect);
        }

        // Bins are numbered densely from zero.
        assert!(by_bin.keys().copied().eq(0..by_bin.len()));

        for rects in by_bin.values() {
            for (i, a) in rects.iter().enumerate() {
                for b in &rects[i + 1..] {
                    assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn one_full_bin_per_item() {
        let inputs = items(&[(10, 10), (10, 10)]);
        let mut packer = MultiBinPacker::new((10, 10));

        let placements = packer.pack(&inputs).unwrap();

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].bin(), 0);
        assert_eq!(placements[1].bin(), 1);
        for placed in &placements {
            assert_eq!(placed.placement().min(), (0, 0));
            assert_eq!(placed.placement().max(), (10, 10));
        }
        assert_eq!(packer.bin_count(), 2);
    }

    #[test]
    fn empty_input() {
        let mut packer = MultiBinPacker::new((10, 10));
        let placements = packer.pack(Vec::<InputItem>::new()).unwrap();

        assert!(placements.is_empty());
        assert_eq!(packer.bin_count(), 0);
    }

    #[test]
    fn oversized_item() {
        let mut packer = MultiBinPacker::new((10, 10));
        let err = packer.pack(items(&[(4, 4), (5, 12)])).unwrap_err();

        assert_eq!(
            err,
            PackError::Oversized {
                index: 1,
                size: (5, 12),
                bin_size: (10, 10),
            }
        );
    }

    #[test]
    fn overflow_spills_into_new_bins() {
        let inputs = items(&[(6, 6), (6, 6), (6, 6), (3, 3)]);
        let mut packer = MultiBinPacker::new((10, 10));

        let placements = packer.pack(&inputs).unwrap();

        let bins: Vec<_> = placements.iter().map(|p| p.bin()).collect();
        assert_eq!(bins, vec![0, 1, 2, 0]);
        assert_valid(&inputs, &placements, (10, 10));
    }

    #[test]
    fn many_items_across_bins() {
        let sizes: Vec<_> = (0..200u32).map(|i| (i % 17 + 4, (i * 7) % 13 + 4)).collect();
        let inputs = items(&sizes);
        let mut packer = MultiBinPacker::new((64, 64));

        let placements = packer.pack(&inputs).unwrap();

        assert!(packer.bin_count() > 1);
        assert_valid(&inputs, &placements, (64, 64));
    }

    #[test]
    fn single_bin_when_everything_fits() {
        let inputs = items(&[(50, 50); 4]);
        let mut packer = MultiBinPacker::new((100, 100));

        let placements = packer.pack(&inputs).unwrap();

        assert!(placements.iter().all(|p| p.bin() == 0));
        assert_valid(&inputs, &placements, (100, 100));
    }

    #[derive(Debug)]
    struct Tile {
        size: (u32, u32),
        bin: Option<usize>,
        slot: Option<Placement>,
    }

    impl PackTarget for Tile {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn set_placement(&mut self, placement: Placement) {
            self.slot = Some(placement);
        }

        fn set_bin(&mut self, bin: usize) {
            self.bin = Some(bin);
        }
    }

    #[test]
    fn in_place_records_bins() {
        let sizes = [(8, 8), (8, 8), (2, 2)];
        let mut tiles: Vec<_> = sizes
            .iter()
            .map(|&size| Tile {
                size,
                bin: None,
                slot: None,
            })
            .collect();
        let mut packer = MultiBinPacker::new((8, 8));

        packer.pack_in_place(&mut tiles).unwrap();
        let expected = packer.pack(items(&sizes)).unwrap();

        for (tile, placed) in tiles.iter().zip(&expected) {
            assert_eq!(tile.bin, Some(placed.bin()));
            assert_eq!(tile.slot, Some(placed.placement()));
        }
        assert_eq!(tiles[2].bin, Some(2));
    }
}
