//! Binpacker is a small library for packing rectangles into fixed-size bins.
//! It was built for binpack, a command line tool that lays out named
//! rectangles and writes the result as JSON.
//!
//! Two packers share the same placement strategy:
//!
//! - [`BinPacker`][BinPacker] fills a single bin and fails if the items don't
//!   all fit.
//! - [`MultiBinPacker`][MultiBinPacker] opens as many bins as it needs.
//!
//! Items are placed largest area first, each one in the lower-left corner of
//! a free region, and the leftover space is split into two smaller regions.
//! The result is not optimal, but it is fast and deterministic.
//!
//! ## Example
//! ```
//! use binpacker::{BinPacker, InputItem};
//!
//! // First, transform the rectangles you want to pack into the Binpacker
//! // InputItem type.
//! let my_items = &[
//!     InputItem::new((128, 64)),
//!     InputItem::new((64, 64)),
//!     InputItem::new((1, 300)),
//! ];
//!
//! // Construct a packer and configure it with your constraints.
//! let mut packer = BinPacker::new((512, 512));
//!
//! // Compute a solution. Placements come back in the same order as the
//! // inputs.
//! let placements = match packer.pack(my_items) {
//!     Ok(placements) => placements,
//!
//!     // The bin was too small. Grow it and try again with the same items.
//!     Err(_) => {
//!         packer.set_bin_size((1024, 1024));
//!         packer.pack(my_items).unwrap()
//!     }
//! };
//!
//! assert_eq!(placements[1].size(), (64, 64));
//! ```
//!
//! [BinPacker]: struct.BinPacker.html
//! [MultiBinPacker]: struct.MultiBinPacker.html

mod error;
mod geometry;
mod multi;
mod packer;
mod region;
mod types;

pub use error::*;
pub use geometry::*;
pub use multi::*;
pub use packer::*;
pub use types::*;
