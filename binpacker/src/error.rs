use thiserror::Error;

/// The bin (or bins) were too small to hold every item.
///
/// Both variants mean the same thing to a caller: nothing was placed, and the
/// usual fix is to grow the bin and pack the same items again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("item {index} with size {size:?} does not fit in a bin of size {bin_size:?}")]
    Oversized {
        index: usize,
        size: (u32, u32),
        bin_size: (u32, u32),
    },

    #[error("only {packed} of {total} items fit in a bin of size {bin_size:?}")]
    Exhausted {
        packed: usize,
        total: usize,
        bin_size: (u32, u32),
    },
}

impl PackError {
    /// The size of the bin that turned out to be too small.
    pub fn bin_size(&self) -> (u32, u32) {
        match self {
            PackError::Oversized { bin_size, .. } | PackError::Exhausted { bin_size, .. } => {
                *bin_size
            }
        }
    }
}
