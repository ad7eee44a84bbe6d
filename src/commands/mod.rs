mod pack;
mod verify;

pub use pack::*;
pub use verify::*;
