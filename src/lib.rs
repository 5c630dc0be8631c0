pub mod cs;
pub mod error;

pub use cs::randomized::{MultiSet, SkipList, SkipListBuilder};
pub use error::{Error, Result};
