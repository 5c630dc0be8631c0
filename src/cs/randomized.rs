pub mod multiset;
pub mod skip_list;

pub use multiset::MultiSet;
pub use skip_list::{SkipList, SkipListBuilder};
