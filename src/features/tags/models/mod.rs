mod tag;

pub use tag::{StakeholderTagRow, Tag, TagWithUsage};
