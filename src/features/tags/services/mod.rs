mod tag_service;

pub use tag_service::{find_or_create_by_names, TagService};
