mod stakeholder_service;

pub use stakeholder_service::{insert_stakeholder, replace_tags, StakeholderService};
