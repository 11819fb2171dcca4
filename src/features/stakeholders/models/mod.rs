mod stakeholder;

pub use stakeholder::{ContactInfo, LinkedinProfile, Stakeholder, StakeholderExportRow};
