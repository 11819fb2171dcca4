pub mod stakeholder_handler;

pub use stakeholder_handler::{
    __path_assign_tags, __path_create_stakeholder, __path_delete_stakeholder,
    __path_export_stakeholders, __path_get_stakeholder, __path_list_stakeholders,
    __path_update_stakeholder, assign_tags, create_stakeholder, delete_stakeholder,
    export_stakeholders, get_stakeholder, list_stakeholders, update_stakeholder,
};
