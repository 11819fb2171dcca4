pub mod provincia_handler;

pub use provincia_handler::{
    __path_create_provincia, __path_delete_provincia, __path_export_provincia,
    __path_get_provincia, __path_import_provincia, __path_list_provincia_stakeholders,
    __path_list_provincias, __path_update_provincia, create_provincia, delete_provincia,
    export_provincia, get_provincia, import_provincia, list_provincia_stakeholders,
    list_provincias, update_provincia,
};
