pub mod auth_handler;

pub use auth_handler::{
    __path_delete_user, __path_get_current_user, __path_login, __path_logout, __path_register,
    delete_user, get_current_user, login, logout, register,
};
