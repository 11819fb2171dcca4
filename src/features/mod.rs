pub mod auth;
pub mod provincias;
pub mod stakeholders;
pub mod tags;
pub mod users;
