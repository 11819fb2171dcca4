//! User accounts.
//!
//! Accounts are created through `/api/register` (see the auth feature);
//! this feature owns their storage and the admin listing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | List users (admin only) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
