//! User-defined labels assignable to many stakeholders.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/tags` | List tags with usage counts |
//! | POST | `/api/tags` | Create a tag |
//! | PUT | `/api/tags/{id}` | Rename a tag |
//! | DELETE | `/api/tags/{id}` | Delete a tag and its assignments |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::TagService;
