//! Session-based authentication and role checks.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Access |
//! |--------|----------|--------|
//! | POST | `/api/login` | public |
//! | POST | `/api/logout` | public |
//! | GET | `/api/user` | session |
//! | POST | `/api/register` | admin |
//! | DELETE | `/api/users/{id}` | admin |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod password;
pub mod routes;
pub mod services;
pub mod session;

pub use services::AuthService;
pub use session::{MemorySessionStore, SessionStore, SessionSweeper};
