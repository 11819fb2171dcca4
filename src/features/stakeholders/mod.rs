//! Stakeholders: tracked contacts owned by a provincia.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/stakeholders` | List with optional `tags`, `provincia_id`, `search` filters |
//! | POST | `/api/stakeholders` | Create |
//! | GET | `/api/stakeholders/{id}` | Get one |
//! | PUT | `/api/stakeholders/{id}` | Full update |
//! | DELETE | `/api/stakeholders/{id}` | Delete |
//! | POST | `/api/stakeholders/{id}/tags` | Replace tag set |
//! | POST | `/api/stakeholders/export` | Flat contact rows of selected stakeholders |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StakeholderService;
