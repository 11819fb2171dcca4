//! Provincias: the organizational units owning stakeholders.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/provincias` | List with stakeholder counts |
//! | POST | `/api/provincias` | Create |
//! | GET | `/api/provincias/{id}` | Get one |
//! | PUT | `/api/provincias/{id}` | Rename |
//! | DELETE | `/api/provincias/{id}` | Delete with all stakeholders |
//! | GET | `/api/provincias/{id}/stakeholders` | Stakeholders with tags |
//! | GET | `/api/provincias/{id}/export` | Download JSON export document |
//! | POST | `/api/provincias/import` | Import an export document as a new provincia |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProvinciaService;
