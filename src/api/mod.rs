//! HTTP surface of the gateway.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/api/tasks` | [`handlers::list_tasks`] |
//! | POST | `/api/tasks` | [`handlers::create_task`] |
//! | POST | `/api/tasks/{id}/title` | [`handlers::modify_title`] |
//! | POST | `/api/tasks/{id}/complete` | [`handlers::complete_task`] |
//! | POST | `/api/tasks/{id}/star` | [`handlers::star_task`] |
//! | POST | `/api/tasks/{id}/unstar` | [`handlers::unstar_task`] |
//! | DELETE | `/api/tasks/{id}/delete` | [`handlers::delete_task`] |
//! | PUT | `/api/tasks/{id}/restore` | [`handlers::restore_task`] |
//! | GET | `/api/notifications` | [`handlers::list_notifications`] |
//! | GET | `/health` | [`routes::health_check`] |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use identity::{Caller, HeaderIdentityProvider, IdentityProvider};
pub use routes::create_router;
pub use state::AppState;
