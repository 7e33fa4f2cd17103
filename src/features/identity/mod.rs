//! Staff session handling against the external identity provider.
//!
//! The provider owns credentials, tokens and their lifetimes; this feature
//! only exchanges a credential pair for a session token and resolves that
//! token back to a user on every gated request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/login` | No | Login form |
//! | POST | `/login` | No | Exchange credentials, set session cookie |

pub mod clients;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::SessionService;
