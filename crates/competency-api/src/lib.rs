//! JSON REST API for the staff competency service.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`] over any
//! [`competency_core::store::CompetencyStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", competency_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod persons;
pub mod reconcile;
pub mod service;

use std::sync::Arc;

use axum::{Router, routing::get};
use competency_core::store::CompetencyStore;

pub use error::ApiError;
pub use service::PersonService;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<PersonService<S>>) -> Router<()>
where
  S: CompetencyStore + 'static,
{
  Router::new()
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::delete::<S>),
    )
    .with_state(service)
}
