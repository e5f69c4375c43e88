//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | All persons with their skills |
//! | `GET`    | `/persons/{id}` | 404 if not found |
//! | `POST`   | `/persons` | Body: [`PersonInput`]; returns 201 + `{"personId":..}` |
//! | `PUT`    | `/persons/{id}` | Body: [`PersonInput`]; 200, empty body |
//! | `DELETE` | `/persons/{id}` | 200, empty body |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use competency_core::{
  person::{PersonId, PersonInput, PersonView},
  store::CompetencyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{PersonIdPath, ValidJson},
  service::PersonService,
};

/// Response body of `POST /persons`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPerson {
  pub person_id: PersonId,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S>(
  State(service): State<Arc<PersonService<S>>>,
) -> Result<Json<Vec<PersonView>>, ApiError>
where
  S: CompetencyStore,
{
  Ok(Json(service.list_persons().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/{id}`
pub async fn get_one<S>(
  State(service): State<Arc<PersonService<S>>>,
  PersonIdPath(id): PersonIdPath,
) -> Result<Json<PersonView>, ApiError>
where
  S: CompetencyStore,
{
  Ok(Json(service.get_person(id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`: returns 201 with `{"personId": <id>}`.
pub async fn create<S>(
  State(service): State<Arc<PersonService<S>>>,
  ValidJson(body): ValidJson<PersonInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CompetencyStore,
{
  body.validate()?;
  let person_id = service.create_person(body).await?;
  Ok((StatusCode::CREATED, Json(CreatedPerson { person_id })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/{id}`: replaces names and reconciles the skill set.
pub async fn update<S>(
  State(service): State<Arc<PersonService<S>>>,
  PersonIdPath(id): PersonIdPath,
  ValidJson(body): ValidJson<PersonInput>,
) -> Result<StatusCode, ApiError>
where
  S: CompetencyStore,
{
  body.validate()?;
  service.update_person(id, body).await?;
  Ok(StatusCode::OK)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/{id}`
pub async fn delete<S>(
  State(service): State<Arc<PersonService<S>>>,
  PersonIdPath(id): PersonIdPath,
) -> Result<StatusCode, ApiError>
where
  S: CompetencyStore,
{
  service.delete_person(id).await?;
  Ok(StatusCode::OK)
}
