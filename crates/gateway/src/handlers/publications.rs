//! Publication handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::AppState;
use citeshelf_common::{
    db::models::{Publication, PublicationInput},
    db::Repository,
    errors::{AppError, Result},
};

/// Body of the DOI import endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ImportDoiRequest {
    #[serde(default)]
    pub doi: Value,
}

impl ImportDoiRequest {
    /// The DOI as text.
    ///
    /// `null`, `false`, `0`, `""` and an absent key all count as missing,
    /// as do arrays and objects.
    pub fn doi_text(&self) -> Option<String> {
        match &self.doi {
            Value::String(doi) if !doi.is_empty() => Some(doi.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

/// Response carrying the stored publication
#[derive(Serialize)]
pub struct PublicationResponse {
    pub message: &'static str,
    #[serde(rename = "pub")]
    pub publication: Publication,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Decode a JSON object body into `T`.
///
/// A request without a JSON content type is treated as an empty object.
fn parse_body<T>(payload: std::result::Result<Json<Value>, JsonRejection>) -> std::result::Result<T, String>
where
    T: DeserializeOwned + Default,
{
    match payload {
        Ok(Json(body @ Value::Object(_))) => serde_json::from_value(body).map_err(|e| e.to_string()),
        Ok(Json(_)) => Err("request body is not a JSON object".to_string()),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.body_text()),
    }
}

/// List all publications, newest first
pub async fn list_publications(State(state): State<AppState>) -> Result<Json<Vec<Publication>>> {
    let repo = Repository::new(state.db.clone());

    let publications = repo.list_publications().await?;

    Ok(Json(publications))
}

/// Create a publication from the request body
pub async fn create_publication(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PublicationResponse>> {
    let input: PublicationInput =
        parse_body(payload).map_err(|reason| AppError::InvalidPublication { reason })?;

    let repo = Repository::new(state.db.clone());
    let publication = repo.create_publication(input).await?;

    Ok(Json(PublicationResponse {
        message: "Publication added",
        publication,
    }))
}

/// Delete a publication; unknown ids still succeed
pub async fn delete_publication(
    State(state): State<AppState>,
    Path(publication_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let repo = Repository::new(state.db.clone());

    repo.delete_publication(&publication_id).await?;

    Ok(Json(MessageResponse {
        message: "Publication deleted",
    }))
}

/// Create a placeholder publication for a DOI
pub async fn import_doi(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PublicationResponse>> {
    let request: ImportDoiRequest = parse_body(payload).map_err(|reason| {
        tracing::debug!(reason = %reason, "Unreadable import body");
        AppError::MissingParameter {
            field: "doi".to_string(),
        }
    })?;

    let repo = Repository::new(state.db.clone());
    let publication = repo.import_by_doi(request.doi_text().as_deref()).await?;

    Ok(Json(PublicationResponse {
        message: "Imported successfully",
        publication,
    }))
}
