//! Phrase lookup and search handlers.
//!
//! Each handler forwards its path or query parameters to the
//! [`PhraseRepository`](phrasebook_persistence::PhraseRepository) unchanged
//! and returns the result. Ids are not validated here; an id that matches no
//! document is simply not found.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phrasebook_persistence::{SearchEngine, SortDirective};
use serde::Deserialize;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Text matched against status, phrase and translations.
    pub query: Option<String>,

    /// Optional ordering, `field[:asc|desc]`.
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

impl SearchParams {
    /// Returns the search text, rejecting a missing or blank value.
    pub fn query_text(&self) -> RestResult<&str> {
        match self.query.as_deref() {
            Some(q) if !q.trim().is_empty() => Ok(q),
            _ => Err(RestError::BadRequest {
                message: "The 'query' parameter is required".to_string(),
            }),
        }
    }

    /// Parses `sortBy`, if present.
    pub fn sort_directive(&self) -> RestResult<Option<SortDirective>> {
        self.sort_by
            .as_deref()
            .map(|s| s.parse::<SortDirective>().map_err(RestError::from))
            .transpose()
    }
}

/// Handler for phrase search.
///
/// # HTTP Request
///
/// `GET [base]/phrase/search?query=[text]&sortBy=[field:dir]`
///
/// # Response
///
/// - `200 OK` - JSON array of matching phrases
/// - `400 Bad Request` - Missing `query`, invalid `sortBy` or malformed query string
/// - `404 Not Found` - Nothing matched
pub async fn search_handler<E>(
    State(state): State<AppState<E>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> RestResult<Response>
where
    E: SearchEngine,
{
    let Query(params) = params.map_err(|rejection| RestError::BadRequest {
        message: rejection.body_text(),
    })?;
    let query = params.query_text()?;
    let sort = params.sort_directive()?;

    debug!(
        query = %query,
        sort = ?params.sort_by,
        "Processing search request"
    );

    let phrases = state
        .repository()
        .search_by_query(query, sort.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(phrases)).into_response())
}

/// Handler for looking up a phrase by id.
///
/// # HTTP Request
///
/// `GET [base]/phrase/[id]`
///
/// # Response
///
/// - `200 OK` - JSON array holding the phrase, translations included
/// - `404 Not Found` - No phrase with that id
pub async fn find_by_id_handler<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    E: SearchEngine,
{
    debug!(id = %id, "Processing find by id request");

    let phrases = state.repository().find_by_id(&id).await?;

    Ok((StatusCode::OK, Json(phrases)).into_response())
}

/// Handler for fetching one translation of a phrase.
///
/// # HTTP Request
///
/// `GET [base]/phrase/[id]/[language]`
///
/// # Response
///
/// - `200 OK` - The translation as `text/plain`
/// - `404 Not Found` - No phrase with that id, or no translation for that language
pub async fn translation_handler<E>(
    State(state): State<AppState<E>>,
    Path((id, language)): Path<(String, String)>,
) -> RestResult<Response>
where
    E: SearchEngine,
{
    debug!(id = %id, language = %language, "Processing translation request");

    let translation = state
        .repository()
        .find_by_id_and_language(&id, &language)
        .await?;

    Ok((StatusCode::OK, translation).into_response())
}
