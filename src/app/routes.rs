use crate::adapters::structure::{scan_tree, TreeNode};
use crate::app::state::AppState;
use crate::core::filter::{CaseFilter, SortOrder};
use crate::core::search::search;
use crate::domain::model::{
    CaseStudy, ContactRequest, ContactResponse, SearchHit, ServiceDescriptor,
};
use crate::utils::error::{Result, SiteError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaseListResponse {
    pub total: usize,
    pub categories: Vec<String>,
    pub cases: Vec<CaseStudy>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(submit_contact))
        .route("/api/search", get(search_site))
        .route("/api/cases", get(list_cases))
        .route("/api/cases/{id}", get(get_case))
        .route("/api/services", get(list_services))
        .route("/api/services/{slug}", get(get_service))
        .route("/api/component-structure", get(component_structure))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "up".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        SiteError::validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let response = state.contact.submit(&request).await?;
    Ok(Json(response))
}

async fn search_site(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    let Query(params) = params.map_err(|rejection| SiteError::validation(rejection.body_text()))?;
    let query = params.q.unwrap_or_default();
    let results = search(&state.catalog, &query, params.limit);

    Ok(Json(SearchResponse {
        query,
        total: results.len(),
        results,
    }))
}

async fn list_cases(
    State(state): State<AppState>,
    params: std::result::Result<Query<CaseListParams>, QueryRejection>,
) -> Result<Json<CaseListResponse>> {
    let Query(params) = params.map_err(|rejection| SiteError::validation(rejection.body_text()))?;
    let sort = match params.sort.as_deref() {
        Some(sort) => sort.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let filter = CaseFilter {
        category: params.category,
        query: params.q,
        sort,
        featured_only: params.featured.unwrap_or(false),
    };

    let cases: Vec<CaseStudy> = filter.apply(&state.catalog).into_iter().cloned().collect();
    Ok(Json(CaseListResponse {
        total: cases.len(),
        categories: state.catalog.categories(),
        cases,
    }))
}

async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaseStudy>> {
    state
        .catalog
        .case_study(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| SiteError::not_found(format!("Case study '{}'", id)))
}

async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceDescriptor>> {
    Json(state.catalog.services.clone())
}

async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ServiceDescriptor>> {
    state
        .catalog
        .service(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| SiteError::not_found(format!("Service '{}'", slug)))
}

async fn component_structure(State(state): State<AppState>) -> Result<Json<TreeNode>> {
    let Some(settings) = state.structure.clone() else {
        return Err(SiteError::not_found("Component structure"));
    };

    let tree = tokio::task::spawn_blocking(move || scan_tree(&settings.root, settings.max_depth))
        .await
        .map_err(|e| SiteError::IoError(std::io::Error::other(e)))??;
    Ok(Json(tree))
}

async fn not_found() -> SiteError {
    SiteError::not_found("Route")
}
