use std::future::Future;
use std::sync::Arc;
use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
use chrono::{SecondsFormat, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use crate::model::{Profile, ProfileInput, Project, ProjectsView, SkillsView};
use crate::{Error, ProfileStore, Result};

pub type SharedStore = Arc<dyn ProfileStore>;

/// Serves the profile API over HTTP.
pub struct ApiServer {
    store: SharedStore,
}

impl ApiServer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn router(&self) -> axum::Router {
        routes(self.store.clone())
    }

    /// Binds `addr` and serves until `shutdown` resolves.
    pub async fn listen<F>(&self, addr: &str, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await?;
        info!("Profile Store listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Builds the API router over `store`.
pub fn routes(store: SharedStore) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/api/profile", get(get_profile).post(create_profile).put(update_profile))
        .route("/api/projects", get(all_projects))
        .route("/api/projects/skill/{skill}", get(projects_by_skill))
        .route("/api/skills/top", get(top_skills))
        .route("/api/search", get(search))
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .with_state(store)
}

/// A JSON `{ "error": ... }` response with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation(_) | Error::Uniqueness { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{} {}", self.status, self.message);
        } else {
            warn!("{} {}", self.status, self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn create_profile(
    State(store): State<SharedStore>,
    body: std::result::Result<Json<ProfileInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let Json(input) = body?;
    let profile = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_profile(State(store): State<SharedStore>) -> ApiResult<Json<Profile>> {
    Ok(Json(store.find_first().await?))
}

async fn update_profile(
    State(store): State<SharedStore>,
    body: std::result::Result<Json<ProfileInput>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(input) = body?;
    Ok(Json(store.upsert(input).await?))
}

#[derive(Serialize)]
struct SkillProjects {
    skill: String,
    projects: Vec<Project>,
    candidate: String,
}

async fn projects_by_skill(
    State(store): State<SharedStore>,
    Path(skill): Path<String>,
) -> ApiResult<Json<SkillProjects>> {
    let ProjectsView { projects, candidate } = store.find_projects_by_skill(&skill).await?;
    Ok(Json(SkillProjects { skill, projects, candidate }))
}

async fn top_skills(State(store): State<SharedStore>) -> ApiResult<Json<SkillsView>> {
    Ok(Json(store.get_skills().await?))
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    query: String,
    results: Profile,
}

async fn search(
    State(store): State<SharedStore>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResults>> {
    let Query(params) = params?;
    let query = match params.q {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ApiError::bad_request("Search query required")),
    };
    let results = store.text_search(&query).await?;
    Ok(Json(SearchResults { query, results }))
}

async fn all_projects(State(store): State<SharedStore>) -> ApiResult<Json<ProjectsView>> {
    Ok(Json(store.find_projects().await?))
}

async fn not_found(method: Method, uri: axum::http::Uri) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: format!("Cannot {} {}", method, uri.path()),
    }
}

async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let requested = req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS).cloned();
        let mut res = StatusCode::NO_CONTENT.into_response();
        let headers = res.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,HEAD,PUT,PATCH,POST,DELETE"),
        );
        if let Some(requested) = requested {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested);
        }
        return res;
    }

    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    res
}
