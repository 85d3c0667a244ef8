//! Profile Store keeps a single candidate profile and serves it over HTTP.
//!
//! Exactly one logical document is managed: every read targets "the" profile
//! (the first stored document) and writes replace it wholesale. Documents are
//! held in memory and written atomically to a JSON file on every mutation.
//!
//! ## Core Components
//! - [`model`]: The profile document and its request/response shapes.
//! - [`engine`]: The storage backend (in-memory with persistence) and the text index.
//! - [`server`]: The axum HTTP API.
//! - [`seed`]: The sample profile and the one-shot seeding routine.
//! - [`config`]: Command-line and environment configuration.

pub mod config;
pub mod engine;
pub mod model;
pub mod seed;
pub mod server;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Profile, ProfileInput, ProjectsView, SkillsView};

/// Errors returned by the Profile Store.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing from the submitted document.
    #[error("Profile validation failed: {0}")]
    Validation(String),
    /// A unique field collides with an already stored document.
    #[error("duplicate key error: {field} {value:?} already exists")]
    Uniqueness { field: &'static str, value: String },
    /// No document matched the request.
    #[error("{0}")]
    NotFound(&'static str),
    /// The backing store could not be opened or read.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized Result type for Profile Store operations.
pub type Result<T> = std::result::Result<T, Error>;

pub const PROFILE_NOT_FOUND: &str = "Profile not found";
pub const NO_PROJECTS_FOR_SKILL: &str = "No projects found for this skill";
pub const NO_SEARCH_RESULTS: &str = "No results found";

/// Read operations over the stored profile.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Returns the first stored profile in insertion order.
    async fn find_first(&self) -> Result<Profile>;
    /// Returns the candidate name and projects when any skill contains `skill`,
    /// compared case-insensitively.
    async fn find_projects_by_skill(&self, skill: &str) -> Result<ProjectsView>;
    /// Returns the candidate name and projects of the first profile.
    async fn find_projects(&self) -> Result<ProjectsView>;
    /// Returns every skill of the first profile, unranked, with its count.
    async fn get_skills(&self) -> Result<SkillsView>;
    /// Number of stored documents.
    async fn len(&self) -> Result<usize>;
}

/// Write operations. Each call is atomic at the document level.
#[async_trait]
pub trait ProfileWriter: Send + Sync {
    /// Inserts a new profile after validating required and unique fields.
    async fn create(&self, input: ProfileInput) -> Result<Profile>;
    /// Fully replaces the first profile with `input`, creating it if absent.
    async fn upsert(&self, input: ProfileInput) -> Result<Profile>;
    /// Removes every stored profile and returns how many were removed.
    async fn clear_all(&self) -> Result<usize>;
}

/// Full-text lookup across the indexed profile fields.
#[async_trait]
pub trait TextSearcher: Send + Sync {
    /// Returns the best matching profile for `query`.
    async fn text_search(&self, query: &str) -> Result<Profile>;
}

/// The primary interface for interacting with the Profile Store.
pub trait ProfileStore: ProfileReader + ProfileWriter + TextSearcher {}

impl<T: ProfileReader + ProfileWriter + TextSearcher> ProfileStore for T {}
