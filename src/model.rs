//! The profile document and the shapes it is read and written in.
//!
//! [`ProfileInput`] is what clients submit: every field is optional so that a
//! missing `name` or `email` surfaces as [`Error::Validation`] rather than a
//! deserialization failure. [`Profile`] is what the store holds and returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Work {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// A stored candidate profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub work: Vec<Work>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile as submitted by a client, before validation.
///
/// Unknown fields are ignored, as are any client-supplied ids or timestamps.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub work: Vec<Work>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl ProfileInput {
    /// Checks the required fields and builds the stored document.
    ///
    /// `id` and `created_at` are carried over from the document being replaced
    /// when this is an upsert; `updated_at` is always `now`.
    pub fn into_profile(self, id: Uuid, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<Profile> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if !missing.is_empty() {
            let reasons: Vec<String> = missing
                .iter()
                .map(|field| format!("{field}: Path `{field}` is required."))
                .collect();
            return Err(Error::Validation(reasons.join(", ")));
        }

        Ok(Profile {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            education: self.education,
            skills: self.skills,
            projects: self.projects,
            work: self.work,
            links: self.links,
            created_at,
            updated_at: now,
        })
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

impl From<Profile> for ProfileInput {
    fn from(profile: Profile) -> Self {
        Self {
            name: Some(profile.name),
            email: Some(profile.email),
            education: profile.education,
            skills: profile.skills,
            projects: profile.projects,
            work: profile.work,
            links: profile.links,
        }
    }
}

/// The candidate's projects, as returned by the project endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectsView {
    pub projects: Vec<Project>,
    pub candidate: String,
}

/// The candidate's skills in stored order, with their count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkillsView {
    pub skills: Vec<String>,
    pub count: usize,
}

impl From<&Profile> for ProjectsView {
    fn from(profile: &Profile) -> Self {
        Self {
            projects: profile.projects.clone(),
            candidate: profile.name.clone(),
        }
    }
}

impl From<&Profile> for SkillsView {
    fn from(profile: &Profile) -> Self {
        Self {
            skills: profile.skills.clone(),
            count: profile.skills.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(name: Option<&str>, email: Option<&str>) -> ProfileInput {
        ProfileInput {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let now = Utc::now();
        let err = input(None, Some("a@b.c")).into_profile(Uuid::new_v4(), now, now).unwrap_err();
        assert_eq!(err.to_string(), "Profile validation failed: name: Path `name` is required.");

        let err = input(Some(""), None).into_profile(Uuid::new_v4(), now, now).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Profile validation failed: name: Path `name` is required., email: Path `email` is required."
        );
    }

    #[test]
    fn test_wire_format() {
        let now = Utc::now();
        let profile = input(Some("Ada"), Some("ada@example.com"))
            .into_profile(Uuid::new_v4(), now, now)
            .unwrap();
        let value = serde_json::to_value(&profile).unwrap();

        assert!(value.get("_id").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["skills"], json!([]));
        assert!(value.get("links").is_none());
    }

    #[test]
    fn test_input_ignores_unknown_and_system_fields() {
        let parsed: ProfileInput = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "_id": "not-a-uuid",
            "createdAt": "yesterday",
            "hobbies": ["chess"],
            "projects": [{ "title": "Engine" }]
        }))
        .unwrap();

        assert_eq!(parsed.name.as_deref(), Some("Ada"));
        assert_eq!(parsed.projects[0].title.as_deref(), Some("Engine"));
        assert!(parsed.projects[0].links.is_empty());
    }
}
