use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::{Result, Error, ProfileReader, ProfileWriter, TextSearcher, PROFILE_NOT_FOUND, NO_PROJECTS_FOR_SKILL, NO_SEARCH_RESULTS};
use crate::engine::{KeywordIndex, Persistence, TextIndex};
use crate::model::{Profile, ProfileInput, ProjectsView, SkillsView};

/// In-memory document store with optional write-through persistence.
///
/// Documents are kept in insertion order. Writers hold the lock across
/// validation, the disk write and the commit, so a failed write leaves the
/// in-memory state untouched.
pub struct MemStore<I = KeywordIndex> {
    data: RwLock<Vec<Profile>>,
    persistence: Option<Arc<Persistence>>,
    index: I,
}

impl MemStore {
    pub fn new(initial_data: Vec<Profile>, persistence: Option<Arc<Persistence>>) -> Self {
        Self::with_index(initial_data, persistence, KeywordIndex)
    }

    /// Opens the store persisted under `data_dir`, loading any existing documents.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let persistence = Arc::new(Persistence::new(data_dir)?);
        let initial_data = persistence.load_all()?;
        Ok(Self::new(initial_data, Some(persistence)))
    }
}

impl<I: TextIndex> MemStore<I> {
    pub fn with_index(initial_data: Vec<Profile>, persistence: Option<Arc<Persistence>>, index: I) -> Self {
        Self {
            data: RwLock::new(initial_data),
            persistence,
            index,
        }
    }

    /// Persists `next` and, once that succeeds, makes it the live state.
    async fn commit(&self, data: &mut Vec<Profile>, next: Vec<Profile>) -> Result<()> {
        if let Some(p) = &self.persistence {
            let p = p.clone();
            let snapshot = next.clone();
            tokio::task::spawn_blocking(move || p.save_all(&snapshot))
                .await
                .map_err(|e| Error::Internal(format!("persistence task failed: {}", e)))??;
        }
        *data = next;
        Ok(())
    }
}

fn ensure_unique_email(data: &[Profile], email: &str, skip: Option<usize>) -> Result<()> {
    let taken = data
        .iter()
        .enumerate()
        .any(|(i, p)| Some(i) != skip && p.email == email);
    if taken {
        return Err(Error::Uniqueness { field: "email", value: email.to_string() });
    }
    Ok(())
}

#[async_trait]
impl<I: TextIndex> ProfileReader for MemStore<I> {
    async fn find_first(&self) -> Result<Profile> {
        let data = self.data.read().await;
        data.first().cloned().ok_or(Error::NotFound(PROFILE_NOT_FOUND))
    }

    async fn find_projects_by_skill(&self, skill: &str) -> Result<ProjectsView> {
        let needle = skill.to_lowercase();
        let data = self.data.read().await;
        data.iter()
            .find(|p| p.skills.iter().any(|s| s.to_lowercase().contains(&needle)))
            .map(ProjectsView::from)
            .ok_or(Error::NotFound(NO_PROJECTS_FOR_SKILL))
    }

    async fn find_projects(&self) -> Result<ProjectsView> {
        let data = self.data.read().await;
        data.first().map(ProjectsView::from).ok_or(Error::NotFound(PROFILE_NOT_FOUND))
    }

    async fn get_skills(&self) -> Result<SkillsView> {
        let data = self.data.read().await;
        data.first().map(SkillsView::from).ok_or(Error::NotFound(PROFILE_NOT_FOUND))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.data.read().await.len())
    }
}

#[async_trait]
impl<I: TextIndex> ProfileWriter for MemStore<I> {
    async fn create(&self, input: ProfileInput) -> Result<Profile> {
        let mut data = self.data.write().await;
        let now = Utc::now();
        let profile = input.into_profile(Uuid::new_v4(), now, now)?;
        ensure_unique_email(&data, &profile.email, None)?;

        let mut next = data.clone();
        next.push(profile.clone());
        self.commit(&mut data, next).await?;
        log::info!("Created profile {}", profile.id);
        Ok(profile)
    }

    async fn upsert(&self, input: ProfileInput) -> Result<Profile> {
        let mut data = self.data.write().await;
        let now = Utc::now();
        let mut next = data.clone();

        let profile = match next.first_mut() {
            Some(existing) => {
                let replaced = input.into_profile(existing.id, existing.created_at, now)?;
                ensure_unique_email(&data, &replaced.email, Some(0))?;
                *existing = replaced.clone();
                replaced
            }
            None => {
                let created = input.into_profile(Uuid::new_v4(), now, now)?;
                next.push(created.clone());
                created
            }
        };

        self.commit(&mut data, next).await?;
        log::info!("Upserted profile {}", profile.id);
        Ok(profile)
    }

    async fn clear_all(&self) -> Result<usize> {
        let mut data = self.data.write().await;
        let removed = data.len();
        self.commit(&mut data, Vec::new()).await?;
        Ok(removed)
    }
}

#[async_trait]
impl<I: TextIndex> TextSearcher for MemStore<I> {
    async fn text_search(&self, query: &str) -> Result<Profile> {
        let data = self.data.read().await;
        let mut best: Option<(usize, &Profile)> = None;
        for profile in data.iter() {
            if let Some(score) = self.index.score(profile, query) {
                if best.map_or(true, |(top, _)| score > top) {
                    best = Some((score, profile));
                }
            }
        }
        best.map(|(_, p)| p.clone()).ok_or(Error::NotFound(NO_SEARCH_RESULTS))
    }
}
