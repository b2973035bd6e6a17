//! Interviewer management service.
//!
//! Wraps the interviewer repository with named use cases and the duplicate
//! check performed before insert. Every store failure is logged here, at its
//! source, and returned as a typed [`InterviewerError`] so callers can tell
//! "not found" and "duplicate" apart from storage failures.

use persona_types::error::InterviewerError;
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};

use crate::repository::interviewer::InterviewerRepository;

/// Service orchestrating the interviewer lifecycle.
///
/// Generic over the repository trait to maintain clean architecture --
/// persona-core never depends on persona-infra.
pub struct InterviewerService<R: InterviewerRepository> {
    repo: R,
}

impl<R: InterviewerRepository> InterviewerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all interviewers.
    ///
    /// `client_id` identifies the caller in logs; it does not filter results.
    pub async fn list_interviewers(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Interviewer>, InterviewerError> {
        self.repo.list().await.map_err(|e| {
            tracing::error!(
                client_id = client_id.unwrap_or_default(),
                error = %e,
                "error fetching interviewers"
            );
            InterviewerError::StorageError(e.to_string())
        })
    }

    /// Create an interviewer unless one with the same `name` and `agent_id`
    /// already exists.
    ///
    /// The check and the insert are separate statements; two concurrent
    /// creates with the same pair can both succeed.
    pub async fn create_interviewer(
        &self,
        new: NewInterviewer,
    ) -> Result<Interviewer, InterviewerError> {
        let existing = self
            .repo
            .find_by_name_and_agent(&new.name, new.agent_id.as_deref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "error checking existing interviewer");
                InterviewerError::StorageError(e.to_string())
            })?;

        if existing.is_some() {
            tracing::error!(
                name = %new.name,
                agent_id = new.agent_id.as_deref().unwrap_or_default(),
                "an interviewer with this name already exists"
            );
            return Err(InterviewerError::Duplicate {
                name: new.name,
                agent_id: new.agent_id,
            });
        }

        let created = self.repo.insert(&new).await.map_err(|e| {
            tracing::error!(error = %e, "error creating interviewer");
            InterviewerError::StorageError(e.to_string())
        })?;

        tracing::info!(interviewer_id = %created.id, name = %created.name, "interviewer created");
        Ok(created)
    }

    /// Get an interviewer by id.
    pub async fn get_interviewer(&self, id: InterviewerId) -> Result<Interviewer, InterviewerError> {
        match self.repo.get_by_id(id).await {
            Ok(Some(interviewer)) => Ok(interviewer),
            Ok(None) => {
                tracing::warn!(interviewer_id = %id, "interviewer not found");
                Err(InterviewerError::NotFound)
            }
            Err(e) => {
                tracing::error!(interviewer_id = %id, error = %e, "error fetching interviewer");
                Err(InterviewerError::StorageError(e.to_string()))
            }
        }
    }

    /// Apply a partial patch. Returns the updated rows (empty when no row
    /// has this id).
    pub async fn update_interviewer(
        &self,
        id: InterviewerId,
        patch: &InterviewerPatch,
    ) -> Result<Vec<Interviewer>, InterviewerError> {
        let updated = self.repo.update(id, patch).await.map_err(|e| {
            tracing::error!(interviewer_id = %id, error = %e, "error updating interviewer");
            InterviewerError::StorageError(e.to_string())
        })?;

        tracing::debug!(interviewer_id = %id, rows = updated.len(), "interviewer updated");
        Ok(updated)
    }

    /// Delete an interviewer. Returns the deleted rows (empty when no row
    /// has this id).
    pub async fn delete_interviewer(
        &self,
        id: InterviewerId,
    ) -> Result<Vec<Interviewer>, InterviewerError> {
        let deleted = self.repo.delete(id).await.map_err(|e| {
            tracing::error!(interviewer_id = %id, error = %e, "error deleting interviewer");
            InterviewerError::StorageError(e.to_string())
        })?;

        tracing::debug!(interviewer_id = %id, rows = deleted.len(), "interviewer deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::Utc;
    use persona_types::error::RepositoryError;

    /// In-memory repository with a switch to make every call fail.
    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<Vec<Interviewer>>,
        failing: AtomicBool,
        inserts: Mutex<usize>,
    }

    impl MemoryRepo {
        fn check(&self) -> Result<(), RepositoryError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(RepositoryError::Query("store unavailable".to_string()))
            } else {
                Ok(())
            }
        }

        fn insert_count(&self) -> usize {
            *self.inserts.lock().unwrap()
        }
    }

    impl InterviewerRepository for MemoryRepo {
        async fn list(&self) -> Result<Vec<Interviewer>, RepositoryError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn get_by_id(&self, id: InterviewerId) -> Result<Option<Interviewer>, RepositoryError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn find_by_name_and_agent(
            &self,
            name: &str,
            agent_id: Option<&str>,
        ) -> Result<Option<Interviewer>, RepositoryError> {
            self.check()?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.name == name && r.agent_id.as_deref() == agent_id)
                .cloned())
        }

        async fn insert(&self, new: &NewInterviewer) -> Result<Interviewer, RepositoryError> {
            self.check()?;
            *self.inserts.lock().unwrap() += 1;
            let mut rows = self.rows.lock().unwrap();
            let id = InterviewerId(rows.iter().map(|r| r.id.0).max().unwrap_or(0) + 1);
            let row = Interviewer {
                id,
                created_at: Utc::now(),
                name: new.name.clone(),
                empathy: new.empathy,
                rapport: new.rapport,
                exploration: new.exploration,
                speed: new.speed,
                image: new.image.clone(),
                description: new.description.clone(),
                audio: new.audio.clone(),
                agent_id: new.agent_id.clone(),
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: InterviewerId,
            patch: &InterviewerPatch,
        ) -> Result<Vec<Interviewer>, RepositoryError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let mut updated = Vec::new();
            for row in rows.iter_mut().filter(|r| r.id == id) {
                if let Some(v) = &patch.name {
                    row.name = v.clone();
                }
                if let Some(v) = patch.empathy {
                    row.empathy = v;
                }
                if let Some(v) = patch.rapport {
                    row.rapport = v;
                }
                if let Some(v) = patch.exploration {
                    row.exploration = v;
                }
                if let Some(v) = patch.speed {
                    row.speed = v;
                }
                if let Some(v) = &patch.image {
                    row.image = v.clone();
                }
                if let Some(v) = &patch.description {
                    row.description = Some(v.clone());
                }
                if let Some(v) = &patch.audio {
                    row.audio = Some(v.clone());
                }
                if let Some(v) = &patch.agent_id {
                    row.agent_id = Some(v.clone());
                }
                updated.push(row.clone());
            }
            Ok(updated)
        }

        async fn delete(&self, id: InterviewerId) -> Result<Vec<Interviewer>, RepositoryError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let (deleted, kept): (Vec<_>, Vec<_>) = rows.drain(..).partition(|r| r.id == id);
            *rows = kept;
            Ok(deleted)
        }
    }

    fn lisa() -> NewInterviewer {
        NewInterviewer {
            name: "Lisa".to_string(),
            empathy: 7,
            rapport: 5,
            exploration: 3,
            speed: 8,
            image: "/interviewers/Lisa.png".to_string(),
            description: Some("Warm and curious".to_string()),
            audio: Some("/audio/Lisa.wav".to_string()),
            agent_id: Some("agent_1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = InterviewerService::new(MemoryRepo::default());
        let created = service.create_interviewer(lisa()).await.unwrap();
        let found = service.get_interviewer(created.id).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.empathy, 7);
    }

    #[tokio::test]
    async fn test_create_duplicate_pair_is_rejected_without_insert() {
        let service = InterviewerService::new(MemoryRepo::default());
        service.create_interviewer(lisa()).await.unwrap();

        let err = service.create_interviewer(lisa()).await.unwrap_err();
        assert!(matches!(err, InterviewerError::Duplicate { ref name, .. } if name == "Lisa"));
        assert_eq!(service.repo.insert_count(), 1);
        assert_eq!(service.list_interviewers(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_name_different_agent_is_allowed() {
        let service = InterviewerService::new(MemoryRepo::default());
        service.create_interviewer(lisa()).await.unwrap();

        let mut other = lisa();
        other.agent_id = Some("agent_2".to_string());
        service.create_interviewer(other).await.unwrap();

        assert_eq!(service.list_interviewers(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_when_existence_check_fails() {
        let repo = MemoryRepo::default();
        repo.failing.store(true, Ordering::SeqCst);
        let service = InterviewerService::new(repo);

        let err = service.create_interviewer(lisa()).await.unwrap_err();
        assert!(matches!(err, InterviewerError::StorageError(_)));
        assert_eq!(service.repo.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = InterviewerService::new(MemoryRepo::default());
        let err = service.get_interviewer(InterviewerId(99)).await.unwrap_err();
        assert!(matches!(err, InterviewerError::NotFound));
    }

    #[tokio::test]
    async fn test_get_storage_failure_is_distinct_from_not_found() {
        let repo = MemoryRepo::default();
        repo.failing.store(true, Ordering::SeqCst);
        let service = InterviewerService::new(repo);

        let err = service.get_interviewer(InterviewerId(1)).await.unwrap_err();
        assert!(matches!(err, InterviewerError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_personality_patch_is_stored_verbatim() {
        let service = InterviewerService::new(MemoryRepo::default());
        let created = service.create_interviewer(lisa()).await.unwrap();

        let patch = InterviewerPatch {
            empathy: Some(2),
            rapport: Some(10),
            exploration: Some(0),
            speed: Some(6),
            ..Default::default()
        };
        let updated = service.update_interviewer(created.id, &patch).await.unwrap();
        assert_eq!(updated.len(), 1);

        let found = service.get_interviewer(created.id).await.unwrap();
        assert_eq!(
            (found.empathy, found.rapport, found.exploration, found.speed),
            (2, 10, 0, 6)
        );
        assert_eq!(found.name, "Lisa");
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_no_rows() {
        let service = InterviewerService::new(MemoryRepo::default());
        let patch = InterviewerPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        let rows = service.update_interviewer(InterviewerId(5), &patch).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_rows() {
        let service = InterviewerService::new(MemoryRepo::default());
        let created = service.create_interviewer(lisa()).await.unwrap();

        let deleted = service.delete_interviewer(created.id).await.unwrap();
        assert_eq!(deleted, vec![created.clone()]);
        assert!(matches!(
            service.get_interviewer(created.id).await,
            Err(InterviewerError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_failure_is_storage_error() {
        let repo = MemoryRepo::default();
        repo.failing.store(true, Ordering::SeqCst);
        let service = InterviewerService::new(repo);

        let err = service.list_interviewers(Some("client_9")).await.unwrap_err();
        assert!(matches!(err, InterviewerError::StorageError(_)));
    }
}
