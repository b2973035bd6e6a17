//! Best-effort mirroring of interviewer edits onto remote voice agents.
//!
//! Sync runs only after the local mutation has succeeded. A failed remote
//! call is logged and reported as [`SyncOutcome::Failed`]; it never reverts
//! or fails the local result, and nothing retries it.

use persona_types::agent::{AgentId, AgentUpdate};
use persona_types::interviewer::{Interviewer, InterviewerPatch};

use super::client::AgentClient;

/// What happened to the remote agent after a local mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote agent was updated or deleted.
    Synced,
    /// No remote call was needed or possible.
    Skipped(SkipReason),
    /// The remote call was attempted and failed; local and remote now differ.
    Failed(String),
    /// The patch renames or revoices the interviewer, but there was no
    /// record to compare it against. Callers treat this as a failed request.
    MissingRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither the name nor the voice changed.
    Unchanged,
    /// The pre-mutation record could not be read.
    NoCurrentRecord,
    /// The record is not linked to a remote agent.
    NoAgent,
}

/// Decide whether a patch must be pushed to the remote agent.
///
/// A field counts as changed when it is present, non-empty, and differs from
/// the current value. The pushed values fall back to the current record for
/// whichever field the patch leaves out (or sets to an empty string).
pub fn resolve_agent_update(current: &Interviewer, patch: &InterviewerPatch) -> Option<AgentUpdate> {
    let new_name = patch.name.as_deref().filter(|n| !n.is_empty());
    let new_audio = patch.audio.as_deref().filter(|a| !a.is_empty());

    let name_changed = new_name.is_some_and(|n| n != current.name);
    let audio_changed = new_audio.is_some_and(|a| Some(a) != current.audio.as_deref());

    if !name_changed && !audio_changed {
        return None;
    }

    Some(AgentUpdate {
        agent_name: new_name.unwrap_or(&current.name).to_string(),
        audio: new_audio
            .map(str::to_string)
            .or_else(|| current.audio.clone()),
    })
}

/// True when the patch carries a non-empty name or voice.
fn touches_agent(patch: &InterviewerPatch) -> bool {
    patch.name.as_deref().is_some_and(|n| !n.is_empty())
        || patch.audio.as_deref().is_some_and(|a| !a.is_empty())
}

/// Applies local interviewer mutations to the remote agent platform.
pub struct AgentSync<A: AgentClient> {
    client: A,
}

impl<A: AgentClient> AgentSync<A> {
    pub fn new(client: A) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &A {
        &self.client
    }

    /// Mirror a successful local update. `current` is the record as it was
    /// before the patch was applied.
    pub async fn after_update(
        &self,
        current: Option<&Interviewer>,
        patch: &InterviewerPatch,
    ) -> SyncOutcome {
        let Some(current) = current else {
            if touches_agent(patch) {
                tracing::error!("no current interviewer to compare the name/voice change against");
                return SyncOutcome::MissingRecord;
            }
            return SyncOutcome::Skipped(SkipReason::NoCurrentRecord);
        };

        let Some(update) = resolve_agent_update(current, patch) else {
            return SyncOutcome::Skipped(SkipReason::Unchanged);
        };

        let Some(agent_id) = AgentId::from_reference(current.agent_id.as_deref()) else {
            tracing::warn!(
                interviewer_id = %current.id,
                "interviewer has no agent; name/voice change not propagated"
            );
            return SyncOutcome::Skipped(SkipReason::NoAgent);
        };

        match self.client.update_agent(&agent_id, &update).await {
            Ok(()) => {
                tracing::info!(
                    interviewer_id = %current.id,
                    agent_id = %agent_id,
                    provider = self.client.name(),
                    "agent updated"
                );
                SyncOutcome::Synced
            }
            Err(e) => {
                tracing::error!(
                    interviewer_id = %current.id,
                    agent_id = %agent_id,
                    provider = self.client.name(),
                    error = %e,
                    "failed to update agent"
                );
                SyncOutcome::Failed(e.to_string())
            }
        }
    }

    /// Mirror a successful local delete. `current` is the record as it was
    /// before deletion.
    pub async fn after_delete(&self, current: Option<&Interviewer>) -> SyncOutcome {
        let Some(current) = current else {
            return SyncOutcome::Skipped(SkipReason::NoCurrentRecord);
        };

        let Some(agent_id) = AgentId::from_reference(current.agent_id.as_deref()) else {
            return SyncOutcome::Skipped(SkipReason::NoAgent);
        };

        match self.client.delete_agent(&agent_id).await {
            Ok(()) => {
                tracing::info!(
                    interviewer_id = %current.id,
                    agent_id = %agent_id,
                    provider = self.client.name(),
                    "agent deleted"
                );
                SyncOutcome::Synced
            }
            Err(e) => {
                tracing::error!(
                    interviewer_id = %current.id,
                    agent_id = %agent_id,
                    provider = self.client.name(),
                    error = %e,
                    "failed to delete agent"
                );
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use chrono::Utc;
    use persona_types::error::AgentError;
    use persona_types::interviewer::InterviewerId;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Update(AgentId, AgentUpdate),
        Delete(AgentId),
    }

    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<Call>>,
        fail: bool,
    }

    impl AgentClient for RecordingClient {
        fn name(&self) -> &str {
            "recording"
        }

        async fn update_agent(&self, agent_id: &AgentId, update: &AgentUpdate) -> Result<(), AgentError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(agent_id.clone(), update.clone()));
            if self.fail {
                return Err(AgentError::Http("connection reset".to_string()));
            }
            Ok(())
        }

        async fn delete_agent(&self, agent_id: &AgentId) -> Result<(), AgentError> {
            self.calls.lock().unwrap().push(Call::Delete(agent_id.clone()));
            if self.fail {
                return Err(AgentError::Http("connection reset".to_string()));
            }
            Ok(())
        }
    }

    fn lisa() -> Interviewer {
        Interviewer {
            id: InterviewerId(42),
            created_at: Utc::now(),
            name: "Lisa".to_string(),
            empathy: 7,
            rapport: 5,
            exploration: 3,
            speed: 8,
            image: "/interviewers/Lisa.png".to_string(),
            description: None,
            audio: Some("/audio/Lisa.wav".to_string()),
            agent_id: Some("agent_abc".to_string()),
        }
    }

    fn patch(name: Option<&str>, audio: Option<&str>) -> InterviewerPatch {
        InterviewerPatch {
            name: name.map(str::to_string),
            audio: audio.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_unchanged() {
        let current = lisa();
        assert_eq!(resolve_agent_update(&current, &patch(None, None)), None);
        assert_eq!(
            resolve_agent_update(&current, &patch(Some("Lisa"), Some("/audio/Lisa.wav"))),
            None
        );
    }

    #[test]
    fn test_resolve_empty_strings_do_not_count_as_changes() {
        let current = lisa();
        assert_eq!(resolve_agent_update(&current, &patch(Some(""), Some(""))), None);
    }

    #[test]
    fn test_resolve_name_change_falls_back_to_current_audio() {
        let update = resolve_agent_update(&lisa(), &patch(Some("Nova"), None)).unwrap();
        assert_eq!(update.agent_name, "Nova");
        assert_eq!(update.audio.as_deref(), Some("/audio/Lisa.wav"));
    }

    #[test]
    fn test_resolve_audio_change_falls_back_to_current_name() {
        let update = resolve_agent_update(&lisa(), &patch(Some(""), Some("/audio/Bob.wav"))).unwrap();
        assert_eq!(update.agent_name, "Lisa");
        assert_eq!(update.audio.as_deref(), Some("/audio/Bob.wav"));
    }

    #[test]
    fn test_resolve_audio_set_for_the_first_time() {
        let mut current = lisa();
        current.audio = None;
        let update = resolve_agent_update(&current, &patch(None, Some("/audio/Bob.wav"))).unwrap();
        assert_eq!(update.audio.as_deref(), Some("/audio/Bob.wav"));
    }

    #[tokio::test]
    async fn test_after_update_calls_client_once_with_resolved_values() {
        let sync = AgentSync::new(RecordingClient::default());
        let current = lisa();

        let outcome = sync
            .after_update(Some(&current), &patch(Some("Nova"), Some("/audio/Bob.wav")))
            .await;

        assert_eq!(outcome, SyncOutcome::Synced);
        let calls = sync.client().calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![Call::Update(
                AgentId("agent_abc".to_string()),
                AgentUpdate {
                    agent_name: "Nova".to_string(),
                    audio: Some("/audio/Bob.wav".to_string()),
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_after_update_unchanged_makes_no_call() {
        let sync = AgentSync::new(RecordingClient::default());
        let current = lisa();
        let personality_only = InterviewerPatch {
            empathy: Some(2),
            ..Default::default()
        };

        let outcome = sync.after_update(Some(&current), &personality_only).await;
        assert_eq!(outcome, SyncOutcome::Skipped(SkipReason::Unchanged));
        assert!(sync.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_after_update_without_agent_is_skipped() {
        let sync = AgentSync::new(RecordingClient::default());
        let mut current = lisa();
        current.agent_id = None;

        let outcome = sync.after_update(Some(&current), &patch(Some("Nova"), None)).await;
        assert_eq!(outcome, SyncOutcome::Skipped(SkipReason::NoAgent));
        assert!(sync.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_after_update_without_current_and_name_change_is_missing_record() {
        let sync = AgentSync::new(RecordingClient::default());
        assert_eq!(
            sync.after_update(None, &patch(Some("Nova"), None)).await,
            SyncOutcome::MissingRecord
        );
        assert_eq!(
            sync.after_update(None, &patch(None, Some("/audio/Bob.wav"))).await,
            SyncOutcome::MissingRecord
        );
        assert!(sync.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_after_update_without_current_personality_only_is_skipped() {
        let sync = AgentSync::new(RecordingClient::default());
        let personality_only = InterviewerPatch {
            speed: Some(3),
            ..Default::default()
        };

        assert_eq!(
            sync.after_update(None, &personality_only).await,
            SyncOutcome::Skipped(SkipReason::NoCurrentRecord)
        );
        assert_eq!(
            sync.after_update(None, &patch(Some(""), Some(""))).await,
            SyncOutcome::Skipped(SkipReason::NoCurrentRecord)
        );
        assert!(sync.client().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_after_update_failure_is_reported_not_raised() {
        let sync = AgentSync::new(RecordingClient {
            fail: true,
            ..Default::default()
        });
        let current = lisa();

        let outcome = sync.after_update(Some(&current), &patch(Some("Nova"), None)).await;
        assert!(matches!(outcome, SyncOutcome::Failed(ref msg) if msg.contains("connection reset")));
        assert_eq!(sync.client().calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_after_delete_calls_client() {
        let sync = AgentSync::new(RecordingClient::default());
        let current = lisa();

        assert_eq!(sync.after_delete(Some(&current)).await, SyncOutcome::Synced);
        assert_eq!(
            sync.client().calls.lock().unwrap().clone(),
            vec![Call::Delete(AgentId("agent_abc".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_after_delete_without_agent_makes_no_call() {
        let sync = AgentSync::new(RecordingClient::default());
        let mut current = lisa();
        current.agent_id = Some(String::new());

        assert_eq!(
            sync.after_delete(Some(&current)).await,
            SyncOutcome::Skipped(SkipReason::NoAgent)
        );
        assert_eq!(
            sync.after_delete(None).await,
            SyncOutcome::Skipped(SkipReason::NoCurrentRecord)
        );
        assert!(sync.client().calls.lock().unwrap().is_empty());
    }
}
