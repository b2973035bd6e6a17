//! Interviewer card state machine.

use std::sync::Arc;
use std::time::Duration;

use persona_types::interviewer::{Interviewer, InterviewerId};
use tokio::task::JoinHandle;

use super::api::{AudioPlayer, InterviewerApi};
use super::draft::{Dimension, EditDraft};
use super::refresh::{RefreshBus, RefreshEvent};

pub const UPDATE_FAILED: &str = "Failed to update interviewer";
pub const DELETE_FAILED: &str = "Failed to delete interviewer";

/// Pause between selecting a voice and starting its preview.
pub const PREVIEW_DELAY: Duration = Duration::from_millis(100);

/// One interviewer tile in the dashboard and everything it can open.
///
/// The card never refetches on its own: after a successful save or delete
/// it publishes a [`RefreshEvent`] and the list owner decides what to do.
/// Mutations take `&mut self`, so a card can only have one save or delete
/// in flight; `is_saving` / `is_deleting` exist for rendering.
pub struct InterviewerCard<A: InterviewerApi> {
    interviewer: Interviewer,
    api: A,
    refresh: RefreshBus,
    draft: EditDraft,
    details_open: bool,
    edit_open: bool,
    gallery_open: bool,
    delete_confirm_open: bool,
    saving: bool,
    deleting: bool,
    error: Option<String>,
    audio_preview: Option<String>,
}

impl<A: InterviewerApi> InterviewerCard<A> {
    pub fn new(interviewer: Interviewer, api: A, refresh: RefreshBus) -> Self {
        let draft = EditDraft::from_interviewer(&interviewer);
        Self {
            interviewer,
            api,
            refresh,
            draft,
            details_open: false,
            edit_open: false,
            gallery_open: false,
            delete_confirm_open: false,
            saving: false,
            deleting: false,
            error: None,
            audio_preview: None,
        }
    }

    pub fn id(&self) -> InterviewerId {
        self.interviewer.id
    }

    pub fn interviewer(&self) -> &Interviewer {
        &self.interviewer
    }

    /// Replace the displayed record after a list refetch.
    ///
    /// The edit draft is seeded once at construction and is left alone here.
    pub fn replace_interviewer(&mut self, interviewer: Interviewer) {
        self.interviewer = interviewer;
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn audio_preview(&self) -> Option<&str> {
        self.audio_preview.as_deref()
    }

    pub fn is_details_open(&self) -> bool {
        self.details_open
    }

    pub fn is_edit_open(&self) -> bool {
        self.edit_open
    }

    pub fn is_gallery_open(&self) -> bool {
        self.gallery_open
    }

    pub fn is_delete_confirm_open(&self) -> bool {
        self.delete_confirm_open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn save_label(&self) -> &'static str {
        if self.saving { "Saving..." } else { "Save" }
    }

    pub fn delete_label(&self) -> &'static str {
        if self.deleting { "Deleting..." } else { "Delete" }
    }

    pub fn open_details(&mut self) {
        self.details_open = true;
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
    }

    pub fn open_edit(&mut self) {
        self.edit_open = true;
    }

    /// Cancel editing. Unsaved draft changes survive until the next save.
    pub fn close_edit(&mut self) {
        self.edit_open = false;
        self.gallery_open = false;
        self.error = None;
    }

    pub fn open_gallery(&mut self) {
        self.gallery_open = true;
    }

    pub fn close_gallery(&mut self) {
        self.gallery_open = false;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: f64) {
        self.draft.set_dimension(dimension, value);
    }

    /// Pick an avatar from the gallery; closes the gallery.
    pub fn select_avatar(&mut self, image: impl Into<String>) {
        self.draft.image = image.into();
        self.gallery_open = false;
    }

    /// Pick a voice. It becomes both the draft audio and the preview source.
    pub fn select_audio(&mut self, audio: impl Into<String>) {
        let audio = audio.into();
        self.audio_preview = Some(audio.clone());
        self.draft.audio = audio;
    }

    /// Play the selected voice after [`PREVIEW_DELAY`].
    ///
    /// Returns `None` when no voice is selected. Playback failures are logged
    /// and otherwise ignored.
    pub fn preview_audio<P>(&mut self, player: Arc<P>) -> Option<JoinHandle<()>>
    where
        P: AudioPlayer + 'static,
    {
        if self.draft.audio.is_empty() {
            return None;
        }
        let source = self.draft.audio.clone();
        self.audio_preview = Some(source.clone());

        Some(tokio::spawn(async move {
            tokio::time::sleep(PREVIEW_DELAY).await;
            if let Err(e) = player.play(&source).await {
                tracing::warn!(audio = %source, error = %e, "audio preview failed");
            }
        }))
    }

    /// Submit the draft. Returns whether the update succeeded.
    ///
    /// On success the edit form closes and a refresh is published. On
    /// failure the form stays open with [`UPDATE_FAILED`] shown.
    pub async fn save(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        self.saving = true;
        self.error = None;

        let id = self.interviewer.id;
        let patch = self.draft.to_patch();
        let saved = match self.api.update(id, &patch).await {
            Ok(_) => {
                self.edit_open = false;
                self.gallery_open = false;
                self.refresh.publish(RefreshEvent::Updated(id));
                true
            }
            Err(e) => {
                tracing::warn!(interviewer_id = %id, error = %e, "failed to update interviewer");
                self.error = Some(UPDATE_FAILED.to_string());
                false
            }
        };

        self.saving = false;
        saved
    }

    pub fn request_delete(&mut self) {
        self.delete_confirm_open = true;
    }

    /// Dismiss the confirmation. Ignored while a delete is running.
    pub fn cancel_delete(&mut self) {
        if self.is_deleting() {
            return;
        }
        self.delete_confirm_open = false;
    }

    /// Delete after confirmation. Returns whether the delete succeeded.
    ///
    /// Does nothing unless [`request_delete`](Self::request_delete) opened
    /// the confirmation. On failure the confirmation stays open with
    /// [`DELETE_FAILED`] shown.
    pub async fn confirm_delete(&mut self) -> bool {
        if self.is_deleting() || !self.is_delete_confirm_open() {
            return false;
        }
        self.deleting = true;
        self.error = None;

        let id = self.interviewer.id;
        let deleted = match self.api.delete(id).await {
            Ok(_) => {
                self.delete_confirm_open = false;
                self.details_open = false;
                self.edit_open = false;
                self.gallery_open = false;
                self.refresh.publish(RefreshEvent::Deleted(id));
                true
            }
            Err(e) => {
                tracing::warn!(interviewer_id = %id, error = %e, "failed to delete interviewer");
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        };

        self.deleting = false;
        deleted
    }
}
