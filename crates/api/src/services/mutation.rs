//! Generic form/mutation controller.
//!
//! One edit-session type drives create and edit across every managed
//! collection instead of five near-identical per-screen flows. A session
//! owns its buffer exclusively; `submit` runs validate -> optional upload ->
//! exactly one store write, and any failure hands the untouched buffer back
//! for retry.

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use persistence::document::{fields_from, Document};
use persistence::store::{DocumentStore, StoreError};

use crate::services::media::{MediaFile, MediaUploader, UploadError};

/// A validated, serializable edit-form payload bound to a collection.
pub trait EntityForm: Validate + Serialize + Clone + Send + Sync {
    /// Collection the form writes into.
    const COLLECTION: &'static str;

    /// Receives the hosted URL after a pending upload completes. Forms
    /// without a media field ignore the call.
    fn attach_media_url(&mut self, _url: String) {}

    /// Validates the buffer. When an upload is pending, the media field is
    /// satisfied by the upload result rather than the buffer, so the check
    /// runs against a probe with a placeholder URL attached.
    fn validate_form(&self, upload_pending: bool) -> Result<(), ValidationErrors> {
        if upload_pending {
            let mut probe = self.clone();
            probe.attach_media_url("https://upload.pending/probe".to_string());
            probe.validate()
        } else {
            self.validate()
        }
    }
}

/// Whether a session creates a new document or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(Uuid),
}

/// Edit-session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing,
    Validating,
    Uploading,
    Saving,
}

/// Error type for submit and delete operations.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Validation failed: {0}")]
    Invalid(String),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Write failed: {0}")]
    Write(#[from] StoreError),

    #[error("Destructive action was not confirmed")]
    NotConfirmed,
}

/// One create/edit session over a single entity.
///
/// The buffer is exclusively owned by the session; no two sessions share
/// one. On any submit failure the buffer (and any pending upload) survives
/// so the admin can retry without re-entering data.
pub struct EditSession<F: EntityForm> {
    mode: EditMode,
    buffer: F,
    pending_upload: Option<MediaFile>,
    cleared_fields: Vec<&'static str>,
    state: EditState,
}

impl<F: EntityForm> EditSession<F> {
    /// Starts a create session from an entity-specific template.
    pub fn create(template: F) -> Self {
        Self {
            mode: EditMode::Create,
            buffer: template,
            pending_upload: None,
            cleared_fields: Vec::new(),
            state: EditState::Editing,
        }
    }

    /// Starts an edit session over an existing document's buffer copy.
    pub fn edit(id: Uuid, buffer: F) -> Self {
        Self {
            mode: EditMode::Edit(id),
            buffer,
            pending_upload: None,
            cleared_fields: Vec::new(),
            state: EditState::Editing,
        }
    }

    /// Field-level access to the buffer.
    pub fn buffer_mut(&mut self) -> &mut F {
        &mut self.buffer
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Stages a media file to be uploaded during submit.
    pub fn set_upload(&mut self, file: MediaFile) {
        self.pending_upload = Some(file);
    }

    /// Marks a stored field for removal on the next write (edit mode only;
    /// a create simply omits the field).
    pub fn clear_field(&mut self, name: &'static str) {
        if !self.cleared_fields.contains(&name) {
            self.cleared_fields.push(name);
        }
    }

    /// Discards the buffer and any pending upload.
    pub fn cancel(self) {
        drop(self);
    }

    /// Runs the submit protocol:
    ///
    /// 1. validate the buffer; on failure abort with no network call;
    /// 2. upload the pending media file, if any; on failure abort the whole
    ///    submit;
    /// 3. merge the hosted URL into the payload;
    /// 4. issue exactly one create or update, keyed by the session mode;
    /// 5. on success return to `Idle`; on any failure return to `Editing`
    ///    with the buffer preserved.
    pub async fn submit(
        &mut self,
        store: &dyn DocumentStore,
        uploader: Option<&dyn MediaUploader>,
    ) -> Result<Document, MutationError> {
        self.state = EditState::Validating;
        if let Err(errors) = self.buffer.validate_form(self.pending_upload.is_some()) {
            self.state = EditState::Editing;
            return Err(MutationError::Validation(errors));
        }

        if let Some(file) = self.pending_upload.clone() {
            let uploader = uploader.ok_or_else(|| {
                self.state = EditState::Editing;
                MutationError::Configuration(
                    "A media file was attached but no upload host is configured".into(),
                )
            })?;

            self.state = EditState::Uploading;
            let uploaded = match uploader.upload(file).await {
                Ok(uploaded) => uploaded,
                Err(e) => {
                    self.state = EditState::Editing;
                    return Err(MutationError::Upload(e));
                }
            };
            self.buffer.attach_media_url(uploaded.secure_url);
            self.pending_upload = None;
        }

        self.state = EditState::Saving;
        let mut fields = match fields_from(&self.buffer) {
            Ok(fields) => fields,
            Err(e) => {
                self.state = EditState::Editing;
                return Err(MutationError::Write(e));
            }
        };
        for name in &self.cleared_fields {
            fields.insert((*name).to_string(), Value::Null);
        }

        let result = match self.mode {
            EditMode::Create => store.create_document(F::COLLECTION, fields).await,
            EditMode::Edit(id) => store.update_document(F::COLLECTION, id, fields).await,
        };

        match result {
            Ok(doc) => {
                self.state = EditState::Idle;
                info!(
                    collection = F::COLLECTION,
                    id = %doc.id,
                    mode = ?self.mode,
                    "Edit session committed"
                );
                Ok(doc)
            }
            Err(e) => {
                self.state = EditState::Editing;
                Err(MutationError::Write(e))
            }
        }
    }
}

/// Deletes a document behind an explicit confirmation gate.
///
/// Without confirmation the destructive call is never issued; on store
/// failure the entity stays in the snapshot.
pub async fn delete_confirmed(
    store: &dyn DocumentStore,
    collection: &str,
    id: Uuid,
    confirmed: bool,
) -> Result<(), MutationError> {
    if !confirmed {
        return Err(MutationError::NotConfirmed);
    }

    store.delete_document(collection, id).await?;
    info!(collection, %id, "Document deleted");
    Ok(())
}
