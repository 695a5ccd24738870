//! Per-user practice repository.
//!
//! Holds a snapshot of the owner's patients and sessions. Every mutation
//! writes through the store and then re-fetches, so the snapshot is what the
//! store holds and never a local guess. On error the snapshot is left as it
//! was.

use jiff::Timestamp;
use jiff::civil::Date;
use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

use prontuario_audit::{AuditAction, AuditEvent};
use prontuario_core::format::digits_only;
use prontuario_core::models::{
    MAX_ATTACHMENT_BYTES, Patient, PatientDetails, PendingAttachment, Profile, ProfileUpdate,
    Session, SessionDetails, SessionDocument, StatusChange, TreatmentStatus,
};
use prontuario_core::storage_keys;

use crate::error::{RepositoryError, StorageError};
use crate::records::{load_all, load_json, save_json};
use crate::store::{ObjectStore, StoredObject};

/// Outcome of a best-effort attachment flush.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<SessionDocument>,
    pub failed: Vec<FailedUpload>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct FailedUpload {
    pub file_name: String,
    pub error: RepositoryError,
}

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PracticeSummary {
    pub total_patients: usize,
    pub active_patients: usize,
    pub total_sessions: usize,
    pub latest_session: Option<Date>,
}

pub struct PracticeRepository<S> {
    store: S,
    owner_id: Uuid,
    patients: Vec<Patient>,
    sessions: Vec<Session>,
    profile: Option<Profile>,
    last_upload_millis: i64,
}

impl<S: ObjectStore> PracticeRepository<S> {
    /// A repository with an empty snapshot. Call `refresh` before reading.
    pub fn new(store: S, owner_id: Uuid) -> Self {
        Self {
            store,
            owner_id,
            patients: Vec::new(),
            sessions: Vec::new(),
            profile: None,
            last_upload_millis: 0,
        }
    }

    /// A repository with its snapshot already loaded.
    pub async fn open(store: S, owner_id: Uuid) -> Result<Self, RepositoryError> {
        let mut repo = Self::new(store, owner_id);
        repo.refresh().await?;
        Ok(repo)
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reload patients and sessions. Both are replaced together or not at all.
    pub async fn refresh(&mut self) -> Result<(), RepositoryError> {
        let mut patients: Vec<Patient> =
            load_all(&self.store, &storage_keys::patients_prefix(self.owner_id)).await?;
        let mut sessions: Vec<Session> =
            load_all(&self.store, &storage_keys::sessions_prefix(self.owner_id)).await?;

        patients.sort_by_key(|p| p.details.name.to_lowercase());
        sessions.sort_by(|a, b| chronological_key(b).cmp(&chronological_key(a)));

        self.patients = patients;
        self.sessions = sessions;
        Ok(())
    }

    // ── Patients ─────────────────────────────────────────────────

    /// Patients ordered by name.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn get_patient(&self, id: Uuid) -> Result<&Patient, RepositoryError> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::PatientNotFound(id))
    }

    /// Case-insensitive name match, or CPF digits substring. A blank query
    /// returns every patient.
    pub fn search_patients(&self, query: &str) -> Vec<&Patient> {
        let query = query.trim();
        if query.is_empty() {
            return self.patients.iter().collect();
        }
        let needle = query.to_lowercase();
        let digits = digits_only(query);
        self.patients
            .iter()
            .filter(|p| {
                p.details.name.to_lowercase().contains(&needle)
                    || (!digits.is_empty() && p.details.cpf.contains(&digits))
            })
            .collect()
    }

    pub async fn create_patient(
        &mut self,
        details: PatientDetails,
    ) -> Result<Patient, RepositoryError> {
        let now = Timestamp::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            owner_id: self.owner_id,
            details,
            current_status: TreatmentStatus::default(),
            created_at: now,
            updated_at: now,
        };
        save_json(
            &self.store,
            &storage_keys::patient(self.owner_id, patient.id),
            &patient,
        )
        .await?;

        info!(patient_id = %patient.id, "patient created");
        AuditEvent::new(AuditAction::Create, "patient", patient.id, self.owner_id).emit();

        self.refresh().await?;
        self.get_patient(patient.id).cloned()
    }

    /// Replace the editable fields. Status and creation time are preserved.
    pub async fn update_patient(
        &mut self,
        id: Uuid,
        details: PatientDetails,
    ) -> Result<Patient, RepositoryError> {
        let key = storage_keys::patient(self.owner_id, id);
        let mut patient: Patient = load_json(&self.store, &key)
            .await
            .map_err(|e| not_found_as(e, RepositoryError::PatientNotFound(id)))?;

        patient.details = details;
        patient.updated_at = Timestamp::now();
        save_json(&self.store, &key, &patient).await?;

        info!(patient_id = %id, "patient updated");
        AuditEvent::new(AuditAction::Update, "patient", id, self.owner_id).emit();

        self.refresh().await?;
        self.get_patient(id).cloned()
    }

    /// Hard delete with cascade: attachments, sessions, status history, and
    /// finally the patient row. Each stage only runs when the previous one
    /// removed everything.
    pub async fn delete_patient(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        let key = storage_keys::patient(self.owner_id, id);
        let _: Patient = load_json(&self.store, &key)
            .await
            .map_err(|e| not_found_as(e, RepositoryError::PatientNotFound(id)))?;

        let sessions: Vec<Session> =
            load_all(&self.store, &storage_keys::sessions_prefix(self.owner_id)).await?;

        let session_ids: Vec<Uuid> = sessions
            .iter()
            .filter(|s| s.patient_id == id)
            .map(|s| s.id)
            .collect();

        let mut failed = Vec::new();
        for session_id in session_ids {
            failed.extend(self.delete_session_tree(session_id).await?);
        }

        if failed.is_empty() {
            let history = self
                .store
                .list(&storage_keys::status_history_prefix(self.owner_id, id))
                .await?;
            for entry in history {
                if let Err(e) = self.store.delete(&entry).await {
                    warn!(key = %entry, error = %e, "failed to delete status history entry");
                    failed.push(entry);
                }
            }
        }

        if !failed.is_empty() {
            warn!(patient_id = %id, failed = failed.len(), "patient delete incomplete");
            self.refresh().await?;
            return Err(RepositoryError::PartialDelete {
                resource: "patient",
                id,
                failed,
            });
        }

        self.store.delete(&key).await?;

        info!(patient_id = %id, "patient deleted");
        AuditEvent::new(AuditAction::Delete, "patient", id, self.owner_id).emit();

        self.refresh().await
    }

    // ── Status history ───────────────────────────────────────────

    /// Append one history entry and move `current_status` to it.
    pub async fn change_status(
        &mut self,
        patient_id: Uuid,
        status: TreatmentStatus,
        reason: &str,
        notes: Option<String>,
    ) -> Result<StatusChange, RepositoryError> {
        let key = storage_keys::patient(self.owner_id, patient_id);
        let mut patient: Patient = load_json(&self.store, &key)
            .await
            .map_err(|e| not_found_as(e, RepositoryError::PatientNotFound(patient_id)))?;

        if patient.current_status == status {
            return Err(RepositoryError::StatusUnchanged);
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(RepositoryError::MissingReason);
        }

        let now = Timestamp::now();
        let change = StatusChange {
            id: Uuid::new_v4(),
            patient_id,
            owner_id: self.owner_id,
            status,
            reason: reason.to_string(),
            notes: notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            changed_at: now,
            changed_by: self.owner_id,
        };
        save_json(
            &self.store,
            &storage_keys::status_change(self.owner_id, patient_id, change.id),
            &change,
        )
        .await?;

        let previous = patient.current_status;
        patient.current_status = status;
        patient.updated_at = now;
        save_json(&self.store, &key, &patient).await?;

        info!(
            patient_id = %patient_id,
            from = previous.label(),
            to = status.label(),
            "treatment status changed"
        );
        AuditEvent::new(AuditAction::StatusChange, "patient", patient_id, self.owner_id)
            .with_details(serde_json::json!({ "from": previous, "to": status }))
            .emit();

        self.refresh().await?;
        Ok(change)
    }

    /// History entries, newest first.
    pub async fn status_history(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<StatusChange>, RepositoryError> {
        self.get_patient(patient_id)?;
        let mut entries: Vec<StatusChange> = load_all(
            &self.store,
            &storage_keys::status_history_prefix(self.owner_id, patient_id),
        )
        .await?;
        entries.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        Ok(entries)
    }

    // ── Sessions ─────────────────────────────────────────────────

    /// Every session of the owner, newest first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Sessions of one patient, newest first.
    pub fn sessions_for(&self, patient_id: Uuid) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.patient_id == patient_id)
            .collect()
    }

    pub fn get_session(&self, id: Uuid) -> Result<&Session, RepositoryError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::SessionNotFound(id))
    }

    pub async fn create_session(
        &mut self,
        patient_id: Uuid,
        details: SessionDetails,
    ) -> Result<Session, RepositoryError> {
        let _: Patient = load_json(
            &self.store,
            &storage_keys::patient(self.owner_id, patient_id),
        )
        .await
        .map_err(|e| not_found_as(e, RepositoryError::PatientNotFound(patient_id)))?;

        let now = Timestamp::now();
        let session = Session {
            id: Uuid::new_v4(),
            patient_id,
            owner_id: self.owner_id,
            details,
            created_at: now,
            updated_at: now,
        };
        save_json(
            &self.store,
            &storage_keys::session(self.owner_id, session.id),
            &session,
        )
        .await?;

        info!(
            session_id = %session.id,
            patient_id = %patient_id,
            session_type = session.session_type().label(),
            "session created"
        );
        AuditEvent::new(AuditAction::Create, "session", session.id, self.owner_id).emit();

        self.refresh().await?;
        self.get_session(session.id).cloned()
    }

    pub async fn update_session(
        &mut self,
        id: Uuid,
        details: SessionDetails,
    ) -> Result<Session, RepositoryError> {
        let key = storage_keys::session(self.owner_id, id);
        let mut session: Session = load_json(&self.store, &key)
            .await
            .map_err(|e| not_found_as(e, RepositoryError::SessionNotFound(id)))?;

        session.details = details;
        session.updated_at = Timestamp::now();
        save_json(&self.store, &key, &session).await?;

        info!(session_id = %id, "session updated");
        AuditEvent::new(AuditAction::Update, "session", id, self.owner_id).emit();

        self.refresh().await?;
        self.get_session(id).cloned()
    }

    /// Deletes the session's documents first; the session row is kept if
    /// any of them cannot be removed.
    pub async fn delete_session(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        let _: Session = load_json(&self.store, &storage_keys::session(self.owner_id, id))
            .await
            .map_err(|e| not_found_as(e, RepositoryError::SessionNotFound(id)))?;

        let failed = self.delete_session_tree(id).await?;
        self.refresh().await?;

        if !failed.is_empty() {
            return Err(RepositoryError::PartialDelete {
                resource: "session",
                id,
                failed,
            });
        }

        info!(session_id = %id, "session deleted");
        AuditEvent::new(AuditAction::Delete, "session", id, self.owner_id).emit();
        Ok(())
    }

    /// Removes a session's blobs, document rows, and the session row, in that
    /// order. Returns the keys that could not be removed; the session row is
    /// only touched when every document went.
    async fn delete_session_tree(&self, session_id: Uuid) -> Result<Vec<String>, StorageError> {
        let documents: Vec<SessionDocument> = load_all(
            &self.store,
            &storage_keys::documents_prefix(self.owner_id, session_id),
        )
        .await?;

        let mut failed = Vec::new();
        for document in &documents {
            if let Err(key) = self.remove_document(document).await {
                failed.push(key);
            }
        }

        if failed.is_empty() {
            let key = storage_keys::session(self.owner_id, session_id);
            if let Err(e) = self.store.delete(&key).await {
                warn!(key = %key, error = %e, "failed to delete session");
                failed.push(key);
            }
        }
        Ok(failed)
    }

    /// Blob first, then the row. On failure returns the key that stuck.
    async fn remove_document(&self, document: &SessionDocument) -> Result<(), String> {
        if let Err(e) = self.store.delete(&document.file_path).await {
            warn!(key = %document.file_path, error = %e, "failed to delete attachment");
            return Err(document.file_path.clone());
        }
        let row = storage_keys::document(self.owner_id, document.session_id, document.id);
        if let Err(e) = self.store.delete(&row).await {
            warn!(key = %row, error = %e, "failed to delete document row");
            return Err(row);
        }
        Ok(())
    }

    // ── Documents ────────────────────────────────────────────────

    /// Documents of a session, newest first.
    pub async fn list_documents(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<SessionDocument>, RepositoryError> {
        self.get_session(session_id)?;
        let mut documents: Vec<SessionDocument> = load_all(
            &self.store,
            &storage_keys::documents_prefix(self.owner_id, session_id),
        )
        .await?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    /// Store the file, then its metadata row.
    pub async fn upload_document(
        &mut self,
        session_id: Uuid,
        attachment: PendingAttachment,
    ) -> Result<SessionDocument, RepositoryError> {
        if attachment.bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(RepositoryError::AttachmentTooLarge {
                file_name: attachment.file_name,
                size: attachment.bytes.len(),
                limit: MAX_ATTACHMENT_BYTES,
            });
        }
        self.get_session(session_id)?;

        let now = Timestamp::now();
        let millis = self.next_upload_millis(now);
        let file_path = storage_keys::document_file(
            self.owner_id,
            session_id,
            millis,
            &attachment.extension(),
        );
        let document = SessionDocument {
            id: Uuid::new_v4(),
            session_id,
            owner_id: self.owner_id,
            document_type: attachment.document_type,
            description: attachment.resolved_description(),
            file_path,
            created_at: now,
        };

        self.store
            .put(
                &document.file_path,
                attachment.bytes,
                attachment.content_type.as_deref(),
            )
            .await?;
        save_json(
            &self.store,
            &storage_keys::document(self.owner_id, session_id, document.id),
            &document,
        )
        .await?;

        info!(
            document_id = %document.id,
            session_id = %session_id,
            document_type = document.document_type.label(),
            "document uploaded"
        );
        AuditEvent::new(AuditAction::Upload, "document", document.id, self.owner_id).emit();
        Ok(document)
    }

    /// Upload queued attachments one at a time. A failed file is recorded
    /// and the rest still go.
    pub async fn flush_attachments(
        &mut self,
        session_id: Uuid,
        attachments: Vec<PendingAttachment>,
    ) -> UploadReport {
        let mut report = UploadReport::default();
        for attachment in attachments {
            let file_name = attachment.file_name.clone();
            match self.upload_document(session_id, attachment).await {
                Ok(document) => report.uploaded.push(document),
                Err(error) => {
                    warn!(file_name = %file_name, error = %error, "attachment upload failed");
                    report.failed.push(FailedUpload { file_name, error });
                }
            }
        }
        report
    }

    pub async fn download_document(
        &self,
        session_id: Uuid,
        document_id: Uuid,
    ) -> Result<(SessionDocument, StoredObject), RepositoryError> {
        let document = self.load_document(session_id, document_id).await?;
        let object = self.store.get(&document.file_path).await?;
        AuditEvent::new(AuditAction::Download, "document", document_id, self.owner_id).emit();
        Ok((document, object))
    }

    pub async fn delete_document(
        &mut self,
        session_id: Uuid,
        document_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let document = self.load_document(session_id, document_id).await?;
        self.store.delete(&document.file_path).await?;
        self.store
            .delete(&storage_keys::document(self.owner_id, session_id, document_id))
            .await?;

        info!(document_id = %document_id, "document deleted");
        AuditEvent::new(AuditAction::Delete, "document", document_id, self.owner_id).emit();
        Ok(())
    }

    async fn load_document(
        &self,
        session_id: Uuid,
        document_id: Uuid,
    ) -> Result<SessionDocument, RepositoryError> {
        load_json(
            &self.store,
            &storage_keys::document(self.owner_id, session_id, document_id),
        )
        .await
        .map_err(|e| not_found_as(e, RepositoryError::DocumentNotFound(document_id)))
    }

    /// Milliseconds for the next blob key. Strictly increasing per repository.
    fn next_upload_millis(&mut self, now: Timestamp) -> i64 {
        let millis = now.as_millisecond().max(self.last_upload_millis + 1);
        self.last_upload_millis = millis;
        millis
    }

    // ── Profile ──────────────────────────────────────────────────

    /// Last profile read or written through this repository.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub async fn get_profile(&mut self) -> Result<Profile, RepositoryError> {
        let profile: Profile = load_json(&self.store, &storage_keys::profile(self.owner_id))
            .await
            .map_err(|e| not_found_as(e, RepositoryError::ProfileNotFound))?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Creates the profile on first use.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<Profile, RepositoryError> {
        let key = storage_keys::profile(self.owner_id);
        let now = Timestamp::now();
        let existing: Option<Profile> = match load_json(&self.store, &key).await {
            Ok(profile) => Some(profile),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        let profile = Profile {
            id: self.owner_id,
            full_name: update.full_name.trim().to_string(),
            crp: update.crp.trim().to_string(),
            email: update.email.filter(|e| !e.trim().is_empty()),
            phone: update.phone.filter(|p| !p.trim().is_empty()),
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        };
        save_json(&self.store, &key, &profile).await?;

        info!("profile updated");
        AuditEvent::new(AuditAction::Update, "profile", self.owner_id, self.owner_id).emit();

        self.get_profile().await
    }

    // ── Summary ──────────────────────────────────────────────────

    pub fn summary(&self) -> PracticeSummary {
        PracticeSummary {
            total_patients: self.patients.len(),
            active_patients: self
                .patients
                .iter()
                .filter(|p| p.current_status == TreatmentStatus::Active)
                .count(),
            total_sessions: self.sessions.len(),
            latest_session: self.sessions.first().map(|s| s.details.date),
        }
    }
}

fn chronological_key(session: &Session) -> (Date, jiff::civil::Time, Timestamp) {
    (
        session.details.date,
        session.details.time,
        session.created_at,
    )
}

fn not_found_as(err: StorageError, not_found: RepositoryError) -> RepositoryError {
    if err.is_not_found() {
        not_found
    } else {
        RepositoryError::Storage(err)
    }
}
