use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    StatusChange,
    Upload,
    Download,
    Export,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::StatusChange => "status_change",
            AuditAction::Upload => "upload",
            AuditAction::Download => "download",
            AuditAction::Export => "export",
        }
    }
}

/// A structured audit event.
///
/// Emitted through `tracing` as a single JSON log line so it lands next to
/// the request log. Clinical content never goes in here, only identifiers.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: &'static str,
    pub resource_id: String,
    pub user_id: Uuid,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: &'static str,
        resource_id: impl ToString,
        user_id: Uuid,
    ) -> Self {
        Self {
            action,
            resource_type,
            resource_id: resource_id.to_string(),
            user_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.resource_type = self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_id = %self.user_id,
            audit.details = %details,
            "audit event"
        );
    }
}
