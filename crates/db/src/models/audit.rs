//! Audit log entity model and DTO.
//!
//! Append-only records of mutating engine calls. Audit logs have no
//! `updated_at` field (immutable records). Writing is best-effort: a
//! failed audit insert is logged, never propagated to the caller.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use casabook_core::types::{DbId, Timestamp};

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub action_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_role: Option<String>,
    pub details_json: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditLog {
    pub action_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_role: Option<String>,
    pub details_json: Option<serde_json::Value>,
}
