//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tenant organization owning widgets and users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Organization {
    /// Opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Billing plan slug (e.g. "starter", "business").
    pub plan: String,
    /// Widgets this organization may create.
    pub widget_limit: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// An admin console operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Opaque identifier.
    pub id: String,
    /// Login email, unique.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role within the organization ("owner", "admin", "member").
    pub role: String,
    /// Home organization.
    pub organization_id: String,
    /// Organization currently selected in the console, if switched.
    pub active_organization_id: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// A stored widget: metadata columns plus the whole configuration document
/// as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WidgetRecord {
    /// Opaque identifier, immutable once created.
    pub id: String,
    /// Owning organization.
    pub organization_id: String,
    /// Display name (duplicated from the document for listing queries).
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// "active" or "inactive".
    pub status: String,
    /// Demo widgets are usage-limited and expiring.
    pub is_demo: bool,
    /// Expiry timestamp for demo widgets.
    pub demo_expires_at: Option<String>,
    /// Allowed respond calls for demo widgets.
    pub demo_usage_limit: Option<i64>,
    /// Respond calls consumed so far.
    pub demo_usage_count: i64,
    /// The full WidgetConfig document as JSON.
    pub config: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last whole-document replacement.
    pub updated_at: String,
}

impl WidgetRecord {
    /// Whether a demo widget may still answer at the given time.
    ///
    /// Timestamps are `datetime('now')` strings, which compare
    /// lexicographically. Non-demo widgets are never blocked.
    pub fn demo_blocked(&self, now: &str) -> bool {
        if !self.is_demo {
            return false;
        }
        if let Some(expires_at) = &self.demo_expires_at {
            if now >= expires_at.as_str() {
                return true;
            }
        }
        if let Some(limit) = self.demo_usage_limit {
            if self.demo_usage_count >= limit {
                return true;
            }
        }
        false
    }
}

/// One entry in the GDPR audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Who performed the action (user id or "system").
    pub actor: String,
    /// Action slug, e.g. "widget.update".
    pub action: String,
    /// Entity kind, e.g. "widget".
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: String,
    /// Free-form context.
    pub details: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A support request or manual review ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Opaque identifier.
    pub id: String,
    /// Widget the conversation belonged to.
    pub widget_id: String,
    /// Source conversation, if known.
    pub conversation_id: Option<String>,
    /// Short summary shown in the triage list.
    pub subject: String,
    /// The end user's own words.
    pub user_message: String,
    /// Contact address left by the end user.
    pub contact_email: String,
    /// Workflow status, see `TicketStatus`.
    pub status: String,
    /// Operator notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last status change or note edit.
    pub updated_at: String,
}

/// A stored conversation between an end user and a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: String,
    pub widget_id: String,
    pub user_id: String,
    pub started_at: String,
}

/// One message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Auto-incrementing ID.
    pub id: i64,
    pub conversation_id: String,
    /// "user" or "assistant".
    pub sender: String,
    pub text: String,
    pub created_at: String,
}

/// A stored console preference (sidebar state, consent flags, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub user_id: String,
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
