//! Conversation and message storage for the analytics pipeline.

use sqlx::SqlitePool;

use crate::models::{Conversation, Message};
use crate::Result;

/// Ensure a conversation row exists. Safe to call on every message;
/// re-inserting an existing id is a no-op.
pub async fn ensure_conversation(
    pool: &SqlitePool,
    id: &str,
    widget_id: &str,
    user_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO conversations (id, widget_id, user_id)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(widget_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a conversation by id.
pub async fn get_conversation(pool: &SqlitePool, id: &str) -> Result<Option<Conversation>> {
    let record = sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, widget_id, user_id, started_at
        FROM conversations
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Append one message to a conversation.
pub async fn append_message(
    pool: &SqlitePool,
    conversation_id: &str,
    sender: &str,
    text: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO messages (conversation_id, sender, text)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(conversation_id)
    .bind(sender)
    .bind(text)
    .execute(pool)
    .await?;

    Ok(())
}

/// List a conversation's messages in insertion order.
pub async fn list_messages(pool: &SqlitePool, conversation_id: &str) -> Result<Vec<Message>> {
    let records = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, conversation_id, sender, text, created_at
        FROM messages
        WHERE conversation_id = ?
        ORDER BY id
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_org, seed_widget, test_db};

    #[tokio::test]
    async fn test_conversation_and_messages() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        ensure_conversation(db.pool(), "c-1", "w-1", "visitor-1").await.unwrap();
        // Idempotent on repeat.
        ensure_conversation(db.pool(), "c-1", "w-1", "visitor-1").await.unwrap();

        append_message(db.pool(), "c-1", "user", "Hej").await.unwrap();
        append_message(db.pool(), "c-1", "assistant", "Hej! Hvordan kan jeg hjælpe?")
            .await
            .unwrap();

        let conversation = get_conversation(db.pool(), "c-1").await.unwrap().unwrap();
        assert_eq!(conversation.widget_id, "w-1");

        let messages = list_messages(db.pool(), "c-1").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "user");
        assert_eq!(messages[1].sender, "assistant");
    }

    #[tokio::test]
    async fn test_missing_conversation_is_none() {
        let db = test_db().await;
        assert!(get_conversation(db.pool(), "nope").await.unwrap().is_none());
    }
}
