//! Support ticket queries

use shared::models::{SupportTicket, TicketMessage};
use sqlx::PgPool;

/// Open a ticket with its first message in one transaction.
pub async fn create_with_message(
    pool: &PgPool,
    ticket_id: &str,
    tenant_id: &str,
    opened_by: &str,
    subject: &str,
    body: &str,
    now: i64,
) -> Result<SupportTicket, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let ticket: SupportTicket = sqlx::query_as(
        "INSERT INTO support_tickets (id, tenant_id, opened_by, subject, status,
                                      created_at, updated_at)
         VALUES ($1, $2, $3, $4, 'open', $5, $5)
         RETURNING *",
    )
    .bind(ticket_id)
    .bind(tenant_id)
    .bind(opened_by)
    .bind(subject)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO ticket_messages (id, ticket_id, author_id, from_admin, body, created_at)
         VALUES ($1, $2, $3, FALSE, $4, $5)",
    )
    .bind(crate::util::new_id())
    .bind(ticket_id)
    .bind(opened_by)
    .bind(body)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(ticket)
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    ticket_id: &str,
) -> Result<Option<SupportTicket>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM support_tickets WHERE id = $1 AND tenant_id = $2")
        .bind(ticket_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Admin-side lookup, unscoped.
pub async fn find_any(
    pool: &PgPool,
    ticket_id: &str,
) -> Result<Option<SupportTicket>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM support_tickets WHERE id = $1")
        .bind(ticket_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_tenant(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Vec<SupportTicket>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM support_tickets WHERE tenant_id = $1 ORDER BY updated_at DESC")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

/// Admin queue, optionally filtered by status.
pub async fn list_all(
    pool: &PgPool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<SupportTicket>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as(
                "SELECT * FROM support_tickets WHERE status = $1
                 ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
            )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM support_tickets ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn count_all(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = match status {
        Some(status) => {
            sqlx::query_as("SELECT COUNT(*) FROM support_tickets WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM support_tickets")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}

pub async fn messages(pool: &PgPool, ticket_id: &str) -> Result<Vec<TicketMessage>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM ticket_messages WHERE ticket_id = $1 ORDER BY created_at")
        .bind(ticket_id)
        .fetch_all(pool)
        .await
}

/// Append a message and move the ticket to `new_status` atomically.
/// Tenant replies reopen answered tickets; admin replies mark them answered.
pub async fn add_message(
    pool: &PgPool,
    ticket_id: &str,
    author_id: &str,
    from_admin: bool,
    body: &str,
    new_status: &str,
    now: i64,
) -> Result<TicketMessage, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let message: TicketMessage = sqlx::query_as(
        "INSERT INTO ticket_messages (id, ticket_id, author_id, from_admin, body, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(crate::util::new_id())
    .bind(ticket_id)
    .bind(author_id)
    .bind(from_admin)
    .bind(body)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE support_tickets SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(new_status)
        .bind(now)
        .bind(ticket_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(message)
}

pub async fn set_status(
    pool: &PgPool,
    ticket_id: &str,
    status: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE support_tickets SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status)
            .bind(now)
            .bind(ticket_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
