//! SeaORM -> DomainError translation helpers.
//!
//! Adapters should convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers can then map `DomainError` to `AppError` via `From`.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    // SQLite format: "UNIQUE constraint failed: table.column"
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        // Take up to the end or first space/newline/quote
        let table_column = rest
            .split_whitespace()
            .next()
            .or_else(|| rest.split('\n').next())
            .or_else(|| rest.split('"').next());
        return table_column;
    }
    None
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "users.username" => Some((ConflictKind::UniqueUsername, "Username already exists")),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("users_username_key") {
        return Some((ConflictKind::UniqueUsername, "Username already exists"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            // Generic record not found
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");

        // Try to extract table.column from SQLite format errors first
        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        // Fall back to PostgreSQL constraint names
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("UniqueViolation".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("violates foreign key constraint")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("FkViolation".into()),
            "Related record is missing or still referenced",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation("Value rejected by a database check constraint");
    }

    warn!(trace_id = %trace_id, raw_error = %error_msg, "Unclassified database error");
    DomainError::infra(InfraErrorKind::Other("DbError".into()), "Database error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_unique_username_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "Query Error: UNIQUE constraint failed: users.username".to_string(),
        );
        let mapped = map_db_err(err);
        assert_eq!(
            mapped,
            DomainError::Conflict(
                ConflictKind::UniqueUsername,
                "Username already exists".to_string()
            )
        );
    }

    #[test]
    fn postgres_unique_username_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
        );
        let mapped = map_db_err(err);
        assert_eq!(
            mapped,
            DomainError::Conflict(
                ConflictKind::UniqueUsername,
                "Username already exists".to_string()
            )
        );
    }

    #[test]
    fn unknown_unique_violation_falls_back_to_generic_conflict() {
        let err =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: widgets.serial_no".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("users.id not found".to_string());
        assert!(matches!(map_db_err(err), DomainError::NotFound(_, _)));
    }

    #[test]
    fn fk_violation_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom("FOREIGN KEY constraint failed".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }
}
