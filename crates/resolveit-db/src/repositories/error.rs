//! Error handling utilities for repositories

use resolveit_core::error::DomainError;
use resolveit_core::value_objects::ComplaintId;
use sqlx::Error as SqlxError;

/// PostgreSQL `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Treat a missing table as absent configuration rather than a failure
pub fn map_missing_table(e: SqlxError, table: &str) -> DomainError {
    let undefined = e
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNDEFINED_TABLE);
    if undefined {
        DomainError::ConfigurationAbsent(format!("table {table} does not exist"))
    } else {
        map_db_error(e)
    }
}

/// Create a "complaint not found" error
pub fn complaint_not_found(id: ComplaintId) -> DomainError {
    DomainError::ComplaintNotFound(id)
}
