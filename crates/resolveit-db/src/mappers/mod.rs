//! Entity to model mappers
//!
//! Conversions between domain entities (resolveit-core) and database models.
//! - `TryFrom<Model> for Entity`: rows carry enums as text, which must parse
//! - `*Insert` structs: prepare entity data for database writes

mod complaint;
mod escalation_rule;
mod user;

use std::str::FromStr;

use resolveit_core::error::DomainError;

pub use complaint::ComplaintInsert;

/// Parse a text column into a closed vocabulary
pub(crate) fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::DatabaseError(format!("unexpected value {value:?} in {column}")))
}

/// Convert a batch of rows, failing on the first bad one
pub(crate) fn convert_all<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}
