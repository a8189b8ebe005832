//! Database query functions organized by domain.

pub mod pois;
pub mod progress;
pub mod routes;
pub mod submissions;
pub mod teams;
pub mod users;

use std::str::FromStr;

use hunt_types::UnknownVariant;

/// Convert a stored TEXT enum column into its typed form, surfacing an
/// unknown value as a rusqlite conversion failure at that column.
pub(crate) fn parse_enum<T>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    value.parse().map_err(|e: UnknownVariant| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}
