/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a health check
/// - `migrations`: embedded migration runner
///
/// Entity models live in the `models` module at the crate root; the sqlx
/// queries over them live in `repo::postgres`.

pub mod migrations;
pub mod pool;
