// service/src/db/mod.rs

//! PostgreSQL-backed `ShopcartStore`.

pub mod postgres;
pub mod schema;

pub use postgres::PgShopcartStore;
pub use schema::init_schema;
