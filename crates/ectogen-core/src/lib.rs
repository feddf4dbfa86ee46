pub mod classify;
pub mod schema;
pub mod types;

pub use classify::{Declaration, MapOptions, PrimaryKey, SchemaDef, Timestamps, classify_table};
pub use schema::{ColumnDef, TableDef};
pub use types::{TypeToken, map_sql_type, normalize_sql_type};
