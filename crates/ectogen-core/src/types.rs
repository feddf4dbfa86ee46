use std::fmt;

use serde::{Deserialize, Serialize};

/// Ecto field type emitted into generated schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeToken {
    Integer,
    Float,
    Decimal,
    Boolean,
    String,
    Binary,
    BinaryId,
    Map,
    Date,
    Time,
    NaiveDatetime,
    /// User-supplied atom, used for the date/time override.
    Custom(String),
}

impl TypeToken {
    /// Atom name without the leading colon.
    pub fn as_str(&self) -> &str {
        match self {
            TypeToken::Integer => "integer",
            TypeToken::Float => "float",
            TypeToken::Decimal => "decimal",
            TypeToken::Boolean => "boolean",
            TypeToken::String => "string",
            TypeToken::Binary => "binary",
            TypeToken::BinaryId => "binary_id",
            TypeToken::Map => "map",
            TypeToken::Date => "date",
            TypeToken::Time => "time",
            TypeToken::NaiveDatetime => "naive_datetime",
            TypeToken::Custom(atom) => atom.trim_start_matches(':'),
        }
    }

    pub fn is_datetime(&self) -> bool {
        matches!(self, TypeToken::NaiveDatetime)
    }
}

/// Renders the Elixir atom literal, e.g. `:string`.
impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.as_str())
    }
}

/// Normalize a raw catalog type: lowercase, trimmed, parameters removed.
///
/// `VARCHAR(255)` becomes `varchar`; `timestamp(6) with time zone` becomes
/// `timestamp with time zone`.
pub fn normalize_sql_type(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut depth = 0usize;
    for ch in lowered.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    let out = out.strip_suffix(" unsigned").unwrap_or(&out).to_string();
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a raw SQL type name to its Ecto type.
///
/// Unknown types fall back to [`TypeToken::String`].
pub fn map_sql_type(raw: &str) -> TypeToken {
    match lookup_sql_type(&normalize_sql_type(raw)) {
        Some(token) => token,
        None => {
            tracing::warn!(sql_type = raw, "unsupported SQL type, falling back to :string");
            TypeToken::String
        }
    }
}

fn lookup_sql_type(normalized: &str) -> Option<TypeToken> {
    let token = match normalized {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "int2" | "int4"
        | "int8" | "serial" | "smallserial" | "bigserial" | "serial2" | "serial4" | "serial8"
        | "year" => TypeToken::Integer,

        "char" | "varchar" | "character" | "character varying" | "bpchar" | "text"
        | "tinytext" | "mediumtext" | "longtext" | "enum" | "set" | "citext" | "name" => {
            TypeToken::String
        }

        "float" | "double" | "double precision" | "real" | "float4" | "float8" | "decimal" => {
            TypeToken::Float
        }

        "numeric" => TypeToken::Decimal,

        "boolean" | "bool" | "bit" => TypeToken::Boolean,

        "date" => TypeToken::Date,

        "time" | "time without time zone" | "time with time zone" | "timetz" => TypeToken::Time,

        "datetime" | "timestamp" | "timestamp without time zone" | "timestamp with time zone"
        | "timestamptz" => TypeToken::NaiveDatetime,

        "json" | "jsonb" => TypeToken::Map,

        "uuid" => TypeToken::BinaryId,

        "binary" | "varbinary" | "blob" | "tinyblob" | "mediumblob" | "longblob" | "bytea" => {
            TypeToken::Binary
        }

        _ => return None,
    };
    Some(token)
}
