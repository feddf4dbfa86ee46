#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{TypeToken, map_sql_type};

/// A column exactly as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ColumnDef {
    pub name: String,
    /// SQL type name as stored in `information_schema` (e.g. `varchar`,
    /// `character varying`, `timestamp without time zone`).
    pub raw_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>, primary_key: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            primary_key,
        }
    }

    /// Ecto type for this column's raw SQL type.
    pub fn type_token(&self) -> TypeToken {
        map_sql_type(&self.raw_type)
    }

    /// Association name when the column is a `*_id` foreign key.
    ///
    /// `customer_id` yields `customer`; `id` and `_id` yield nothing.
    pub fn association_name(&self) -> Option<&str> {
        self.name
            .strip_suffix("_id")
            .filter(|trimmed| !trimmed.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("customer_id", Some("customer"))]
    #[case("parent_order_id", Some("parent_order"))]
    #[case("id", None)]
    #[case("_id", None)]
    #[case("identifier", None)]
    #[case("paid", None)]
    fn association_name_from_suffix(#[case] name: &str, #[case] expected: Option<&str>) {
        let column = ColumnDef::new(name, "int", false);
        assert_eq!(column.association_name(), expected);
    }

    #[test]
    fn type_token_uses_raw_type() {
        assert_eq!(ColumnDef::new("email", "varchar", false).type_token(), TypeToken::String);
        assert_eq!(ColumnDef::new("age", "INT", false).type_token(), TypeToken::Integer);
    }

    #[test]
    fn primary_key_defaults_to_false_when_missing() {
        let column: ColumnDef =
            serde_json::from_str(r#"{"name": "email", "raw_type": "text"}"#).unwrap();
        assert!(!column.primary_key);
    }
}
