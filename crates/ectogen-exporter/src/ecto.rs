use std::path::{Path, PathBuf};

use ectogen_core::{Declaration, PrimaryKey, SchemaDef};

/// Extension of generated files.
pub const EXTENSION: &str = "ex";

/// Render a classified table as an Ecto schema module.
pub fn render_schema(schema: &SchemaDef) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("defmodule {} do", schema.module));
    lines.push("  use Ecto.Schema".into());
    lines.push("  import Ecto.Changeset".into());
    lines.push(String::new());

    if let Some(attr) = primary_key_attribute(&schema.primary_key) {
        lines.push(attr);
    }
    lines.push(format!("  schema \"{}\" do", schema.table));
    for declaration in &schema.declarations {
        lines.push(format!("    {}", render_declaration(declaration)));
    }
    lines.push("  end".into());
    lines.push(String::new());

    render_changeset(&mut lines, schema);

    lines.push("end".into());
    lines.push(String::new());

    lines.join("\n")
}

/// Output file for `schema` under `models_dir`, nested by namespace.
pub fn schema_path(models_dir: &Path, schema: &SchemaDef) -> PathBuf {
    let mut path = models_dir.to_path_buf();
    if let Some(namespace) = &schema.namespace {
        path.push(namespace);
    }
    path.push(format!("{}.{}", schema.file_stem, EXTENSION));
    path
}

fn primary_key_attribute(primary_key: &PrimaryKey) -> Option<String> {
    match primary_key {
        PrimaryKey::Default => None,
        PrimaryKey::None => Some("  @primary_key false".into()),
        PrimaryKey::Custom { name, token } => Some(format!(
            "  @primary_key {{:{name}, {token}, autogenerate: false}}"
        )),
    }
}

fn render_declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Field {
            name,
            token,
            primary_key,
        } => {
            let mut line = format!("field :{name}, {token}");
            if *primary_key {
                line.push_str(", primary_key: true");
            }
            line
        }
        Declaration::BelongsTo {
            name,
            module,
            token,
            primary_key,
            ..
        } => {
            let mut line = format!("belongs_to :{name}, {module}");
            if let Some(token) = token {
                line.push_str(&format!(", type: {token}"));
            }
            if *primary_key {
                line.push_str(", primary_key: true");
            }
            line
        }
        Declaration::Timestamps(ts) => format!("timestamps({})", ts.options().join(", ")),
    }
}

fn render_changeset(lines: &mut Vec<String>, schema: &SchemaDef) {
    let var = &schema.file_stem;
    let fields = schema
        .cast_columns()
        .iter()
        .map(|c| format!(":{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    lines.push("  @doc false".into());
    lines.push(format!("  def changeset({var}, attrs) do"));
    lines.push(format!("    {var}"));
    lines.push(format!("    |> cast(attrs, [{fields}])"));
    lines.push("  end".into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ectogen_core::{ColumnDef, MapOptions, TableDef, Timestamps, TypeToken, classify_table};
    use rstest::rstest;

    fn render_table(table: TableDef, options: &MapOptions) -> String {
        render_schema(&classify_table(&table, options))
    }

    #[test]
    fn renders_users_table() {
        let table = TableDef::new(
            "users",
            vec![
                ColumnDef::new("id", "int", true),
                ColumnDef::new("email", "varchar", false),
                ColumnDef::new("created_at", "timestamp", false),
            ],
        );
        let out = render_table(table, &MapOptions::new("MyApp"));
        let expected = "\
defmodule MyApp.User do
  use Ecto.Schema
  import Ecto.Changeset

  schema \"users\" do
    field :email, :string
    timestamps(inserted_at: :created_at, updated_at: false)
  end

  @doc false
  def changeset(user, attrs) do
    user
    |> cast(attrs, [:email])
  end
end
";
        assert_eq!(out, expected);
        assert!(!out.contains("field :id"));
        assert!(!out.contains("belongs_to"));
    }

    #[test]
    fn renders_associations_and_default_timestamps() {
        let table = TableDef::new(
            "order_items",
            vec![
                ColumnDef::new("id", "bigint", true),
                ColumnDef::new("order_id", "bigint", false),
                ColumnDef::new("quantity", "int", false),
                ColumnDef::new("inserted_at", "timestamp", false),
                ColumnDef::new("updated_at", "timestamp", false),
            ],
        );
        let out = render_table(table, &MapOptions::new("Shop"));
        let expected = "\
defmodule Shop.OrderItem do
  use Ecto.Schema
  import Ecto.Changeset

  schema \"order_items\" do
    belongs_to :order, Shop.Order
    field :quantity, :integer
    timestamps()
  end

  @doc false
  def changeset(order_item, attrs) do
    order_item
    |> cast(attrs, [:order_id, :quantity])
  end
end
";
        assert_eq!(out, expected);
    }

    #[test]
    fn renders_custom_primary_key() {
        let table = TableDef::new(
            "countries",
            vec![
                ColumnDef::new("code", "char", true),
                ColumnDef::new("name", "varchar", false),
            ],
        );
        let out = render_table(table, &MapOptions::new("Geo"));
        assert!(out.contains(
            "  @primary_key {:code, :string, autogenerate: false}\n  schema \"countries\" do\n"
        ));
        assert!(!out.contains("field :code"));
    }

    #[test]
    fn renders_composite_primary_key() {
        let table = TableDef::new(
            "memberships",
            vec![
                ColumnDef::new("group_id", "uuid", true),
                ColumnDef::new("member_id", "uuid", true),
                ColumnDef::new("role", "text", false),
            ],
        );
        let out = render_table(table, &MapOptions::new("App"));
        assert!(out.contains("  @primary_key false\n"));
        assert!(out.contains("    belongs_to :group, App.Group, type: :binary_id, primary_key: true\n"));
        assert!(out.contains("    belongs_to :member, App.Member, type: :binary_id, primary_key: true\n"));
        assert!(out.contains("    field :role, :string\n"));
    }

    #[rstest]
    #[case(Declaration::Field { name: "price".into(), token: TypeToken::Decimal, primary_key: false }, "field :price, :decimal")]
    #[case(Declaration::Field { name: "seq".into(), token: TypeToken::Integer, primary_key: true }, "field :seq, :integer, primary_key: true")]
    #[case(Declaration::BelongsTo { name: "owner".into(), foreign_key: "owner_id".into(), module: "App.Owner".into(), token: None, primary_key: false }, "belongs_to :owner, App.Owner")]
    #[case(Declaration::Timestamps(Timestamps { inserted_at: Some("inserted_at".into()), updated_at: true, token: Some(TypeToken::Custom("utc_datetime".into())) }), "timestamps(type: :utc_datetime)")]
    fn renders_declarations(#[case] declaration: Declaration, #[case] expected: &str) {
        assert_eq!(render_declaration(&declaration), expected);
    }

    #[test]
    fn schema_path_uses_singular_name_and_namespace() {
        let options = MapOptions {
            prefixes: vec!["crm".into()],
            ..MapOptions::new("MyApp")
        };
        let plain = classify_table(&TableDef::new("users", vec![]), &options);
        let nested = classify_table(&TableDef::new("crm_contacts", vec![]), &options);
        let root = Path::new("lib/my_app/models");

        assert_eq!(schema_path(root, &plain), Path::new("lib/my_app/models/user.ex"));
        assert_eq!(
            schema_path(root, &nested),
            Path::new("lib/my_app/models/crm/contact.ex")
        );
    }
}
