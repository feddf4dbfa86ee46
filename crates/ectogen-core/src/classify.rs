use ectogen_naming::{module_name, qualified_module, singularize, split_namespace};

use crate::schema::{ColumnDef, TableDef};
use crate::types::TypeToken;

/// Ecto's default name for the insertion timestamp.
pub const ECTO_INSERTED_AT: &str = "inserted_at";
/// Column name treated as the update timestamp.
pub const ECTO_UPDATED_AT: &str = "updated_at";
/// Alternative insertion timestamp name recognised when no override is set.
pub const CREATED_AT: &str = "created_at";

/// Options that drive naming and type resolution for every table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapOptions {
    /// Application module, e.g. `MyApp`.
    pub app: String,
    /// Table-name prefixes that become module namespaces.
    pub prefixes: Vec<String>,
    /// Association names that never inherit the owning table's namespace.
    pub not_prefixes: Vec<String>,
    /// Column name used for the insertion timestamp.
    pub inserted_at: Option<String>,
    /// Ecto type used instead of `:naive_datetime`.
    pub datetime_type: Option<String>,
}

impl MapOptions {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            ..Default::default()
        }
    }

    fn datetime_token(&self) -> Option<TypeToken> {
        self.datetime_type
            .as_ref()
            .map(|atom| TypeToken::Custom(atom.clone()))
    }

    fn resolve_token(&self, token: TypeToken) -> TypeToken {
        if token.is_datetime() {
            self.datetime_token().unwrap_or(token)
        } else {
            token
        }
    }

    fn is_inserted_at(&self, column: &str) -> bool {
        match &self.inserted_at {
            Some(name) => column == name,
            None => column == ECTO_INSERTED_AT || column == CREATED_AT,
        }
    }

    /// Fully-qualified module referenced by a `belongs_to` association.
    ///
    /// The association is namespaced only when it starts with the same
    /// configured prefix as its table and that prefix is not listed in
    /// `not_prefixes`. Otherwise the whole trimmed name becomes the module.
    pub fn association_module(&self, association: &str, table_prefix: Option<&str>) -> String {
        match split_namespace(association, &self.prefixes) {
            (Some(prefix), bare)
                if table_prefix == Some(prefix)
                    && !self.not_prefixes.iter().any(|n| n == prefix) =>
            {
                qualified_module(&self.app, Some(prefix), &module_name(bare))
            }
            _ => qualified_module(&self.app, None, &module_name(association)),
        }
    }
}

/// How the generated schema declares its primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    /// Ecto's implicit `:id` key; nothing is emitted.
    Default,
    /// `@primary_key false`: no key or a composite key.
    None,
    /// Single non-`id` key column.
    Custom { name: String, token: TypeToken },
}

/// `timestamps(...)` arguments derived from the timestamp columns present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamps {
    /// Insertion column passed as `inserted_at:`; `None` keeps Ecto's default.
    pub inserted_at: Option<String>,
    pub updated_at: bool,
    pub token: Option<TypeToken>,
}

impl Timestamps {
    /// Keyword options for `timestamps/1`, empty for Ecto's defaults.
    pub fn options(&self) -> Vec<String> {
        let mut opts = Vec::new();
        if let Some(name) = self.inserted_at.as_deref()
            && name != ECTO_INSERTED_AT
        {
            opts.push(format!("inserted_at: :{name}"));
        }
        if !self.updated_at {
            opts.push("updated_at: false".to_string());
        }
        if let Some(token) = &self.token {
            opts.push(format!("type: {token}"));
        }
        opts
    }
}

/// A single line inside the `schema` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Field {
        name: String,
        token: TypeToken,
        primary_key: bool,
    },
    BelongsTo {
        name: String,
        foreign_key: String,
        module: String,
        /// Key type when it is not the default `:id`.
        token: Option<TypeToken>,
        primary_key: bool,
    },
    Timestamps(Timestamps),
}

impl Declaration {
    /// Column that the changeset should cast, if any.
    pub fn cast_column(&self) -> Option<&str> {
        match self {
            Declaration::Field { name, .. } => Some(name.as_str()),
            Declaration::BelongsTo { foreign_key, .. } => Some(foreign_key.as_str()),
            Declaration::Timestamps(_) => None,
        }
    }
}

/// Everything the renderer needs for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDef {
    pub table: String,
    /// Fully-qualified module, e.g. `MyApp.Crm.Order`.
    pub module: String,
    pub namespace: Option<String>,
    /// Singular snake_case name used for the file and changeset variable.
    pub file_stem: String,
    pub primary_key: PrimaryKey,
    pub declarations: Vec<Declaration>,
}

impl SchemaDef {
    pub fn cast_columns(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .filter_map(Declaration::cast_column)
            .collect()
    }
}

/// Classify every column of `table` into schema declarations.
pub fn classify_table(table: &TableDef, options: &MapOptions) -> SchemaDef {
    let (namespace, bare) = split_namespace(&table.name, &options.prefixes);
    let primary_key = primary_key_of(table, options);
    let composite = table.primary_key_columns().len() > 1;

    let mut declarations = Vec::new();
    let mut inserted_at = None;
    let mut updated_at = false;

    for column in &table.columns {
        if column.name == "id" {
            continue;
        }
        if let PrimaryKey::Custom { name, .. } = &primary_key
            && *name == column.name
        {
            continue;
        }
        if options.is_inserted_at(&column.name) {
            inserted_at = Some(column.name.clone());
            continue;
        }
        if column.name == ECTO_UPDATED_AT {
            updated_at = true;
            continue;
        }
        declarations.push(classify_column(column, composite, namespace, options));
    }

    if inserted_at.is_some() || updated_at {
        declarations.push(Declaration::Timestamps(Timestamps {
            inserted_at: inserted_at.or_else(|| options.inserted_at.clone()),
            updated_at,
            token: options.datetime_token(),
        }));
    }

    SchemaDef {
        table: table.name.clone(),
        module: qualified_module(&options.app, namespace, &module_name(bare)),
        namespace: namespace.map(str::to_string),
        file_stem: singularize(bare),
        primary_key,
        declarations,
    }
}

fn primary_key_of(table: &TableDef, options: &MapOptions) -> PrimaryKey {
    match table.primary_key_columns().as_slice() {
        [] if table.has_column("id") => PrimaryKey::Default,
        ["id"] => PrimaryKey::Default,
        [single] => {
            let token = table
                .column(single)
                .map(|c| options.resolve_token(c.type_token()))
                .unwrap_or(TypeToken::Integer);
            PrimaryKey::Custom {
                name: (*single).to_string(),
                token,
            }
        }
        _ => PrimaryKey::None,
    }
}

fn classify_column(
    column: &ColumnDef,
    composite: bool,
    table_prefix: Option<&str>,
    options: &MapOptions,
) -> Declaration {
    let token = options.resolve_token(column.type_token());
    let primary_key = composite && column.primary_key;

    match column.association_name() {
        Some(association) => Declaration::BelongsTo {
            name: association.to_string(),
            foreign_key: column.name.clone(),
            module: options.association_module(association, table_prefix),
            token: (token != TypeToken::Integer).then_some(token),
            primary_key,
        },
        None => Declaration::Field {
            name: column.name.clone(),
            token,
            primary_key,
        },
    }
}
