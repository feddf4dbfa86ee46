use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use ectogen_catalog::{SnapshotCatalog, TableFilter, connect, read_tables};
use ectogen_config::EctogenConfig;
use ectogen_core::{MapOptions, TableDef};

use crate::utils::load_snapshot;

/// Where tables are read from and which of them to keep.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the config file (default: ./ectogen.json when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Repository to read; repeat for several. Defaults to every configured repository.
    #[arg(short = 'r', long = "repo", value_name = "NAME")]
    pub repos: Vec<String>,
    /// Connection URL to read instead of the configured repositories.
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,
    /// Catalog schema for --database-url (MySQL: current database, PostgreSQL: public).
    #[arg(long, value_name = "NAME")]
    pub schema: Option<String>,
    /// Read tables from a JSON snapshot written by `ectogen inspect`.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
    /// Only generate tables matching this regex.
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,
    /// Skip tables matching this regex, even when included.
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,
}

/// Naming and type overrides for generated schemas.
#[derive(Args, Debug, Clone, Default)]
pub struct NamingArgs {
    /// Application module owning the schemas, e.g. MyApp.
    #[arg(short = 'a', long, value_name = "MODULE")]
    pub app: Option<String>,
    /// Table prefix turned into a module namespace; repeat or comma-separate.
    #[arg(long = "prefix", value_name = "PREFIX", value_delimiter = ',')]
    pub prefixes: Vec<String>,
    /// Prefix that never namespaces associations; repeat or comma-separate.
    #[arg(long = "not-prefix", value_name = "PREFIX", value_delimiter = ',')]
    pub not_prefixes: Vec<String>,
    /// Column holding the insertion timestamp.
    #[arg(long, value_name = "COLUMN")]
    pub inserted_at: Option<String>,
    /// Ecto type used for date-time columns instead of naive_datetime.
    #[arg(long, value_name = "TYPE")]
    pub datetime_type: Option<String>,
}

impl SourceArgs {
    /// Lay filter flags over the file config.
    pub fn apply(&self, mut config: EctogenConfig) -> EctogenConfig {
        if let Some(include) = &self.include {
            config.include = Some(include.clone());
        }
        if let Some(exclude) = &self.exclude {
            config.exclude = Some(exclude.clone());
        }
        config
    }
}

impl NamingArgs {
    /// Lay naming flags over the file config; list flags replace lists.
    pub fn apply(&self, mut config: EctogenConfig) -> EctogenConfig {
        if let Some(app) = &self.app {
            config.app = app.clone();
        }
        if !self.prefixes.is_empty() {
            config.prefixes = self.prefixes.clone();
        }
        if !self.not_prefixes.is_empty() {
            config.not_prefixes = self.not_prefixes.clone();
        }
        if let Some(inserted_at) = &self.inserted_at {
            config.inserted_at = Some(inserted_at.clone());
        }
        if let Some(datetime_type) = &self.datetime_type {
            config.datetime_type = Some(datetime_type.clone());
        }
        config
    }
}

/// Naming options for the classifier, taken from the resolved config.
pub fn map_options(config: &EctogenConfig) -> MapOptions {
    MapOptions {
        app: config.app.clone(),
        prefixes: config.prefixes.clone(),
        not_prefixes: config.not_prefixes.clone(),
        inserted_at: config.inserted_at.clone(),
        datetime_type: config.datetime_type.clone(),
    }
}

pub fn table_filter(config: &EctogenConfig) -> Result<TableFilter> {
    TableFilter::new(config.include.as_deref(), config.exclude.as_deref())
        .context("build table filter")
}

/// A resolved place to read tables from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Snapshot(PathBuf),
    Database {
        name: String,
        url: String,
        schema: Option<String>,
    },
}

impl Source {
    pub fn name(&self) -> String {
        match self {
            Source::Snapshot(path) => path.display().to_string(),
            Source::Database { name, .. } => name.clone(),
        }
    }

    /// Read the filtered tables of this source.
    pub async fn read_tables(&self, filter: &TableFilter) -> Result<Vec<TableDef>> {
        match self {
            Source::Snapshot(path) => {
                let catalog = SnapshotCatalog::new(load_snapshot(path).await?);
                read_tables(&catalog, filter)
                    .await
                    .with_context(|| format!("read snapshot {}", path.display()))
            }
            Source::Database { name, url, schema } => {
                let catalog = connect(url, schema.as_deref())
                    .await
                    .with_context(|| format!("open repository {name}"))?;
                read_tables(catalog.as_ref(), filter)
                    .await
                    .with_context(|| format!("read catalog of {name}"))
            }
        }
    }
}

/// Resolve the sources to read, in order of precedence: snapshot file,
/// `--repo` selections, `--database-url`, every configured repository.
pub fn resolve_sources(args: &SourceArgs, config: &EctogenConfig) -> Result<Vec<Source>> {
    if let Some(path) = &args.catalog {
        return Ok(vec![Source::Snapshot(path.clone())]);
    }

    if !args.repos.is_empty() {
        return args
            .repos
            .iter()
            .map(|name| repo_source(name, config, args.schema.as_deref()))
            .collect();
    }

    if let Some(url) = &args.database_url {
        return Ok(vec![Source::Database {
            name: "--database-url".to_string(),
            url: url.clone(),
            schema: args.schema.clone(),
        }]);
    }

    let sources = config
        .repo_names()
        .map(|name| repo_source(name, config, args.schema.as_deref()))
        .collect::<Result<Vec<_>>>()?;
    if sources.is_empty() {
        bail!("no repository configured: pass --repo, --database-url or --catalog, or run 'ectogen init'");
    }
    Ok(sources)
}

fn repo_source(name: &str, config: &EctogenConfig, schema: Option<&str>) -> Result<Source> {
    let repo = config.repo(name)?;
    let url = repo.resolve_url(name)?;
    Ok(Source::Database {
        name: name.to_string(),
        url,
        schema: schema.or(repo.schema()).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ectogen_config::RepoConfig;

    fn config_with_repos() -> EctogenConfig {
        let mut config = EctogenConfig::empty();
        config.repos.insert(
            "Shop.Repo".into(),
            RepoConfig {
                url: Some("mysql://root@localhost/shop".into()),
                url_env: None,
                schema: Some("shop".into()),
            },
        );
        config.repos.insert(
            "Shop.ReadRepo".into(),
            RepoConfig::with_url("postgres://app@localhost/shop_read"),
        );
        config
    }

    #[test]
    fn snapshot_takes_precedence() {
        let args = SourceArgs {
            catalog: Some(PathBuf::from("tables.json")),
            repos: vec!["Shop.Repo".into()],
            ..Default::default()
        };
        let sources = resolve_sources(&args, &config_with_repos()).unwrap();
        assert_eq!(sources, vec![Source::Snapshot(PathBuf::from("tables.json"))]);
    }

    #[test]
    fn selected_repos_in_given_order() {
        let args = SourceArgs {
            repos: vec!["Shop.Repo".into(), "Shop.ReadRepo".into()],
            ..Default::default()
        };
        let sources = resolve_sources(&args, &config_with_repos()).unwrap();
        assert_eq!(
            sources,
            vec![
                Source::Database {
                    name: "Shop.Repo".into(),
                    url: "mysql://root@localhost/shop".into(),
                    schema: Some("shop".into()),
                },
                Source::Database {
                    name: "Shop.ReadRepo".into(),
                    url: "postgres://app@localhost/shop_read".into(),
                    schema: None,
                },
            ]
        );
    }

    #[test]
    fn unknown_repo_is_an_error() {
        let args = SourceArgs {
            repos: vec!["Missing.Repo".into()],
            ..Default::default()
        };
        let err = resolve_sources(&args, &config_with_repos()).unwrap_err();
        assert!(err.to_string().contains("'Missing.Repo' is not configured"));
    }

    #[test]
    fn database_url_with_schema_override() {
        let args = SourceArgs {
            database_url: Some("postgres://localhost/app".into()),
            schema: Some("reporting".into()),
            ..Default::default()
        };
        let sources = resolve_sources(&args, &EctogenConfig::empty()).unwrap();
        assert_eq!(
            sources,
            vec![Source::Database {
                name: "--database-url".into(),
                url: "postgres://localhost/app".into(),
                schema: Some("reporting".into()),
            }]
        );
    }

    #[test]
    fn all_configured_repos_by_default() {
        let sources = resolve_sources(&SourceArgs::default(), &config_with_repos()).unwrap();
        let names: Vec<String> = sources.iter().map(Source::name).collect();
        assert_eq!(names, vec!["Shop.ReadRepo", "Shop.Repo"]);
    }

    #[test]
    fn nothing_to_read_is_an_error() {
        let err = resolve_sources(&SourceArgs::default(), &EctogenConfig::empty()).unwrap_err();
        assert!(err.to_string().starts_with("no repository configured"));
    }

    #[test]
    fn misconfigured_repo_is_an_error() {
        let mut config = EctogenConfig::empty();
        config.repos.insert("Bad.Repo".into(), RepoConfig::default());
        let err = resolve_sources(&SourceArgs::default(), &config).unwrap_err();
        assert!(err.to_string().contains("neither url nor urlEnv"));
    }

    #[test]
    fn naming_flags_override_config() {
        let config = EctogenConfig {
            app: "Shop".into(),
            prefixes: vec!["old".into()],
            inserted_at: Some("created_at".into()),
            ..EctogenConfig::empty()
        };
        let args = NamingArgs {
            app: Some("Store".into()),
            prefixes: vec!["pub".into(), "crm".into()],
            datetime_type: Some("utc_datetime".into()),
            ..Default::default()
        };
        let options = map_options(&args.apply(config));
        assert_eq!(options.app, "Store");
        assert_eq!(options.prefixes, vec!["pub", "crm"]);
        assert_eq!(options.inserted_at.as_deref(), Some("created_at"));
        assert_eq!(options.datetime_type.as_deref(), Some("utc_datetime"));
    }

    #[test]
    fn filter_flags_override_config() {
        let config = EctogenConfig {
            include: Some("^a_".into()),
            exclude: Some("_tmp$".into()),
            ..EctogenConfig::empty()
        };
        let args = SourceArgs {
            include: Some("^pub_".into()),
            exclude: Some("_archive$".into()),
            ..Default::default()
        };
        let filter = table_filter(&args.apply(config)).unwrap();
        assert!(filter.allows("pub_orders"));
        assert!(!filter.allows("pub_orders_archive"));
        assert!(!filter.allows("a_things"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let config = EctogenConfig {
            exclude: Some("[".into()),
            ..EctogenConfig::empty()
        };
        let err = table_filter(&config).unwrap_err();
        assert_eq!(err.to_string(), "build table filter");
        assert!(format!("{err:#}").contains("invalid exclude pattern"));
    }
}
