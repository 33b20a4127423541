//! CLI runner - executes commands

use crate::boundary::{BoundaryLoader, BoundarySource};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::FetcherConfig;
use crate::error::{Error, Result, ResultExt};
use crate::fetcher::{Dataset, DatasetFetcher};
use crate::http::HttpClient;
use crate::query::{default_structure, Filters, Query, Structure};
use crate::types::{AreaType, JsonValue, ResponseFormat};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                filters,
                area_type,
                structure_json,
                structure_file,
                csv,
                output,
                stats,
            } => {
                let structure =
                    Self::load_structure(structure_json.as_deref(), structure_file.as_deref())?;
                self.fetch(
                    filters,
                    *area_type,
                    structure,
                    *csv,
                    output.as_deref(),
                    *stats,
                )
                .await
            }
            Commands::Latest { filters, output } => {
                self.fetch(
                    filters,
                    None,
                    default_structure().clone(),
                    false,
                    output.as_deref(),
                    false,
                )
                .await
            }
            Commands::Structure => {
                println!("{}", default_structure().to_compact_json()?);
                Ok(())
            }
            Commands::AreaTypes => {
                self.area_types();
                Ok(())
            }
            Commands::Boundaries {
                source,
                cache_dir,
                output,
            } => {
                self.boundaries(source, cache_dir.clone(), output.as_deref())
                    .await
            }
        }
    }

    /// Load configuration, applying command-line overrides
    fn load_config(&self) -> Result<FetcherConfig> {
        let mut config = match &self.cli.config {
            Some(path) => FetcherConfig::from_file(path)?,
            None => FetcherConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
            config.validate()?;
        }

        Ok(config)
    }

    /// Structure from inline JSON, a file, or the default table
    fn load_structure(inline: Option<&str>, file: Option<&Path>) -> Result<Structure> {
        if let Some(json_str) = inline {
            return Structure::from_json_str(json_str)
                .map_err(|e| Error::config(format!("Invalid structure JSON: {e}")));
        }

        if let Some(path) = file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read structure file {}", path.display()))?;
            return Structure::from_json_str(&content)
                .map_err(|e| Error::config(format!("Invalid structure JSON: {e}")));
        }

        Ok(default_structure().clone())
    }

    /// Build the filter list, falling back to the configured defaults
    fn build_filters(
        config: &FetcherConfig,
        filters: &[String],
        area_type: Option<AreaType>,
    ) -> Filters {
        let mut built = Filters::new();
        if let Some(area_type) = area_type {
            built = built.area_type(area_type);
        }
        for predicate in filters {
            built.push(predicate.clone());
        }

        if built.is_empty() {
            config.default_filters.clone()
        } else {
            built
        }
    }

    async fn fetch(
        &self,
        filters: &[String],
        area_type: Option<AreaType>,
        structure: Structure,
        csv: bool,
        output: Option<&Path>,
        show_stats: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let fetcher = DatasetFetcher::from_config(&config)?;

        let filters = Self::build_filters(&config, filters, area_type);
        let query =
            Query::new(filters, structure).with_format(ResponseFormat::from_csv_flag(csv));

        let (dataset, stats) = fetcher.fetch_with_stats(&query).await?;

        if show_stats {
            info!(
                "requests={} pages={} records={} duration_ms={}",
                stats.requests, stats.pages, stats.records, stats.duration_ms
            );
        }

        let rendered = self.render_dataset(&dataset)?;
        self.write_output(&rendered, output)
    }

    fn area_types(&self) {
        let listing: Vec<JsonValue> = AreaType::ALL
            .iter()
            .map(|area| {
                json!({
                    "name": area.as_str(),
                    "description": area.description(),
                })
            })
            .collect();
        self.output_message(&JsonValue::Array(listing));
    }

    async fn boundaries(
        &self,
        source: &str,
        cache_dir: Option<PathBuf>,
        output: Option<&Path>,
    ) -> Result<()> {
        let source = BoundarySource::by_name(source)?;
        let config = self.load_config()?;
        let client = HttpClient::with_config(config.http_config())?;
        let cache_dir = cache_dir.unwrap_or(config.boundary_cache_dir);

        let loader = BoundaryLoader::new(client, cache_dir);
        let data = loader.load(&source).await?;

        let rendered = self.render_json(&data)?;
        self.write_output(&rendered, output)
    }

    /// Render a dataset: JSON records per `--format`, CSV text as is
    fn render_dataset(&self, dataset: &Dataset) -> Result<String> {
        match dataset {
            Dataset::Records(records) => self.render_json(records),
            Dataset::Csv(text) => Ok(text.clone()),
        }
    }

    fn render_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(rendered)
    }

    fn write_output(&self, rendered: &str, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote output to {}", path.display());
            }
            None => println!("{rendered}"),
        }
        Ok(())
    }

    /// Output a JSON message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_fetch_command() {
        let cli = Cli::parse_from([
            "coronaviz-data",
            "fetch",
            "--area-type",
            "nation",
            "-F",
            "areaCode=E92000001",
            "--structure-json",
            r#"{"date":"date"}"#,
            "--csv",
        ]);

        match cli.command {
            Commands::Fetch {
                filters,
                area_type,
                structure_json,
                csv,
                ..
            } => {
                assert_eq!(filters, vec!["areaCode=E92000001".to_string()]);
                assert_eq!(area_type, Some(AreaType::Nation));
                assert_eq!(structure_json.as_deref(), Some(r#"{"date":"date"}"#));
                assert!(csv);
            }
            other => panic!("Expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_build_filters_order_and_defaults() {
        let config = FetcherConfig::default();

        let filters = Runner::build_filters(
            &config,
            &["areaCode=E92000001".to_string()],
            Some(AreaType::Nation),
        );
        assert_eq!(filters.joined(), "areaType=nation;areaCode=E92000001");

        let filters = Runner::build_filters(&config, &[], None);
        assert_eq!(filters.joined(), "areaType=region");
    }

    #[test]
    fn test_load_structure_sources() {
        let inline = Runner::load_structure(Some(r#"{"d":"date"}"#), None).unwrap();
        assert_eq!(inline.to_compact_json().unwrap(), r#"{"d":"date"}"#);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("structure.json");
        fs::write(&file, r#"{"name": "areaName"}"#).unwrap();
        let from_file = Runner::load_structure(None, Some(file.as_path())).unwrap();
        assert_eq!(from_file.to_compact_json().unwrap(), r#"{"name":"areaName"}"#);

        let default = Runner::load_structure(None, None).unwrap();
        assert_eq!(&default, default_structure());

        assert!(Runner::load_structure(Some("[1]"), None).is_err());
        assert!(Runner::load_structure(None, Some(dir.path().join("missing.json").as_path())).is_err());
    }

    #[test]
    fn test_endpoint_override_is_validated() {
        let cli = Cli::parse_from(["coronaviz-data", "--endpoint", "nope", "structure"]);
        assert!(Runner::new(cli).load_config().is_err());

        let cli = Cli::parse_from([
            "coronaviz-data",
            "--endpoint",
            "http://localhost:9000/v1/data",
            "structure",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/v1/data");
    }

    #[test]
    fn test_render_dataset() {
        let cli = Cli::parse_from(["coronaviz-data", "structure"]);
        let runner = Runner::new(cli);

        let csv = Dataset::Csv("a,b\n1,2".to_string());
        assert_eq!(runner.render_dataset(&csv).unwrap(), "a,b\n1,2");

        let records = Dataset::Records(vec![json!({"a": 1})]);
        assert_eq!(runner.render_dataset(&records).unwrap(), r#"[{"a":1}]"#);
    }
}
