//! ProtolexCli application.
//!
//! Owns the loaded configuration and dispatches parsed commands to the
//! handler modules.

use crate::catalog_handlers;
use crate::cli::{CliArgs, Command};
use crate::config::ProtolexConfig;
use crate::{config_handlers, graph_handlers};
use protolex_core::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// ProtolexCli
// ============================================================================

/// The `protolex` command-line application.
pub struct ProtolexCli {
    name: String,
    config: Arc<ProtolexConfig>,
    version: String,
}

impl ProtolexCli {
    /// Create from CLI args, loading config from file/env.
    ///
    /// `--data` overrides `content.protocols`.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = ProtolexConfig::load(args.config.as_deref())?;
        if let Some(data) = &args.data {
            config.content.protocols = Some(data.clone());
        }
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: ProtolexConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &ProtolexConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let config = &*self.config;
        tracing::debug!(project = %config.project_name, command = ?args.command, "dispatching");

        match args.command {
            Some(Command::Validate { strict, quiz }) => {
                catalog_handlers::handle_validate(config, strict, quiz.as_deref())
            }
            Some(Command::Search(search)) => catalog_handlers::handle_search(config, search),
            Some(Command::Graph(graph)) => graph_handlers::handle_graph_command(config, graph.command),
            Some(Command::Index(index)) => {
                catalog_handlers::handle_index_command(config, index.command)
            }
            Some(Command::Quiz {
                id,
                count,
                seed,
                json,
            }) => catalog_handlers::handle_quiz(config, &id, count, seed, json),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentConfig;
    use clap::Parser;
    use protolex_core::fixtures::sample_corpus;
    use protolex_core::traits::ConfigProvider;
    use std::path::PathBuf;

    fn test_config() -> ProtolexConfig {
        ProtolexConfig {
            project_name: "test-app".into(),
            base_path: Some("/tmp/test".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_protolex_cli_new() {
        let cli = ProtolexCli::new("protolex", test_config());
        assert_eq!(cli.name, "protolex");
        assert_eq!(cli.config().project_name(), "test-app");
    }

    #[test]
    fn test_protolex_cli_with_version() {
        let cli = ProtolexCli::new("protolex", test_config()).with_version("1.2.3");
        assert_eq!(cli.version, "1.2.3");
    }

    #[test]
    fn test_protolex_cli_config_access() {
        let cli = ProtolexCli::new("protolex", test_config());
        assert_eq!(cli.config().base_path().unwrap(), PathBuf::from("/tmp/test"));
    }

    #[test]
    fn test_run_version_command() {
        let cli = ProtolexCli::new("protolex", test_config()).with_version("0.1.0");
        let args = CliArgs::parse_from(["protolex", "version"]);
        assert!(cli.run(args).is_ok());
    }

    #[test]
    fn test_run_no_command() {
        let cli = ProtolexCli::new("protolex", test_config());
        let args = CliArgs::parse_from(["protolex"]);
        assert!(cli.run(args).is_ok());
    }

    #[test]
    fn test_run_validate_missing_corpus() {
        let cli = ProtolexCli::new("protolex", test_config());
        let args = CliArgs::parse_from(["protolex", "validate"]);
        assert!(cli.run(args).is_err());
    }

    #[test]
    fn test_init_logging_default() {
        let cli = ProtolexCli::new("test", test_config());
        cli.init_logging(false, false);
    }

    #[test]
    fn test_init_logging_verbose() {
        let cli = ProtolexCli::new("test", test_config());
        cli.init_logging(true, false);
    }

    #[test]
    fn test_init_logging_quiet() {
        let cli = ProtolexCli::new("test", test_config());
        cli.init_logging(false, true);
    }

    // ------------------------------------------------------------------------
    // Config integration
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_args_with_file_and_data_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
                project_name = "from-file"
                [content]
                protocols = "/from/file.json"
            "#,
        )
        .unwrap();

        let args = CliArgs::parse_from(["protolex", "--config", config_path.to_str().unwrap()]);
        let cli = ProtolexCli::from_args("protolex", &args).unwrap();
        assert_eq!(cli.config().project_name(), "from-file");
        assert_eq!(cli.config().content.protocols.as_deref(), Some("/from/file.json"));

        let args = CliArgs::parse_from([
            "protolex",
            "--config",
            config_path.to_str().unwrap(),
            "--data",
            "/override.json",
        ]);
        let cli = ProtolexCli::from_args("protolex", &args).unwrap();
        assert_eq!(cli.config().content.protocols.as_deref(), Some("/override.json"));
    }

    #[test]
    fn test_run_search_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().join("protocols.json");
        std::fs::write(&data, serde_json::to_string(&sample_corpus()).unwrap()).unwrap();

        let config = ProtolexConfig {
            content: ContentConfig {
                protocols: Some(data.to_string_lossy().into_owned()),
                quizzes: None,
            },
            ..Default::default()
        };
        let cli = ProtolexCli::new("protolex", config);

        let args = CliArgs::parse_from(["protolex", "search", "domain", "--category", "infrastructure"]);
        assert!(cli.run(args).is_ok());

        let args = CliArgs::parse_from(["protolex", "quiz", "tcp", "--count", "1", "--seed", "3"]);
        assert!(cli.run(args).is_ok());
    }

    #[test]
    fn test_config_command_dispatch() {
        let cli = ProtolexCli::new("protolex", test_config());
        let args = CliArgs::parse_from(["protolex", "config", "path"]);
        assert!(cli.run(args).is_ok());
    }
}
