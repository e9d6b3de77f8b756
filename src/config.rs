// src/config.rs
use crate::api::BuildOptions;
use crate::constants::{
    API_KEY_ENV_VARS, BLOCK_MAX_RENDER_DEPTH, DEFAULT_SECRET_PATH, NOTION_MAX_FETCH_DEPTH,
};
use crate::error::AppError;
use crate::formatting::RenderOptions;
use crate::pipeline::{ExportOptions, PageTarget};
use crate::types::{ApiKey, PageId, ValidationError};
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

/// Upper bound for concurrent child listings.
const MAX_CONCURRENCY: usize = 32;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["page", "log_index"])))]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub page: Option<String>,

    /// Export the n-th log page (0-based, in search order) instead of a page ID
    #[arg(long)]
    pub log_index: Option<usize>,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Nesting level at which blocks are no longer expanded
    #[arg(long, default_value_t = NOTION_MAX_FETCH_DEPTH)]
    pub max_depth: usize,

    /// Number of child listings fetched concurrently (1 = sequential)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// File holding the Notion API key; NOTION_TOKEN / NOTION_API_KEY are used when unreadable
    #[arg(long, default_value = DEFAULT_SECRET_PATH)]
    pub secret_file: PathBuf,
}

/// Resolved export configuration, validated and ready to drive the pipeline.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub target: PageTarget,
    pub api_key: ApiKey,
    pub output_file: Option<PathBuf>,
    pub max_depth: usize,
    pub concurrency: usize,
    pub verbose: bool,
}

impl ExportConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = load_api_key(&cli.secret_file, |name| std::env::var(name).ok())?;
        Self::from_parts(cli, api_key)
    }

    fn from_parts(cli: CommandLineInput, api_key: ApiKey) -> Result<Self, AppError> {
        let target = match (cli.page, cli.log_index) {
            (Some(page), None) => PageTarget::Page(PageId::parse(&page)?),
            (None, Some(index)) => PageTarget::LogIndex(index),
            _ => {
                return Err(AppError::MissingConfiguration(
                    "exactly one of a page ID or --log-index is required".to_string(),
                ))
            }
        };

        if !(1..=MAX_CONCURRENCY).contains(&cli.concurrency) {
            return Err(ValidationError::OutOfBounds {
                value: u32::try_from(cli.concurrency).unwrap_or(u32::MAX),
                min: 1,
                max: MAX_CONCURRENCY as u32,
            }
            .into());
        }

        Ok(Self {
            target,
            api_key,
            output_file: cli.output,
            max_depth: cli.max_depth,
            concurrency: cli.concurrency,
            verbose: cli.verbose,
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            build: BuildOptions {
                max_depth: self.max_depth,
                concurrency: self.concurrency,
            },
            render: RenderOptions {
                max_depth: BLOCK_MAX_RENDER_DEPTH,
            },
        }
    }
}

/// Reads the API key from the secret file, falling back to the environment.
///
/// `env` looks up an environment variable; it is a parameter so the lookup
/// order can be exercised without touching the process environment.
pub fn load_api_key(
    secret_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ApiKey, AppError> {
    match std::fs::read_to_string(secret_file) {
        Ok(contents) if !contents.trim().is_empty() => {
            log::debug!("API key loaded from {}", secret_file.display());
            return Ok(ApiKey::new(contents)?);
        }
        Ok(_) => log::debug!("Secret file {} is empty", secret_file.display()),
        Err(e) => log::debug!("Secret file {} unreadable: {}", secret_file.display(), e),
    }

    for name in API_KEY_ENV_VARS {
        if let Some(value) = env(name).filter(|v| !v.trim().is_empty()) {
            log::debug!("API key loaded from ${}", name);
            return Ok(ApiKey::new(value)?);
        }
    }

    Err(AppError::MissingConfiguration(format!(
        "no Notion API key: {} is unreadable and {} are unset",
        secret_file.display(),
        API_KEY_ENV_VARS.join(" / ")
    )))
}
