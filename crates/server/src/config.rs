//! Service configuration.
//!
//! Every option can be given as a flag or through the environment (a
//! `.env` file is loaded first by the binaries). [`ServiceConfig`] covers
//! the collaborators and is shared with the CLI; [`ServerConfig`] adds the
//! listen address.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::info;

use catalogs::{google_books, itunes, tmdb, GoogleBooksCatalog, ItunesCatalog, TmdbCatalog};
use llm_client::groq::{self, GroqConfig};
use llm_client::GroqClient;

use crate::orchestrator::RecommendationOrchestrator;

/// Collaborator settings
#[derive(Debug, Clone, Args)]
pub struct ServiceConfig {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: String,

    /// Model used for candidate generation
    #[arg(long, env = "GROQ_MODEL", default_value = groq::DEFAULT_MODEL)]
    pub groq_model: String,

    #[arg(long, env = "GROQ_BASE_URL", default_value = groq::DEFAULT_BASE_URL)]
    pub groq_base_url: String,

    /// TMDB API key (v3)
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: String,

    #[arg(long, env = "TMDB_BASE_URL", default_value = tmdb::DEFAULT_BASE_URL)]
    pub tmdb_base_url: String,

    /// Google Books API key; anonymous requests are used when unset
    #[arg(long, env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    pub google_books_api_key: Option<String>,

    #[arg(long, env = "GOOGLE_BOOKS_BASE_URL", default_value = google_books::DEFAULT_BASE_URL)]
    pub google_books_base_url: String,

    #[arg(long, env = "ITUNES_BASE_URL", default_value = itunes::DEFAULT_BASE_URL)]
    pub itunes_base_url: String,

    /// Per-request timeout for every upstream HTTP call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Build the live collaborators and wire them into an orchestrator.
    pub fn build_orchestrator(&self) -> Result<RecommendationOrchestrator> {
        let timeout = self.upstream_timeout();

        let model = GroqClient::new(
            GroqConfig::new(self.groq_api_key.clone())
                .with_model(self.groq_model.clone())
                .with_base_url(self.groq_base_url.clone())
                .with_timeout(timeout),
        )
        .context("Failed to create Groq client")?;

        let movies = TmdbCatalog::new(self.tmdb_api_key.clone(), self.tmdb_base_url.clone(), timeout)
            .context("Failed to create TMDB catalog")?;
        let books = GoogleBooksCatalog::new(
            self.google_books_api_key.clone(),
            self.google_books_base_url.clone(),
            timeout,
        )
        .context("Failed to create Google Books catalog")?;
        let music = ItunesCatalog::new(self.itunes_base_url.clone(), timeout)
            .context("Failed to create iTunes catalog")?;

        info!(
            "Collaborators ready: model={} via {}, upstream timeout {:?}",
            self.groq_model, self.groq_base_url, timeout
        );

        Ok(RecommendationOrchestrator::new(
            Arc::new(model),
            Arc::new(movies),
            Arc::new(books),
            Arc::new(music),
        ))
    }
}

/// Settings for the HTTP server binary
#[derive(Debug, Clone, Parser)]
#[command(name = "wellness-server")]
#[command(about = "Stress-aware wellness recommendation service", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[command(flatten)]
    pub service: ServiceConfig,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
