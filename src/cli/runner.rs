//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::endpoint::Parameters;
use crate::endpoints::{is_paginating_endpoint, matching_endpoints};
use crate::error::{Error, Result};
use crate::pagination::Paginator;
use crate::types::JsonValue;
use std::io::Write;
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
                route,
                params,
                max_pages,
                pages,
            } => self.fetch(route, params, *max_pages, *pages).await,
            Commands::Check { route } => self.check(route),
            Commands::Endpoints { filter } => self.endpoints(filter.as_deref()),
        }
    }

    /// Build the client config: flags over environment over file over defaults
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        }
        .with_env_overrides();

        if let Some(base_url) = &self.cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(token) = &self.cli.token {
            config.token = Some(token.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Fetch all pages of a route
    async fn fetch(
        &self,
        route: &str,
        params: &[(String, JsonValue)],
        max_pages: Option<u64>,
        pages: bool,
    ) -> Result<()> {
        let paginator = Paginator::from_config(self.client_config()?)?;
        let parameters: Parameters = params.iter().cloned().collect();

        if !is_paginating_endpoint(route) {
            info!("{route} is not a known paginating endpoint, fetching anyway");
        }

        let mut fetched = 0u64;
        let output = if pages {
            let lines = paginator
                .paginate_map(route, Some(parameters), |page, exit| {
                    fetched += 1;
                    if max_pages.is_some_and(|max| fetched >= max) {
                        exit.done();
                    }
                    Some(serde_json::to_string(&page))
                })
                .await?
                .into_iter()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            lines.join("\n")
        } else {
            let items = paginator
                .paginate_map(route, Some(parameters), |page, exit| {
                    fetched += 1;
                    if max_pages.is_some_and(|max| fetched >= max) {
                        exit.done();
                    }
                    page.into_items()
                })
                .await?;
            info!("Fetched {} items", items.len());
            serde_json::to_string_pretty(&items)?
        };

        info!("Fetched {fetched} pages");
        write_stdout(&output)
    }

    /// Report whether a route is a known paginating endpoint
    fn check(&self, route: &str) -> Result<()> {
        if is_paginating_endpoint(route) {
            write_stdout(&format!("{route}: paginating"))
        } else {
            Err(Error::Other(format!(
                "{route} is not a known paginating endpoint"
            )))
        }
    }

    /// List known paginating endpoints
    fn endpoints(&self, filter: Option<&str>) -> Result<()> {
        let routes: Vec<&str> = matching_endpoints(filter.unwrap_or_default()).collect();
        write_stdout(&routes.join("\n"))
    }
}

fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
