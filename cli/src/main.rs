use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use stalker_core::{fans, mutuals, not_following_back, FollowGraph, FollowService, GitHubClient, HttpFollowGraph, ListKind};
use tracing::{debug, error, info};

mod config;
mod logging;
mod transport;

use config::{Args, Config, View};
use transport::UreqTransport;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    let result = args
        .into_config()
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            let client = GitHubClient::new(config.api_url.as_str())?.with_token(config.token.as_str());
            let graph = HttpFollowGraph::new(client, UreqTransport::new(config.timeout));
            run(&config, graph, &mut io::stdout().lock())
        });

    match result {
        Ok(()) => {
            info!("process completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Fetch followers, then following, and print the selected view one login
/// per line.
fn run<G: FollowGraph>(config: &Config, graph: G, out: &mut impl Write) -> anyhow::Result<()> {
    let service = FollowService::new(graph)
        .per_page(config.per_page)
        .max_pages(config.max_pages);
    let username = config.username.as_str();

    info!(username, "fetching followers");
    let followers = service
        .collect(username, ListKind::Followers)
        .context("fetching followers")?;

    info!(username, "fetching following");
    let following = service
        .collect(username, ListKind::Following)
        .context("fetching following")?;

    info!(view = ?config.view, "comparing users");
    let logins = match config.view {
        View::NotFollowingBack => not_following_back(&following, &followers),
        View::Fans => fans(&following, &followers),
        View::Mutuals => mutuals(&following, &followers),
    };

    for login in &logins {
        debug!(login, "match");
        writeln!(out, "{login}").context("writing results")?;
    }
    out.flush().context("writing results")?;
    info!(count = logins.len(), "printed results");
    Ok(())
}
