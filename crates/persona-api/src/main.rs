//! Persona CLI and REST API entry point.
//!
//! Binary name: `persona`
//!
//! `persona serve` opens the store and serves the interviewer API; every
//! other command talks to a running server over HTTP.

mod cli;
mod http;
mod state;

use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use persona_infra::config::load_global_config;
use persona_infra::dashboard::client::HttpInterviewerApi;
use persona_infra::filesystem::resolve_data_dir;
use persona_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};
use persona_types::interviewer::InterviewerId;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel).map_err(|e| anyhow!(e))?;

    // Shell completions need neither config nor server
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "persona", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    let server_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.dashboard.server_url.clone());
    let api = || HttpInterviewerApi::new(server_url.clone(), Duration::from_secs(30));

    match cli.command {
        Commands::List => {
            cli::interviewer::list_interviewers(&api()?, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::interviewer::show_interviewer(&api()?, InterviewerId(id), cli.json).await?;
        }

        Commands::Create(args) => {
            cli::interviewer::create_interviewer(&api()?, args, cli.json).await?;
        }

        Commands::Edit(args) => {
            cli::interviewer::edit_interviewer(&api()?, &config.dashboard, args, cli.json).await?;
        }

        Commands::Delete { id, force } => {
            cli::interviewer::delete_interviewer(&api()?, InterviewerId(id), force, cli.json)
                .await?;
        }

        Commands::Avatars => cli::catalog::list_avatars(cli.json)?,

        Commands::Voices => cli::catalog::list_voices(cli.json)?,

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::init(data_dir, &config).await?;
            tracing::info!(data_dir = %state.data_dir.display(), "store opened");
            let db_pool = state.db_pool.clone();

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Persona API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            db_pool.close().await;
            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
