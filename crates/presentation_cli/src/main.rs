//! podchaos CLI
//!
//! Deletes a pod and measures how long its controller takes to bring a ready
//! replacement back.

#![allow(clippy::print_stdout)]

mod output;
mod prompt;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::services::{CancelHandle, InjectionService};
use clap::{Parser, Subcommand};
use domain::TargetRef;
use infrastructure::{AppConfig, KubeClusterAdapter, init_telemetry};
use tokio::signal;
use tracing::{info, warn};

/// podchaos CLI
#[derive(Parser)]
#[command(name = "podchaos")]
#[command(author, version, about = "Pod-kill fault injection with recovery detection", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./podchaos.toml if present)
    #[arg(short, long, global = true, env = "PODCHAOS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pods in a namespace
    List {
        /// Namespace (default: injection.default_namespace)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a pod and wait for a ready replacement
    ///
    /// Asks for confirmation unless --yes is given.
    /// Example: podchaos inject -n shop cart-7d9f8-abcde
    Inject {
        /// Name of the pod to delete
        name: String,

        /// Namespace (default: injection.default_namespace)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Seconds to wait for the pod to disappear
        #[arg(long, value_name = "SECS")]
        deletion_timeout: Option<u64>,

        /// Seconds to wait for a ready replacement
        #[arg(long, value_name = "SECS")]
        recovery_timeout: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Exit status of an injection run: success iff the target was deleted
fn exit_code(deleted: bool) -> ExitCode {
    if deleted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Fire `handle` on Ctrl+C or SIGTERM
fn cancel_on_signal(handle: CancelHandle) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                },
                Err(e) => {
                    tracing::error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                },
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => warn!("Received Ctrl+C, cancelling run"),
            () = terminate => warn!("Received SIGTERM, cancelling run"),
        }
        handle.cancel();
    });
}

async fn connect(config: &AppConfig) -> anyhow::Result<InjectionService> {
    let adapter = KubeClusterAdapter::connect(&config.cluster)
        .await
        .context("Failed to connect to the Kubernetes API")?;
    Ok(InjectionService::new(Arc::new(adapter)).with_config(config.injection.clone()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }

    let _guard = init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Config => {
            config.validate()?;
            println!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        },

        Commands::List { namespace, json } => {
            config.validate()?;
            let namespace = namespace.unwrap_or_else(|| config.injection.default_namespace.clone());
            let service = connect(&config).await?;

            let summaries = service.list_instances_summary(&namespace).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{}", output::render_summaries(&namespace, &summaries));
            }
            Ok(ExitCode::SUCCESS)
        },

        Commands::Inject {
            name,
            namespace,
            yes,
            json,
            deletion_timeout,
            recovery_timeout,
        } => {
            if let Some(secs) = deletion_timeout {
                config.injection.deletion_timeout_secs = secs;
            }
            if let Some(secs) = recovery_timeout {
                config.injection.recovery_timeout_secs = secs;
            }
            config.validate()?;

            let namespace = namespace.unwrap_or_else(|| config.injection.default_namespace.clone());
            let target = TargetRef::new(namespace, name)?;
            let service = connect(&config).await?;

            if !yes {
                match service.inspect(&target).await {
                    Ok(instance) => println!("{}", output::render_preview(&instance)),
                    Err(e) => println!("⚠️  Could not inspect {target}: {e}"),
                }

                let confirmed = prompt::confirm(
                    &target.to_string(),
                    &mut io::stdin().lock(),
                    &mut io::stdout(),
                )?;
                if !confirmed {
                    println!("Aborted, nothing was deleted.");
                    return Ok(ExitCode::FAILURE);
                }
            }

            let (handle, cancel) = CancelHandle::new();
            cancel_on_signal(handle);

            info!(pod = %target, "Injecting fault");
            let outcome = service.inject_with_cancel(&target, &cancel).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", output::render_outcome(&outcome));
            }
            Ok(exit_code(outcome.deleted()))
        },
    }
}
