//! biowrap API server binary.
//!
//! One process serves one tool. The subcommand picks the tool, builds its
//! service on the real process runner and hands the router to the API layer.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use biowrap::api::{self, ApiError, AppState, Config};
use biowrap::tools::blastp::{self, BlastpConfig, BlastpService};
use biowrap::tools::spider::{self, SpiderConfig, SpiderService};
use biowrap::tools::{ConfigError, DatabaseRegistry, ProcessRunner, RuntimeEnv};
use clap::{Parser, Subcommand};
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("API server error: {0}")]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "biowrap")]
#[command(author, version, about = "HTTP wrappers for BLASTp and SPIDER", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = api::DEFAULT_PORT, global = true)]
    port: u16,

    #[command(subcommand)]
    tool: Tool,
}

#[derive(Subcommand)]
enum Tool {
    /// Serve BLASTp protein alignment search
    Blastp {
        /// BLAST database directory (overrides BLAST_DB_PATH)
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// micromamba environment with BLAST+ installed (overrides BLAST_MM_ENV)
        #[arg(long)]
        mm_env: Option<String>,

        /// Directory for per-request search output (overrides BLAST_OUTPUT_PATH)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Download each database with update_blastdb.pl on first use
        #[arg(long)]
        auto_update: bool,
    },
    /// Serve SPIDER druggability prediction
    Spider {
        /// SPIDER installation directory (overrides SPIDER_HOME)
        #[arg(long)]
        home: Option<PathBuf>,

        /// micromamba environment with SPIDER's dependencies (overrides SPIDER_MM_ENV)
        #[arg(long)]
        mm_env: Option<String>,

        /// Give every prediction its own working directory
        #[arg(long)]
        isolate_workdir: bool,
    },
}

/// Apply a CLI environment name on top of the configured one, keeping the launcher.
fn override_env(current: RuntimeEnv, mm_env: Option<String>) -> RuntimeEnv {
    match mm_env {
        Some(name) => RuntimeEnv::from_name(Some(name)).with_launcher(current.launcher()),
        None => current,
    }
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    let config = Config::new(cli.host, cli.port);

    let router = match cli.tool {
        Tool::Blastp {
            db_path,
            mm_env,
            output_dir,
            auto_update,
        } => {
            let mut blastp_config = BlastpConfig::from_env_or(db_path)?;
            if let Some(output_dir) = output_dir {
                blastp_config = blastp_config.with_output_dir(output_dir);
            }
            let env = override_env(blastp_config.env.clone(), mm_env);
            let auto_update = auto_update || blastp_config.auto_update;
            let blastp_config = blastp_config.with_env(env).with_auto_update(auto_update);
            blastp_config.prepare()?;

            info!(tool = blastp::TOOL_NAME, "Starting server");
            let service = BlastpService::new(
                blastp_config,
                ProcessRunner::new(),
                Arc::new(DatabaseRegistry::new()),
            );
            api::create_blastp_router(AppState::new(service))
        }
        Tool::Spider {
            home,
            mm_env,
            isolate_workdir,
        } => {
            let spider_config = SpiderConfig::from_env_or(home);
            let env = override_env(spider_config.env.clone(), mm_env);
            let isolate_workdir = isolate_workdir || spider_config.isolate_workdir;
            let spider_config = spider_config
                .with_env(env)
                .with_isolate_workdir(isolate_workdir);
            spider_config.prepare()?;

            info!(tool = spider::TOOL_NAME, "Starting server");
            let service = SpiderService::new(spider_config, ProcessRunner::new());
            api::create_spider_router(AppState::new(service))
        }
    };

    api::run(config, router).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    api::init_tracing();

    let cli = Cli::parse();
    serve(cli).await?;
    Ok(())
}
