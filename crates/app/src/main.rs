use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use pipeline_dashboard_core::{
    Animator, AppConfig, Dashboard, HttpBackend, NoopAnimator, PipelineController, RunInput,
    RunStatus, TokioAnimator,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> pipeline_dashboard_core::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_json_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }

    let backend = HttpBackend::new(config.backend.base_url.as_str());
    if cli.no_pacing {
        run(&cli.command, PipelineController::new(backend, NoopAnimator)).await
    } else {
        let animator = TokioAnimator::new(config.pacing.step_delay());
        run(&cli.command, PipelineController::new(backend, animator)).await
    }
}

async fn run<A: Animator>(
    command: &Commands,
    controller: PipelineController<HttpBackend, A>,
) -> pipeline_dashboard_core::Result<ExitCode> {
    let mut dashboard = Dashboard::new();
    tracing::info!(base_url = controller.backend().base_url(), "using backend");

    let run = match command {
        Commands::Full(args) => {
            controller
                .start_full_pipeline(&mut dashboard, &args.input())
                .await?
        }
        Commands::Mlp(args) => {
            controller
                .start_single_model_pipeline(&mut dashboard, &args.input())
                .await?
        }
    };

    print!("{dashboard}");
    Ok(match run.status() {
        RunStatus::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive the dataset and model training pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the configuration.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Skip the delay between progress steps.
    #[arg(long, global = true)]
    no_pacing: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the dataset and train the logistic regression model.
    Full(RunArgs),
    /// Generate the dataset and train only the MLP network.
    Mlp(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Requested number of rows. Anything unparsable falls back to 10000.
    #[arg(short, long, default_value = "")]
    rows: String,
    /// Regenerate the dataset even if one already exists.
    #[arg(short, long)]
    force: bool,
}

impl RunArgs {
    fn input(&self) -> RunInput {
        RunInput::new(self.rows.as_str(), self.force)
    }
}
