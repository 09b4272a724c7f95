use burrito::cli::{Cli, Command};
use burrito::cli::commands::{PlanCommand, RunCommand, ServeCommand, ValidateCommand};
use burrito::cli::output::*;
use burrito::core::config::{BuildConfig, HomeMode, DEFAULT_CONFIG_FILE};
use burrito::core::registry::TaskRegistry;
use burrito::core::ExecutionStatus;
use burrito::execution::{CommandRunner, PlanEngine, RunEvent};
use burrito::server::{self, Dispatcher, FileViewRenderer, HomePage, HttpServer};

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Configuration is resolved once per command; everything below only reads it
    match &cli.command {
        Command::Plan(cmd) => show_plan(cmd, &load_config(&cli)?)?,
        Command::Run(cmd) => run_task(cmd, Arc::new(load_config(&cli)?)).await?,
        Command::Serve(cmd) => serve(cmd, &load_config(&cli)?).await?,
        Command::Validate(cmd) => validate_config(cmd, &cli)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<BuildConfig> {
    BuildConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.env, cli.theme.clone())
        .context("Invalid command-line overrides")
}

fn show_plan(cmd: &PlanCommand, config: &BuildConfig) -> Result<()> {
    let registry = TaskRegistry::new(config);

    if cmd.task == "watch" {
        let targets = registry.watch_targets();
        if cmd.json {
            println!("{}", serde_json::to_string_pretty(targets)?);
        } else {
            println!(
                "{} Watch targets ({}, theme {}):",
                INFO,
                style(config.env).cyan(),
                style(&config.theme).bold()
            );
            for target in targets {
                println!("{}", format_watch_target(target));
            }
        }
        return Ok(());
    }

    let steps = if cmd.expand {
        registry
            .expand_task(&cmd.task)
            .with_context(|| format!("Failed to expand task '{}'", cmd.task))?
    } else {
        registry.resolve(&cmd.task)
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        println!(
            "{} Plan for {} ({}, theme {}):",
            INFO,
            style(&cmd.task).bold(),
            style(config.env).cyan(),
            style(&config.theme).bold()
        );
        println!("{}", format_plan(&steps));
    }

    Ok(())
}

async fn run_task(cmd: &RunCommand, config: Arc<BuildConfig>) -> Result<()> {
    let registry = TaskRegistry::new(&config);
    let plan = registry
        .expand_task(&cmd.task)
        .with_context(|| format!("Failed to expand task '{}'", cmd.task))?;

    let runner = CommandRunner::new(config.clone());
    let mut engine = PlanEngine::new(runner).with_dry_run(cmd.dry_run);

    let progress = create_progress_bar(plan.len());
    let bar = progress.clone();
    let show_output = cmd.show_output;
    engine.add_event_handler(move |event| {
        bar.println(format_run_event(&event));

        if show_output {
            if let RunEvent::StepCompleted { output, .. } = &event {
                if !output.trim().is_empty() {
                    bar.println(format_output(output.trim_end(), 5));
                }
            }
        }

        match &event {
            RunEvent::StepStarted { step, .. } => bar.set_message(step.to_string()),
            RunEvent::StepCompleted { .. }
            | RunEvent::StepSkipped { .. }
            | RunEvent::Notification { .. } => bar.inc(1),
            _ => {}
        }
    });

    let summary = engine.execute(&cmd.task, config.env, &plan).await;
    progress.finish_and_clear();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{}", format_run_summary(&summary));
    }

    if summary.status == ExecutionStatus::Failed {
        if let Some(failed) = summary.failed_step() {
            error!("{} failed: {}", failed.step, format_step_state(&failed.state));
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn serve(cmd: &ServeCommand, config: &BuildConfig) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(address) = &cmd.address {
        server_config.address = address.clone();
    }
    if let Some(home) = cmd.home {
        server_config.home = home;
    }
    if let Some(view) = &cmd.view {
        server_config.home_view = view.clone();
    }
    if server_config.home == HomeMode::Template && server_config.home_view.trim().is_empty() {
        anyhow::bail!("Template home page requires a view name");
    }

    let home = HomePage::from_config(&server_config);
    info!("Home page: {:?}", home);

    let renderer = Arc::new(FileViewRenderer::new(&server_config.views_dir));
    renderer.check_home(&home)?;
    let router = HttpServer::new(Dispatcher::new(home), renderer).router();

    let listener = tokio::net::TcpListener::bind(&server_config.address)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.address))?;

    println!(
        "{} Serving on {}",
        ROCKET,
        style(format!("http://{}", listener.local_addr()?)).cyan()
    );

    server::serve(listener, router, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown requested");
}

fn validate_config(cmd: &ValidateCommand, cli: &Cli) -> Result<()> {
    println!("{} Validating configuration...", INFO);

    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    };
    let config = &config;

    let source = match &cli.config {
        Some(path) => path.display().to_string(),
        None if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "built-in defaults".to_string(),
    };

    let registry = TaskRegistry::new(config);
    println!("{} Configuration is valid!", CHECK);
    println!("  Source: {}", style(source).dim());
    println!("  Theme: {}", style(&config.theme).bold());
    println!("  Environment: {}", style(config.env).cyan());
    println!(
        "  Tasks: {}",
        style(registry.task_names().collect::<Vec<_>>().join(", ")).cyan()
    );
    println!("  Actions: {}", style(config.actions.len()).cyan());
    println!("  Server: {}", style(&config.server.address).cyan());

    if cmd.json {
        let json = serde_json::to_string_pretty(config)?;
        println!("\n{}", json);
    }

    Ok(())
}
