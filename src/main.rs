//! CV analyzer: score a CV against a Terms of Reference

use clap::Parser;
use cv_analyzer::cli::{self, Cli, Commands, ConfigAction};
use cv_analyzer::client::HttpBackend;
use cv_analyzer::config::{Config, OutputFormat};
use cv_analyzer::controller::{SubmissionController, ViewState};
use cv_analyzer::error::{CvAnalyzerError, Result};
use cv_analyzer::form::{SubmitOutcome, UploadForm};
use cv_analyzer::input::InputManager;
use cv_analyzer::output::formatter::{save_report_to_file, suggest_filename};
use cv_analyzer::output::ReportGenerator;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            tor,
            tor_file,
            cv,
            cv_type,
            output,
            save,
            backend_url,
            detailed,
        } => {
            if let Some(url) = backend_url {
                config.set_value("backend.base_url", &url)?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format)
                    .map_err(CvAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let input_manager = InputManager::new().with_declared_type(cv_type);
            let tor = match (tor, tor_file) {
                (Some(text), _) => text,
                (None, Some(path)) => input_manager.read_text(&path).await?,
                (None, None) => String::new(),
            };
            let files: Vec<_> = input_manager.load_first(&cv).await?.into_iter().collect();

            let form = UploadForm::new().with_tor(tor).with_files(files);
            let backend = HttpBackend::new(&config.backend)?;
            info!("Analysis endpoint: {}", backend.url());
            let controller = SubmissionController::new(backend);

            let outcome = submit_with_spinner(&controller, &form).await;

            match outcome {
                SubmitOutcome::Invalid(errors) => {
                    for field_error in errors.errors() {
                        eprintln!("❌ {}: {}", field_error.field, field_error.message);
                    }
                    return Err(CvAnalyzerError::Validation(errors));
                }
                SubmitOutcome::Disabled => {
                    return Err(CvAnalyzerError::InvalidInput(
                        "A submission is already in progress".to_string(),
                    ));
                }
                SubmitOutcome::Submitted => {}
            }

            match controller.state() {
                ViewState::Success(result) => {
                    let generator = ReportGenerator::with_options(config.output.color_output, detailed);
                    let report = generator.generate_report(&result, &output_format)?;

                    match save {
                        Some(target) => {
                            let path = resolve_save_path(target, &output_format, &result.candidate_name);
                            let plain = if output_format == OutputFormat::Console {
                                ReportGenerator::with_options(false, detailed)
                                    .generate_report(&result, &output_format)?
                            } else {
                                report
                            };
                            save_report_to_file(&plain, &path)?;
                            println!("✅ Report saved to {}", path.display());
                        }
                        None => println!("{}", report),
                    }
                }
                ViewState::Failed(message) => {
                    eprintln!("❌ {}", message);
                    return Err(CvAnalyzerError::AnalysisFailed(message));
                }
                ViewState::Idle | ViewState::Loading => {
                    return Err(CvAnalyzerError::AnalysisFailed(
                        "Submission ended without a result".to_string(),
                    ));
                }
            }
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Config File: {}", config_path.display());
                    println!("Backend URL: {}", config.backend.base_url);
                    match config.backend.timeout_secs {
                        Some(secs) => println!("Request Timeout: {}s", secs),
                        None => println!("Request Timeout: none"),
                    }
                    println!("User Agent: {}", config.backend.user_agent);
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  Colors: {}", config.output.color_output);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Set { key, value }) => {
                    println!("🔧 Setting {}: {}", key, value);
                    config.set_value(&key, &value)?;
                    config.save_to(config_path)?;
                    println!("✅ Configuration updated!");
                }
            }
        }
    }

    Ok(())
}

/// Drive the form submission, showing a spinner for as long as the controller is loading.
async fn submit_with_spinner(
    controller: &SubmissionController<HttpBackend>,
    form: &UploadForm,
) -> SubmitOutcome {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }

    let mut updates = controller.subscribe();
    let submission = controller.submit_form(form);
    tokio::pin!(submission);

    let outcome = loop {
        tokio::select! {
            outcome = &mut submission => break outcome,
            Ok(()) = updates.changed() => {
                if updates.borrow_and_update().loading() {
                    spinner.set_message("Analyzing...");
                    spinner.enable_steady_tick(Duration::from_millis(100));
                }
            }
        }
    };

    spinner.finish_and_clear();
    outcome
}

fn resolve_save_path(target: PathBuf, format: &OutputFormat, candidate_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, candidate_name, true))
    } else {
        target
    }
}
