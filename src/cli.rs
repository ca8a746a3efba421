use crate::admin::{user_message, AdminForm, AdminFormController, ConditionalGroup};
use crate::api::ApiClient;
use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::form::FormData;
use crate::handoff::HandoffOutcome;
use crate::models::HandoffMode;
use crate::technical::{AnswerSheet, DocumentFormat, Phase, TechnicalFormController};
use crate::ui;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing::{error, info};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// Subcommands:
/// - `admin`: submit an administrative form read from a TOML file
/// - `questions`: print the technical questions as a fill-in answer sheet
/// - `technical`: answer the technical questions from a sheet and generate the pliego
pub fn build_command() -> Command {
    Command::new("pliego-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("admin")
                .about("Submit an administrative tender form")
                .after_help("Form values use the HTML field names.\nExample:\n  pliego-cli admin form.toml --inline")
                .arg(
                    Arg::new("form")
                        .help("Path to the TOML file with the form values")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("inline")
                        .short('i')
                        .long("inline")
                        .help("Print the generated pliego instead of storing it for the editor")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("questions")
                .about("Print the technical questions as an answer sheet template"),
        )
        .subcommand(
            Command::new("technical")
                .about("Answer the technical questions and generate the technical pliego")
                .arg(
                    Arg::new("answers")
                        .help("Path to the TOML answer sheet")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("plain")
                        .short('p')
                        .long("plain")
                        .help("Assemble plain text instead of markdown")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("inline")
                        .short('i')
                        .long("inline")
                        .help("Print the generated pliego instead of storing it for the editor")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Parses command-line arguments and runs the selected subcommand.
///
/// Logging is installed here, once the verbosity flag is known.
///
/// # Errors
///
/// Returns an error if the configuration or input files cannot be loaded, if the
/// submission fails, or if the generated document cannot be handed off.
pub async fn cli() -> AppResult<()> {
    let mut cmd_for_help = build_command();
    let matches = build_command().get_matches();

    ui::init_logging(matches.get_flag("verbose"));

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ResolvedConfig::from_toml_file(path)?,
        None => ResolvedConfig::default(),
    };

    match matches.subcommand() {
        Some(("admin", sub)) => {
            let form_path = sub.get_one::<PathBuf>("form").expect("form is required");
            run_admin(&config, form_path, inline_override(sub)).await?;
        }
        Some(("questions", _)) => {
            run_questions(&config).await?;
        }
        Some(("technical", sub)) => {
            let answers_path = sub
                .get_one::<PathBuf>("answers")
                .expect("answers is required");
            let format = if sub.get_flag("plain") {
                DocumentFormat::PlainText
            } else {
                DocumentFormat::Markdown
            };
            run_technical(&config, answers_path, format, inline_override(sub)).await?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn inline_override(sub: &ArgMatches) -> Option<HandoffMode> {
    sub.get_flag("inline").then_some(HandoffMode::Inline)
}

async fn run_admin(
    config: &ResolvedConfig,
    form_path: &Path,
    mode: Option<HandoffMode>,
) -> AppResult<()> {
    let values = FormData::from_toml_file(form_path)?;
    let form = AdminForm::from_values(&values);
    for group in ConditionalGroup::ALL {
        info!(
            region = group.region(),
            visible = form.is_visible(group),
            "Conditional region"
        );
    }

    let handoff = config.handoff(mode);
    info!(handoff = handoff.mode().display_name(), "Submitting administrative form");
    let controller = AdminFormController::new(ApiClient::new(config)?, handoff);
    match controller.submit_form(&form).await {
        Ok(outcome) => {
            report_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Administrative submission failed");
            eprintln!("{}", user_message(&e));
            Err(e)
        }
    }
}

async fn run_questions(config: &ResolvedConfig) -> AppResult<()> {
    let client = ApiClient::new(config)?;
    let spinner = ui::create_spinner("Cargando preguntas técnicas...")?;
    let questions = client.fetch_questions().await;
    spinner.finish_and_clear();

    let sheet = AnswerSheet::template(&questions?);
    print!("{}", sheet.to_toml_string()?);
    Ok(())
}

async fn run_technical(
    config: &ResolvedConfig,
    answers_path: &Path,
    format: DocumentFormat,
    mode: Option<HandoffMode>,
) -> AppResult<()> {
    let sheet = AnswerSheet::from_toml_file(answers_path)?;
    let handoff = config.handoff(mode);
    info!(handoff = handoff.mode().display_name(), format = ?format, "Running technical form");
    let mut controller = TechnicalFormController::new(ApiClient::new(config)?, handoff, format);

    controller.load().await?;
    if controller.state().phase() == Phase::QuestionsLoaded {
        controller.fill(&sheet).await?;
        controller.submit().await?;
    }

    let state = controller.state();
    match (state.phase(), controller.outcome()) {
        (Phase::Done, Some(outcome)) => {
            report_outcome(outcome);
            Ok(())
        }
        _ => {
            let message = state
                .error()
                .unwrap_or("El formulario técnico no llegó a enviarse")
                .to_string();
            eprintln!("{message}");
            Err(AppError::InvalidInput(message))
        }
    }
}

fn report_outcome(outcome: &HandoffOutcome) {
    match outcome {
        HandoffOutcome::Redirect { target, store } => {
            info!(
                editor = %target,
                store = %store.display(),
                "Pliego ready, open the editor to review it"
            );
        }
        HandoffOutcome::Inline(document) => {
            println!("{document}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_command_parses_form_and_inline() {
        let matches = build_command()
            .try_get_matches_from(vec!["pliego-cli", "admin", "form.toml", "--inline"])
            .unwrap();
        let sub = matches.subcommand_matches("admin").unwrap();
        assert_eq!(
            sub.get_one::<PathBuf>("form").unwrap(),
            &PathBuf::from("form.toml")
        );
        assert_eq!(inline_override(sub), Some(HandoffMode::Inline));
    }

    #[test]
    fn admin_command_requires_form() {
        let result = build_command().try_get_matches_from(vec!["pliego-cli", "admin"]);
        assert!(result.is_err());
    }

    #[test]
    fn technical_command_defaults_to_configured_handoff() {
        let matches = build_command()
            .try_get_matches_from(vec!["pliego-cli", "technical", "answers.toml", "--plain"])
            .unwrap();
        let sub = matches.subcommand_matches("technical").unwrap();
        assert!(sub.get_flag("plain"));
        assert_eq!(inline_override(sub), None);
    }

    #[test]
    fn global_config_is_accepted_after_subcommand() {
        let matches = build_command()
            .try_get_matches_from(vec!["pliego-cli", "questions", "--config", "pliego.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config").unwrap(),
            &PathBuf::from("pliego.toml")
        );
    }

    #[test]
    fn test_report_outcome_runs() {
        report_outcome(&HandoffOutcome::Inline("texto".into()));
        report_outcome(&HandoffOutcome::Redirect {
            target: "editor.html".into(),
            store: PathBuf::from("data/handoff.json"),
        });
    }
}
