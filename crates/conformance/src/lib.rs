//! Conformance checks against a running order service.

pub mod arguments;
pub mod commands;
pub mod scenarios;

use {
    api_client::OrdersApi,
    arguments::{Arguments, Command},
    clap::Parser,
    std::process::ExitCode,
};

/// How a command ended. Maps onto the process exit code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Passed,
    /// A validation or expectation failure, including error responses.
    Failed,
    /// Every other check passed but a returned hash does not match the
    /// order's content.
    HashMismatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::HashMismatch => ExitCode::from(2),
        }
    }
}

pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = match Arguments::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            // Usage errors exit like any other failure; `--help` does not.
            let _ = err.print();
            return if err.use_stderr() {
                Outcome::Failed.into()
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let obs_config = observe::Config::new(
        &args.log_filter,
        args.log_stderr_threshold.into_level(),
        args.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running conformance with validated arguments:\n{}", args);

    run(&args).await.into()
}

pub async fn run(args: &Arguments) -> Outcome {
    let api = match OrdersApi::from_arguments(&args.api) {
        Ok(api) => api,
        Err(err) => {
            tracing::error!(?err, "failed to set up the order service client");
            eprintln!("{err}");
            return Outcome::Failed;
        }
    };
    tracing::debug!(url = %api.url(), "order service endpoint");

    match &args.command {
        Command::GetOrders(command) => commands::get_orders(&api, command).await,
        Command::UpdateStatus(command) => commands::update_status(&api, command).await,
        Command::Smoke(command) => {
            let scenarios = match &command.scenarios {
                Some(path) => scenarios::load(path),
                None => scenarios::smoke(),
            };
            match scenarios {
                Ok(scenarios) => commands::smoke(&api, &scenarios).await,
                Err(err) => {
                    tracing::error!(?err, "failed to load scenarios");
                    eprintln!("{err:#}");
                    Outcome::Failed
                }
            }
        }
    }
}
