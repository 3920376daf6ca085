// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use bookaura_feedback::config;
use bookaura_feedback::diagnostics::DiagnosticsCollector;
use bookaura_feedback::failure::{body_from_text, Failure};
use bookaura_feedback::notifications::Toaster;
use bookaura_feedback::ErrorReporter;

const HELP: &str = "\
bookaura-feedback: show how a failed request is reported

USAGE:
  bookaura-feedback [OPTIONS]

OPTIONS:
  --status N       HTTP status of the failed response
  --body TEXT      Response body (JSON or plain text), used with --status
  --network        The request got no response
  --message TEXT   Message of a generic failure
  --custom TEXT    Message to show instead of the computed one
  --config PATH    Settings file (defaults to the user config directory)
  --export PATH    Write the diagnostics report to PATH
  -h, --help       Print this help
";

struct Args {
    status: Option<u16>,
    body: Option<String>,
    network: bool,
    message: Option<String>,
    custom: Option<String>,
    config: Option<PathBuf>,
    export: Option<PathBuf>,
}

impl Args {
    fn failure(&self) -> Option<Failure> {
        if let Some(status) = self.status {
            let body = self.body.as_deref().map_or(serde_json::Value::Null, body_from_text);
            return Some(Failure::http(status, body));
        }
        if self.network {
            return Some(Failure::network());
        }
        self.message.clone().map(Failure::generic)
    }
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let parsed = Args {
        status: args.opt_value_from_str("--status")?,
        body: args.opt_value_from_str("--body")?,
        network: args.contains("--network"),
        message: args.opt_value_from_str("--message")?,
        custom: args.opt_value_from_str("--custom")?,
        config: args.opt_value_from_str("--config")?,
        export: args.opt_value_from_str("--export")?,
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {remaining:?}");
    }
    Ok(Some(parsed))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = simple_logger::init_with_level(log::Level::Info) {
        eprintln!("logger unavailable: {err}");
    }

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let settings = match &args.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let settings = settings.unwrap_or_else(|err| {
        log::warn!("using default settings: {err}");
        config::Config::default()
    });

    let mut collector = DiagnosticsCollector::new(settings.diagnostics.capacity());
    let toaster =
        Toaster::from_config(&settings.notifications).with_diagnostics(collector.handle());
    let reporter =
        ErrorReporter::from_config(toaster.clone(), &settings).with_diagnostics(collector.handle());

    let failure = args.failure();
    let outcome = reporter.handle_api_error(failure.as_ref(), args.custom.as_deref());

    for toast in toaster.snapshot() {
        println!(
            "[{}] {} (visible for {} ms)",
            toast.kind(),
            toast.message(),
            toast.duration().as_millis()
        );
    }
    if outcome.notification.is_none() {
        println!("(toast not shown) {}", outcome.message);
    }

    if let Some(path) = &args.export {
        // Let the dismiss timer run so the report covers the whole lifecycle.
        tokio::time::sleep(settings.notifications.error_duration() + Duration::from_millis(50))
            .await;
        collector.process_pending();
        if let Err(err) = collector.export_to_file(path) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        println!("diagnostics written to {}", path.display());
    }
    ExitCode::SUCCESS
}
