use std::{ffi::OsStr, path::Path};

use apisix_translator::{configuration::Configuration, httproutes::HTTPRoute, resolver::ServiceSnapshotResolver, HTTPRouteTranslator};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

const DEFAULT_LOG_FILE_NAME: &str = "apisix-translator.log";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CommandArgs {
    #[arg(long)]
    with_config_file: String,
    /// HTTPRoute manifest to translate
    #[arg(long)]
    route_file: String,
    /// Multi-document YAML with the Services and Endpoints backends resolve against
    #[arg(long)]
    services_file: Option<String>,
}

fn init_tracing_logging(configuration: &Configuration) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()));
    let console_layer = fmt::layer()
        .event_format(fmt::format().compact())
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .with_filter(console_filter);

    let Some(log_file) = configuration.log_file.as_ref() else {
        Registry::default().with(console_layer).init();
        return None;
    };

    let log_file = Path::new(log_file);
    let directory = log_file.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = log_file.file_name().unwrap_or(OsStr::new(DEFAULT_LOG_FILE_NAME));
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    let file_filter = EnvFilter::new(std::env::var("RUST_FILE_LOG").unwrap_or_else(|_| "debug".to_owned()));
    let file_layer = fmt::layer().with_writer(non_blocking_appender).with_target(true).with_ansi(false).with_filter(file_filter);

    Registry::default().with(console_layer).with(file_layer).init();
    Some(guard)
}

fn main() -> apisix_translator::Result<()> {
    let args = CommandArgs::parse();
    let configuration: Configuration = serde_yaml::from_str(&std::fs::read_to_string(&args.with_config_file)?)?;
    let _guard = init_tracing_logging(&configuration);
    configuration.validate()?;

    let kube_route: HTTPRoute = serde_yaml::from_str(&std::fs::read_to_string(&args.route_file)?)?;
    let resolver = match args.services_file.as_ref() {
        Some(services_file) => ServiceSnapshotResolver::from_yaml(&std::fs::read_to_string(services_file)?)?,
        None => ServiceSnapshotResolver::default(),
    };

    let translator = HTTPRouteTranslator::with_configuration(&configuration, &resolver);
    let context = translator.translate(&kube_route)?;
    serde_json::to_writer_pretty(std::io::stdout().lock(), &context)?;
    Ok(())
}
