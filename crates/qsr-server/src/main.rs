use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};
use qsr_core::QsrConfig;
use qsr_server::{app, init_tracing, AppState, LogFormat, API_VERSION, SERVICE_NAME};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{error, info};

const ENV_LOG_FORMAT: &str = "QSR_LOG_FORMAT";

fn cli() -> Command {
    Command::new("qsr-server")
        .version(API_VERSION)
        .about(SERVICE_NAME)
        .arg(
            Arg::new("host")
                .long("host")
                .help("Address to bind (overrides HOST)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Port to listen on (overrides PORT)"),
        )
        .arg(
            Arg::new("mock-latency-ms")
                .long("mock-latency-ms")
                .value_parser(value_parser!(u64))
                .help("Artificial delay of mock responses in milliseconds"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_parser(value_parser!(LogFormat))
                .help("Log output format: text or json (overrides QSR_LOG_FORMAT)"),
        )
}

fn log_format(matches: &ArgMatches) -> LogFormat {
    if let Some(format) = matches.get_one::<LogFormat>("log-format") {
        return *format;
    }
    std::env::var(ENV_LOG_FORMAT)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<QsrConfig> {
    let mut config = QsrConfig::from_env().context("invalid configuration")?;
    if let Some(host) = matches.get_one::<String>("host") {
        config = config.with_host(host.clone());
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config = config.with_port(*port);
    }
    if let Some(ms) = matches.get_one::<u64>("mock-latency-ms") {
        config = config.with_mock_latency(Duration::from_millis(*ms));
    }
    Ok(config)
}

async fn resolve(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("failed to resolve {host}:{port}"))?
        .next()
        .with_context(|| format!("no address for {host}:{port}"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    init_tracing(log_format(&matches)).context("failed to install tracing subscriber")?;

    let config = load_config(&matches)?;

    let state = AppState::from_config(&config).context("failed to build Kissflow client")?;
    let addr = resolve(&config.host, config.port).await?;

    let (bound, server) = warp::serve(app(state))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %bound,
        frontend_url = %config.frontend_url,
        "Starting {SERVICE_NAME}"
    );
    server.await;
    info!("Server stopped");
    Ok(())
}
