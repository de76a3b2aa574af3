use std::path::PathBuf;
use std::process::ExitCode;

use quadplot::config::DashboardConfig;
use quadplot::run_dashboard;

fn main() -> ExitCode {
    #[cfg(feature = "telemetry")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // First CLI argument is the config path; defaults to quadplot.yaml
    // in the working directory. A missing default file means defaults
    // (and no logins) rather than an error, so point it at a real config.
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quadplot.yaml"));

    let config = if path.exists() {
        match DashboardConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("quadplot: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        tracing::warn!(path = %path.display(), "config file not found, using defaults");
        DashboardConfig::default()
    };

    match run_dashboard(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("quadplot: {e}");
            ExitCode::FAILURE
        }
    }
}
