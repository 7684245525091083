use errors::AppResult;
use pim2sms::{cli, errors};

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = cli::cli() {
        tracing::error!(error = %e, "Conversion failed");
        return Err(e);
    }
    Ok(())
}
