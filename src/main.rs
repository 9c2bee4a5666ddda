use std::sync::Arc;

use anyhow::Result;
use skycast_core::{AppError, Config, FileStore};
use skycast_dashboard::{LocationOutcome, LogSink, Orchestrator, Providers, Session};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    if let Err(err) = run().await {
        let err = AppError::classify(err);
        tracing::error!("{}", err.user_message());
        return Err(err.into());
    }

    Ok(())
}

async fn run() -> Result<()> {
    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let store = FileStore::open_or_reset(config.session_path())?;
    let session = Session::new(Arc::new(store));
    let providers = Providers::from_config(&config)?;
    let orchestrator = Orchestrator::new(providers, Arc::new(LogSink), session);

    // `skycast <city>` looks a city up; with no argument the last session is restored
    let city = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let outcome = if city.trim().is_empty() {
        orchestrator.restore_session().await
    } else {
        Some(orchestrator.handle_city_name(&city).await)
    };

    orchestrator.wait_idle().await;

    match outcome.map(LocationOutcome::into_result) {
        None => tracing::info!("No saved city. Run `skycast <city>` to look one up."),
        Some(Err(e)) => return Err(AppError::Service(e.to_string()).into()),
        Some(Ok(location)) => tracing::debug!("Finished loading {}", location.display_name),
    }

    Ok(())
}
