use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vaccine_poller::config::PollerConfig;
use vaccine_poller::domain::SUPPORTED_STATES;
use vaccine_poller::provider::{MockProvider, Provider, ProviderClient};
use vaccine_poller::scheduler::Scheduler;
use vaccine_poller::table::TableStore;
use vaccine_poller::updater::Updater;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match PollerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    // Offline mode serves saved documents instead of the live feed
    let provider = match &config.mock_dir {
        Some(dir) => MockProvider::new(dir).map(|mock| {
            info!(
                dir = %dir.display(),
                states = mock.available_states().len(),
                "using mock provider"
            );
            Provider::Mock(mock)
        }),
        None => ProviderClient::new(config.provider_config()).map(Provider::Http),
    };
    let provider = match provider {
        Ok(provider) => provider,
        Err(e) => {
            error!(error = %e, "failed to create provider");
            std::process::exit(1);
        }
    };

    let store = TableStore::new(&config.data_dir);
    info!(
        data_dir = %store.data_dir().display(),
        states = SUPPORTED_STATES.len(),
        state_delay_secs = config.state_delay.as_secs(),
        cycle_delay_secs = config.cycle_delay.as_secs(),
        "starting vaccine availability poller"
    );

    let scheduler = Scheduler::new(Updater::new(store, provider), config.scheduler_config());

    tokio::select! {
        _ = scheduler.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutting down");
        }
    }
}
