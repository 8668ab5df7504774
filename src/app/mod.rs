//! Application layer - wiring and shared activation state.

mod state;

pub use state::ControlState;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::adapter::{BridgeClient, WebhookSink};
use crate::catalog::ItemCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::report::{NullSink, ReportEmitter, ReportSink};
use crate::service::{Curator, LogNotifier, NotifierRegistry, Trader};
use crate::session::MarkTransport;

/// Period of the idle-prevention nudge ticker.
const IDLE_NUDGE_PERIOD: Duration = Duration::from_secs(60);

/// Main application struct.
pub struct App;

impl App {
    /// Wire the services from configuration and run until done.
    ///
    /// With a trade target the run finishes when the trade completes (the
    /// curator, if enabled, keeps ticking until shutdown). Without one the
    /// process idles on curation alone.
    pub async fn run(config: Config, target_override: Option<String>) -> Result<()> {
        let state = Arc::new(ControlState::new());

        let catalog = Arc::new(match ItemCatalog::load(&config.catalog.path) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(
                    error = %err,
                    path = %config.catalog.path,
                    "Item catalog unavailable, everything will classify as Unknown"
                );
                ItemCatalog::empty()
            }
        });

        let bridge = Arc::new(BridgeClient::from_config(&config.bridge));

        let mut notifiers = NotifierRegistry::new();
        notifiers.register(Box::new(LogNotifier));
        let notifiers = Arc::new(notifiers);

        let sink: Arc<dyn ReportSink> = match &config.webhook.url {
            Some(url) => Arc::new(WebhookSink::new(
                url.clone(),
                config.webhook.username.clone(),
            )),
            None => {
                warn!("No webhook configured, reports will not be delivered");
                Arc::new(NullSink)
            }
        };
        let emitter = Arc::new(ReportEmitter::new(sink));

        if config.curation.enabled {
            state.set_curating(true);
            let curator = Arc::new(Curator::new(
                Arc::clone(&catalog),
                bridge.clone(),
                Arc::clone(&notifiers),
                Arc::clone(&emitter),
                Arc::clone(&state),
                config.curation.threshold(),
                config.curation.timing(),
            ));
            info!(threshold = %curator.threshold(), "Curation scheduler enabled");
            tokio::spawn(curator.run());
        }

        tokio::spawn(idle_nudge(bridge.clone(), Arc::clone(&state)));

        let target = target_override
            .or_else(|| config.trade.target.clone())
            .filter(|name| !name.is_empty());

        match target {
            Some(name) => {
                let quotas = config.trade.quota_table();
                if quotas.is_empty() {
                    warn!("Quota table excludes every tier, the run will send nothing");
                }
                let trader = Trader::new(
                    catalog,
                    bridge,
                    notifiers,
                    emitter,
                    Arc::clone(&state),
                );
                if let Err(err) = trader.run(&name, &quotas, &config.trade.options()).await {
                    warn!(error = %err, "Trade run did not complete");
                }
                if config.curation.enabled {
                    info!("Trade run done, curation continues until shutdown");
                    std::future::pending::<()>().await;
                }
            }
            None if config.curation.enabled => {
                info!("No trade target configured, running curation only");
                std::future::pending::<()>().await;
            }
            None => {
                warn!("Nothing to do: no trade target and curation disabled");
            }
        }

        Ok(())
    }
}

/// Background tick that keeps the session from idling out while any
/// automation is active.
async fn idle_nudge(session: Arc<dyn MarkTransport>, state: Arc<ControlState>) {
    let mut ticker = tokio::time::interval(IDLE_NUDGE_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if state.is_trading() || state.is_curating() {
            session.nudge().await;
        }
    }
}
