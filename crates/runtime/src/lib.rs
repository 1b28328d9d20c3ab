use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use urbanroot_auth::{EnrollmentFlow, FlowMode, SimulatedTransport, Transport};
use urbanroot_config::AppConfig;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
    pub fn init_tracing(default_filter: &str) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Shared handles the console builds its flows from.
#[derive(Clone)]
pub struct ClientServices {
    pub config: AppConfig,
    pub transport: Arc<dyn Transport>,
}

impl ClientServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let latency = config.enrollment.latency();
        let transport: Arc<dyn Transport> = Arc::new(SimulatedTransport::new(latency));

        info!(latency_ms = config.enrollment.latency_ms, "simulated transport ready");

        Ok(Self::with_transport(config.clone(), transport))
    }

    pub fn with_transport(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn flow(&self, mode: FlowMode) -> EnrollmentFlow {
        EnrollmentFlow::start(mode, Arc::clone(&self.transport))
    }

    pub fn signup_flow(&self) -> EnrollmentFlow {
        self.flow(FlowMode::Signup)
    }

    pub fn login_flow(&self) -> EnrollmentFlow {
        self.flow(FlowMode::Login)
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
