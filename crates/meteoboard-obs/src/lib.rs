use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize observability (logging/tracing) for the given service.
/// - JSON logs
/// - RUST_LOG respected; otherwise info globally with debug for the
///   service's own targets
pub fn init(service_name: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(service_name));

    tracing_subscriber::registry()
        .with(EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(service = %service_name, "Observability initialized");
}

fn default_filter(service_name: &str) -> String {
    format!("info,{service_name}=debug")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_debug_to_service() {
        assert_eq!(default_filter("meteoboard"), "info,meteoboard=debug");
    }
}
