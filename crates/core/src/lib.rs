pub mod analytics;
pub mod data;
pub mod domain;
pub mod view;

pub mod config {
    use crate::analytics::FilterParams;
    use anyhow::Context;

    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: u16,
        /// Filter applied when a request leaves a threshold unset.
        pub default_filter: FilterParams,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(v) if !v.trim().is_empty() => v
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a port number (got {v:?})"))?,
                _ => DEFAULT_PORT,
            };

            let mut default_filter = FilterParams::default();
            if let Some(v) = env_f64("DASHBOARD_DEFAULT_MIN_VALUE") {
                default_filter.min_value = v;
            }
            if let Some(v) = env_f64("DASHBOARD_DEFAULT_RISK_THRESHOLD") {
                default_filter.max_risk = v;
            }

            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                port,
                default_filter,
            })
        }
    }

    // Unparseable values are ignored and the default kept.
    fn env_f64(key: &str) -> Option<f64> {
        std::env::var(key)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

}
