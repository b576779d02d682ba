use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amid_core::analytics::FilterParams;
use amid_core::data::{cache::DatasetCache, StaticDataSource};
use amid_core::view::{self, html, Page, RenderInput, TimeRange};

#[derive(Debug, Parser)]
#[command(name = "amid_cli", about = "Render one dashboard page to stdout")]
struct Args {
    /// dashboard or guide.
    #[arg(long, default_value = "dashboard")]
    page: String,

    /// Minimum portfolio value in $M. Defaults to DASHBOARD_DEFAULT_MIN_VALUE or 1.0.
    #[arg(long)]
    min_value: Option<f64>,

    /// Maximum risk score. Defaults to DASHBOARD_DEFAULT_RISK_THRESHOLD or 7.0.
    #[arg(long)]
    max_risk: Option<f64>,

    /// last-30-days, last-90-days, last-6-months or last-year.
    #[arg(long, default_value = "last-30-days")]
    time_range: String,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Html,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = amid_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // stdout carries the rendered page.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match run(&args, settings.default_filter).await {
        Ok(out) => {
            println!("{out}");
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "render failed");
            Err(err)
        }
    }
}

async fn run(args: &Args, defaults: FilterParams) -> anyhow::Result<String> {
    let page: Page = args.page.parse()?;
    let time_range: TimeRange = args.time_range.parse()?;
    let filter = FilterParams {
        min_value: args.min_value.unwrap_or(defaults.min_value),
        max_risk: args.max_risk.unwrap_or(defaults.max_risk),
    };

    let cache = DatasetCache::new(Arc::new(StaticDataSource));
    let loaded = cache.get().await?;

    let rendered = view::render(
        page,
        &RenderInput {
            dataset: &loaded.dataset,
            source: loaded.source,
            loaded_at: loaded.loaded_at,
            filter,
            time_range,
        },
    );

    tracing::info!(
        render_id = %rendered.render_id,
        page = page.slug(),
        min_value = filter.min_value,
        max_risk = filter.max_risk,
        time_range = time_range.slug(),
        format = ?args.format,
        "rendered"
    );

    match args.format {
        Format::Json => {
            serde_json::to_string_pretty(&rendered).context("serialize rendered page failed")
        }
        Format::Html => html::render_page(&rendered),
    }
}

fn init_sentry(settings: &amid_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
