use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use amid_core::analytics::{filter_portfolios, sector_shares, FilterParams, PortfolioSummary};
use amid_core::data::cache::{DatasetCache, LoadedDataset};
use amid_core::domain::portfolio::{PortfolioRecord, SectorRecord};
use amid_core::view::{self, html, Page, RenderInput, RenderedPage, TimeRange};

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub cache: Arc<DatasetCache>,
    pub default_filter: FilterParams,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route("/guide", get(guide))
        .route("/api/view", get(view_json))
        .route("/api/portfolios", get(list_portfolios))
        .route("/api/sectors", get(list_sectors))
        .route("/api/summary", get(summary))
        .route("/api/refresh", post(refresh))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Sidebar form fields. Anything left out falls back to the server defaults.
#[derive(Debug, Default, Deserialize)]
struct ViewQuery {
    page: Option<Page>,
    min_value: Option<f64>,
    max_risk: Option<f64>,
    time_range: Option<TimeRange>,
    #[serde(default)]
    refresh: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FilterQuery {
    min_value: Option<f64>,
    max_risk: Option<f64>,
}

impl AppState {
    fn filter(&self, min_value: Option<f64>, max_risk: Option<f64>) -> FilterParams {
        FilterParams {
            min_value: min_value.unwrap_or(self.default_filter.min_value),
            max_risk: max_risk.unwrap_or(self.default_filter.max_risk),
        }
    }

    async fn dataset(&self, refresh: bool) -> Result<LoadedDataset, StatusCode> {
        let loaded = if refresh {
            self.cache.refresh().await
        } else {
            self.cache.get().await
        };
        loaded.map_err(internal_error)
    }

    async fn render(&self, q: ViewQuery) -> Result<RenderedPage, StatusCode> {
        let loaded = self.dataset(q.refresh).await?;
        let page = q.page.unwrap_or_default();
        let input = RenderInput {
            dataset: &loaded.dataset,
            source: loaded.source,
            loaded_at: loaded.loaded_at,
            filter: self.filter(q.min_value, q.max_risk),
            time_range: q.time_range.unwrap_or_default(),
        };
        let rendered = view::render(page, &input);
        tracing::debug!(
            render_id = %rendered.render_id,
            page = page.slug(),
            min_value = input.filter.min_value,
            max_risk = input.filter.max_risk,
            time_range = input.time_range.slug(),
            "page rendered"
        );
        Ok(rendered)
    }
}

async fn index(
    State(state): State<AppState>,
    Query(q): Query<ViewQuery>,
) -> Result<Html<String>, StatusCode> {
    let rendered = state.render(q).await?;
    let page = html::render_page(&rendered).map_err(internal_error)?;
    Ok(Html(page))
}

async fn guide(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let q = ViewQuery {
        page: Some(Page::Guide),
        ..Default::default()
    };
    let rendered = state.render(q).await?;
    let page = html::render_page(&rendered).map_err(internal_error)?;
    Ok(Html(page))
}

async fn view_json(
    State(state): State<AppState>,
    Query(q): Query<ViewQuery>,
) -> Result<Json<RenderedPage>, StatusCode> {
    Ok(Json(state.render(q).await?))
}

#[derive(Debug, Serialize)]
struct PortfolioList {
    filter: FilterParams,
    count: usize,
    portfolios: Vec<PortfolioRecord>,
}

async fn list_portfolios(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<PortfolioList>, StatusCode> {
    let loaded = state.dataset(false).await?;
    let filter = state.filter(q.min_value, q.max_risk);
    let portfolios: Vec<PortfolioRecord> = filter_portfolios(&loaded.dataset.portfolios, &filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(PortfolioList {
        filter,
        count: portfolios.len(),
        portfolios,
    }))
}

#[derive(Debug, Serialize)]
struct SectorItem {
    #[serde(flatten)]
    sector: SectorRecord,
    percent: f64,
}

#[derive(Debug, Serialize)]
struct SectorList {
    total_allocation: f64,
    sectors: Vec<SectorItem>,
}

async fn list_sectors(State(state): State<AppState>) -> Result<Json<SectorList>, StatusCode> {
    let loaded = state.dataset(false).await?;
    let rows = &loaded.dataset.sectors;
    let sectors = rows
        .iter()
        .zip(sector_shares(rows))
        .map(|(sector, share)| SectorItem {
            sector: sector.clone(),
            percent: share.percent,
        })
        .collect();

    Ok(Json(SectorList {
        total_allocation: rows.iter().map(|s| s.total_allocation).sum(),
        sectors,
    }))
}

async fn summary(State(state): State<AppState>) -> Result<Json<PortfolioSummary>, StatusCode> {
    let loaded = state.dataset(false).await?;
    Ok(Json(PortfolioSummary::compute(&loaded.dataset.portfolios)))
}

#[derive(Debug, Serialize)]
struct RefreshReport {
    source: &'static str,
    loaded_at: DateTime<Utc>,
    portfolios: usize,
    sectors: usize,
}

async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshReport>, StatusCode> {
    let loaded = state.dataset(true).await?;
    Ok(Json(RefreshReport {
        source: loaded.source,
        loaded_at: loaded.loaded_at,
        portfolios: loaded.dataset.portfolios.len(),
        sectors: loaded.dataset.sectors.len(),
    }))
}

fn internal_error(e: anyhow::Error) -> StatusCode {
    sentry_anyhow::capture_anyhow(&e);
    tracing::error!(error = %e, "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use amid_core::data::{DataSource, StaticDataSource};
    use amid_core::domain::dataset::Dataset;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            cache: Arc::new(DatasetCache::new(Arc::new(StaticDataSource))),
            default_filter: FilterParams::default(),
        })
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(uri: &str) -> serde_json::Value {
        let (status, body) = call(app(), Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let (status, body) = call(app(), Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_renders_dashboard_by_default() {
        let (status, body) = call(app(), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("$220.5M"));
        assert_eq!(body.matches("<circle").count(), 5);
    }

    #[tokio::test]
    async fn index_applies_sidebar_form() {
        let (status, body) = call(
            app(),
            Method::GET,
            "/?page=dashboard&time_range=last-90-days&max_risk=5.0&min_value=1&refresh=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Conservative Income and Real Estate Fund.
        assert_eq!(body.matches("<circle").count(), 2);
        assert!(body.contains(r#"<option value="last-90-days" selected>"#));
    }

    #[tokio::test]
    async fn guide_routes_render_guide() {
        let (status, guide) = call(app(), Method::GET, "/guide").await;
        assert_eq!(status, StatusCode::OK);
        assert!(guide.contains("Dashboard Guide"));
        assert!(!guide.contains(r#"name="max_risk""#));

        let (status, via_query) = call(app(), Method::GET, "/?page=guide").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            via_query.matches("<details").count(),
            guide.matches("<details").count()
        );
    }

    #[tokio::test]
    async fn unknown_query_values_are_rejected() {
        for uri in [
            "/?page=settings",
            "/?time_range=forever",
            "/?max_risk=high",
            "/api/portfolios?min_value=lots",
        ] {
            let (status, _) = call(app(), Method::GET, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn view_json_is_tagged_by_page() {
        let v = get_json("/api/view").await;
        assert_eq!(v["page"], "dashboard");
        assert_eq!(v["sidebar"]["controls"]["risk_threshold"], 7.0);
        assert_eq!(v["insights"].as_array().unwrap().len(), 5);

        let v = get_json("/api/view?page=guide").await;
        assert_eq!(v["page"], "guide");
        assert!(v["sidebar"]["controls"].is_null());
    }

    #[tokio::test]
    async fn portfolios_follow_filter() {
        let v = get_json("/api/portfolios").await;
        assert_eq!(v["count"], 5);
        let names: Vec<&str> = v["portfolios"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "Growth Fund Alpha",
                "ESG Impact Fund",
                "Real Estate Fund",
                "Conservative Income",
                "Healthcare Plus",
            ]
        );

        let v = get_json("/api/portfolios?min_value=0&max_risk=10").await;
        assert_eq!(v["count"], 7);

        let v = get_json("/api/portfolios?min_value=50&max_risk=1").await;
        assert_eq!(v["count"], 0);
    }

    #[tokio::test]
    async fn sectors_carry_share_percent() {
        let v = get_json("/api/sectors").await;
        let total = v["total_allocation"].as_f64().unwrap();
        assert!((total - 171.7).abs() < 1e-9);

        let sectors = v["sectors"].as_array().unwrap();
        assert_eq!(sectors.len(), 7);
        let pct: f64 = sectors.iter().map(|s| s["percent"].as_f64().unwrap()).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        assert!(sectors[0]["ai_score"].is_number());
    }

    #[tokio::test]
    async fn summary_covers_full_table() {
        let v = get_json("/api/summary").await;
        assert_eq!(v["count"], 7);
        assert_eq!(v["high_performers"], 3);
        assert_eq!(v["best"]["name"], "Technology Focus");
        assert_eq!(v["worst"]["name"], "Emerging Markets Fund");
    }

    #[tokio::test]
    async fn refresh_reloads_dataset() {
        let app = app();
        let (status, body) = call(app.clone(), Method::POST, "/api/refresh").await;
        assert_eq!(status, StatusCode::OK);
        let first: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(first["source"], "demo_dataset");
        assert_eq!(first["portfolios"], 7);
        assert_eq!(first["sectors"], 7);

        let (_, body) = call(app.clone(), Method::POST, "/api/refresh").await;
        let second: serde_json::Value = serde_json::from_str(&body).unwrap();
        let t0: DateTime<Utc> = serde_json::from_value(first["loaded_at"].clone()).unwrap();
        let t1: DateTime<Utc> = serde_json::from_value(second["loaded_at"].clone()).unwrap();
        assert!(t1 >= t0);

        let (status, _) = call(app, Method::GET, "/api/refresh").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    struct EmptyNames;

    #[async_trait::async_trait]
    impl DataSource for EmptyNames {
        fn name(&self) -> &'static str {
            "empty_names"
        }

        async fn load(&self) -> anyhow::Result<Dataset> {
            let mut ds = Dataset::sample();
            ds.portfolios[0].name.clear();
            Ok(ds)
        }
    }

    #[tokio::test]
    async fn invalid_dataset_is_a_server_error() {
        let app = router(AppState {
            cache: Arc::new(DatasetCache::new(Arc::new(EmptyNames))),
            default_filter: FilterParams::default(),
        });
        for uri in ["/", "/api/summary", "/api/portfolios"] {
            let (status, _) = call(app.clone(), Method::GET, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        }
        // Health does not depend on the dataset.
        let (status, _) = call(app, Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
    }
}
