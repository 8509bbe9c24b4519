//! Shared fixtures: an in-process stand-in for the directory service and a
//! recording surface implementation.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::ProviderId,
    error::ErrorBody,
    protocol::{
        ComparisonReport, IdSearchResponse, Provider, SeedResponse, ServiceSearchResponse,
        StatisticsReport, StrategyMetrics,
    },
};

use crate::{
    catalog::ServiceOption,
    controller::Tab,
    notify::Notice,
    render::{ComparisonView, ProviderListView, SearchView, StatisticsView},
    surface::DashboardSurface,
};

pub fn provider(id: i64, name: &str, service: &str, rating: f64) -> Provider {
    Provider {
        id: ProviderId(id),
        name: name.to_string(),
        service: service.to_string(),
        rating,
    }
}

pub fn sample_providers() -> Vec<Provider> {
    vec![
        provider(1, "Acme Plumbing", "plumbing", 4.5),
        provider(2, "Brightspark Electric", "electrical", 3.9),
        provider(3, "Cedar Carpentry", "carpentry", 2.2),
    ]
}

/// State behind the stand-in service. The request log records method, path
/// and query in arrival order so tests can assert call counts and ordering.
#[derive(Default)]
pub struct DirectoryState {
    pub providers: Mutex<Vec<Provider>>,
    pub requests: Mutex<Vec<String>>,
    /// Extra latency for upcoming list requests, consumed front to back.
    pub list_delays: Mutex<Vec<Duration>>,
    /// When set, list requests answer 500 with this message.
    pub list_error: Mutex<Option<String>>,
}

impl DirectoryState {
    pub fn with_providers(providers: Vec<Provider>) -> Arc<Self> {
        let state = Self::default();
        *state.providers.lock().unwrap() = providers;
        Arc::new(state)
    }

    fn log(&self, entry: impl Into<String>) {
        self.requests.lock().unwrap().push(entry.into());
    }

    pub fn request_log(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }
}

async fn unique_services(State(state): State<Arc<DirectoryState>>) -> Json<Vec<String>> {
    state.log("GET /api/servicios_unicos");
    let providers = state.providers.lock().unwrap();
    let mut services: Vec<String> = providers.iter().map(|p| p.service.clone()).collect();
    services.sort();
    services.dedup();
    Json(services)
}

async fn list_providers(
    State(state): State<Arc<DirectoryState>>,
    Query(params): Query<BTreeMap<String, String>>,
) -> impl IntoResponse {
    let orden = params
        .get("orden")
        .cloned()
        .unwrap_or_else(|| "nombre".to_string());
    state.log(format!("GET /api/proveedores?orden={orden}"));

    if let Some(message) = state.list_error.lock().unwrap().clone() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::to_value(ErrorBody::new(message)).unwrap()),
        );
    }

    let delay = {
        let mut delays = state.list_delays.lock().unwrap();
        if delays.is_empty() {
            None
        } else {
            Some(delays.remove(0))
        }
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut providers = state.providers.lock().unwrap().clone();
    match orden.as_str() {
        "calificacion" => providers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        "servicio" => providers.sort_by(|a, b| a.service.cmp(&b.service)),
        _ => providers.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    (StatusCode::OK, Json(serde_json::to_value(providers).unwrap()))
}

async fn create_provider(
    State(state): State<Arc<DirectoryState>>,
    Json(candidate): Json<Provider>,
) -> impl IntoResponse {
    state.log("POST /api/proveedores");
    let mut providers = state.providers.lock().unwrap();
    if providers.iter().any(|p| p.id == candidate.id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::to_value(ErrorBody::new("provider id already exists")).unwrap()),
        );
    }
    providers.push(candidate.clone());
    (
        StatusCode::CREATED,
        Json(serde_json::to_value(&candidate).unwrap()),
    )
}

async fn search_by_service(
    State(state): State<Arc<DirectoryState>>,
    Path(service): Path<String>,
) -> Json<ServiceSearchResponse> {
    state.log(format!("GET /api/buscar/{service}"));
    let providers: Vec<Provider> = state
        .providers
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.service == service)
        .cloned()
        .collect();
    Json(ServiceSearchResponse {
        total_found: providers.len() as u64,
        providers,
        elapsed_ms: 0.42,
    })
}

async fn search_by_id(
    State(state): State<Arc<DirectoryState>>,
    Path(id): Path<i64>,
) -> Json<IdSearchResponse> {
    state.log(format!("GET /api/buscar_id/{id}"));
    let provider = state
        .providers
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.id.0 == id)
        .cloned();
    Json(IdSearchResponse {
        found: provider.is_some(),
        message: provider
            .is_none()
            .then(|| "provider not found".to_string()),
        provider,
        elapsed_ms: 0.11,
    })
}

async fn compare_search(
    State(state): State<Arc<DirectoryState>>,
    Path(service): Path<String>,
) -> Json<ComparisonReport> {
    state.log(format!("GET /api/comparar_busqueda/{service}"));
    let total_found = state
        .providers
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.service == service)
        .count() as u64;
    Json(ComparisonReport {
        tree: StrategyMetrics {
            elapsed_ms: 0.2,
            total_found,
        },
        linear: StrategyMetrics {
            elapsed_ms: 0.5,
            total_found,
        },
        speedup_factor: 2.5,
    })
}

async fn statistics(State(state): State<Arc<DirectoryState>>) -> Json<StatisticsReport> {
    state.log("GET /api/estadisticas");
    let providers = state.providers.lock().unwrap();
    let mut per_service_counts: HashMap<String, u64> = HashMap::new();
    for p in providers.iter() {
        *per_service_counts.entry(p.service.clone()).or_insert(0) += 1;
    }
    Json(StatisticsReport {
        total_providers: providers.len() as u64,
        total_nodes: providers.len() as u64,
        tree_height: 2,
        tree_degree: 3,
        per_service_counts,
    })
}

async fn seed_sample_data(State(state): State<Arc<DirectoryState>>) -> Json<SeedResponse> {
    state.log("POST /api/cargar_datos_ejemplo");
    *state.providers.lock().unwrap() = sample_providers();
    Json(SeedResponse {
        message: "Sample data loaded".to_string(),
    })
}

/// Serves the stand-in directory on an ephemeral port; returns its base URL.
pub async fn spawn_directory_server(state: Arc<DirectoryState>) -> String {
    let app = Router::new()
        .route("/api/servicios_unicos", get(unique_services))
        .route("/api/proveedores", get(list_providers).post(create_provider))
        .route("/api/buscar/:service", get(search_by_service))
        .route("/api/buscar_id/:id", get(search_by_id))
        .route("/api/comparar_busqueda/:service", get(compare_search))
        .route("/api/estadisticas", get(statistics))
        .route("/api/cargar_datos_ejemplo", post(seed_sample_data))
        .with_state(state);
    spawn_router(app).await
}

/// Serves an arbitrary router on an ephemeral port; returns its base URL.
pub async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Records every sink write so tests can assert what reached presentation.
#[derive(Default)]
pub struct RecordingSurface {
    pub loading_events: Mutex<Vec<bool>>,
    pub notices: Mutex<Vec<Notice>>,
    pub notice_clears: AtomicUsize,
    pub active_tabs: Mutex<Vec<Tab>>,
    pub search_views: Mutex<Vec<SearchView>>,
    pub provider_lists: Mutex<Vec<ProviderListView>>,
    pub comparisons: Mutex<Vec<ComparisonView>>,
    pub statistics: Mutex<Vec<StatisticsView>>,
    pub selector_updates: Mutex<Vec<(Vec<ServiceOption>, Vec<ServiceOption>)>>,
    pub form_clears: AtomicUsize,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn last_provider_list(&self) -> Option<ProviderListView> {
        self.provider_lists.lock().unwrap().last().cloned()
    }
}

impl DashboardSurface for RecordingSurface {
    fn set_loading(&self, active: bool) {
        self.loading_events.lock().unwrap().push(active);
    }

    fn show_notice(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn clear_notice(&self) {
        self.notice_clears.fetch_add(1, Ordering::SeqCst);
    }

    fn set_active_tab(&self, tab: Tab) {
        self.active_tabs.lock().unwrap().push(tab);
    }

    fn show_search_results(&self, view: &SearchView) {
        self.search_views.lock().unwrap().push(view.clone());
    }

    fn show_provider_list(&self, view: &ProviderListView) {
        self.provider_lists.lock().unwrap().push(view.clone());
    }

    fn show_comparison(&self, view: &ComparisonView) {
        self.comparisons.lock().unwrap().push(view.clone());
    }

    fn show_statistics(&self, view: &StatisticsView) {
        self.statistics.lock().unwrap().push(view.clone());
    }

    fn set_service_options(&self, search: &[ServiceOption], compare: &[ServiceOption]) {
        self.selector_updates
            .lock()
            .unwrap()
            .push((search.to_vec(), compare.to_vec()));
    }

    fn clear_form(&self) {
        self.form_clears.fetch_add(1, Ordering::SeqCst);
    }
}
