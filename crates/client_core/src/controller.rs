//! Tab-scoped view-state controller. One network operation per user action;
//! results from a superseded dispatch are fenced off and discarded.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::SortKey;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    catalog::SelectorCatalog,
    error::DirectoryError,
    notify::{NotificationChannel, NoticeKind},
    render,
    surface::DashboardSurface,
    DirectoryClient,
};

/// Dashboard tabs. `BrowseAll` and `Statistics` derive their content from
/// the remote service and re-fetch on every activation; the rest render
/// static content and trigger no network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    BrowseAll,
    AddProvider,
    Compare,
    Statistics,
}

impl Tab {
    pub fn slug(self) -> &'static str {
        match self {
            Tab::Search => "buscar",
            Tab::BrowseAll => "todos",
            Tab::AddProvider => "agregar",
            Tab::Compare => "comparar",
            Tab::Statistics => "estadisticas",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "buscar" => Some(Tab::Search),
            "todos" => Some(Tab::BrowseAll),
            "agregar" => Some(Tab::AddProvider),
            "comparar" => Some(Tab::Compare),
            "estadisticas" => Some(Tab::Statistics),
            _ => None,
        }
    }
}

/// One fence per remote-derived view. A refresh takes a ticket at dispatch
/// time and applies its result only while that ticket is still the newest
/// issued; a stale result is discarded silently.
#[derive(Default)]
struct ViewFence {
    issued: AtomicU64,
}

impl ViewFence {
    fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket
    }
}

#[derive(Default)]
struct Fences {
    catalog: ViewFence,
    providers: ViewFence,
    statistics: ViewFence,
    search: ViewFence,
    comparison: ViewFence,
}

struct ControllerState {
    active_tab: Tab,
    sort_key: SortKey,
}

pub struct DashboardController {
    client: Arc<DirectoryClient>,
    surface: Arc<dyn DashboardSurface>,
    notices: Arc<NotificationChannel>,
    selectors: SelectorCatalog,
    state: Mutex<ControllerState>,
    fences: Fences,
}

impl DashboardController {
    pub fn new(
        client: Arc<DirectoryClient>,
        surface: Arc<dyn DashboardSurface>,
        notices: Arc<NotificationChannel>,
        initial_sort: SortKey,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            surface,
            notices,
            selectors: SelectorCatalog::new(),
            state: Mutex::new(ControllerState {
                active_tab: Tab::Search,
                sort_key: initial_sort,
            }),
            fences: Fences::default(),
        })
    }

    /// Page bootstrap: load the service catalog and the provider list, then
    /// show the default tab.
    pub async fn start(&self) {
        self.refresh_catalog().await;
        self.refresh_providers().await;
        self.activate(Tab::Search).await;
    }

    /// Deactivates every other tab, activates `tab`, and refreshes its
    /// content when that content derives from the remote service.
    /// Re-activating the active tab still re-fetches; a refresh failure
    /// surfaces a notification but never reverts the activation.
    pub async fn activate(&self, tab: Tab) {
        {
            let mut state = self.state.lock().await;
            state.active_tab = tab;
        }
        self.surface.set_active_tab(tab);
        debug!(tab = tab.slug(), "tab activated");
        match tab {
            Tab::BrowseAll => self.refresh_providers().await,
            Tab::Statistics => self.refresh_statistics().await,
            Tab::Search | Tab::AddProvider | Tab::Compare => {}
        }
    }

    pub async fn active_tab(&self) -> Tab {
        self.state.lock().await.active_tab
    }

    pub async fn sort_key(&self) -> SortKey {
        self.state.lock().await.sort_key
    }

    /// Stores the new ordering and re-fetches the provider list with it.
    pub async fn set_sort_key(&self, sort: SortKey) {
        {
            self.state.lock().await.sort_key = sort;
        }
        self.refresh_providers().await;
    }

    pub async fn refresh_catalog(&self) {
        let ticket = self.fences.catalog.ticket();
        match self.client.fetch_service_catalog().await {
            Ok(services) => {
                if !self.fences.catalog.is_current(ticket) {
                    debug!(ticket, view = "catalog", "stale refresh discarded");
                    return;
                }
                let (search, compare) = self.selectors.rebuild(&services).await;
                self.surface.set_service_options(&search, &compare);
            }
            Err(err) => self.report(err, "failed to load the service catalog").await,
        }
    }

    pub async fn refresh_providers(&self) {
        let sort = { self.state.lock().await.sort_key };
        let ticket = self.fences.providers.ticket();
        match self.client.list_all(sort).await {
            Ok(providers) => {
                if !self.fences.providers.is_current(ticket) {
                    debug!(ticket, view = "providers", "stale refresh discarded");
                    return;
                }
                self.surface
                    .show_provider_list(&render::provider_list_view(&providers));
            }
            Err(err) => self.report(err, "failed to load providers").await,
        }
    }

    pub async fn refresh_statistics(&self) {
        let ticket = self.fences.statistics.ticket();
        match self.client.fetch_statistics().await {
            Ok(report) => {
                if !self.fences.statistics.is_current(ticket) {
                    debug!(ticket, view = "statistics", "stale refresh discarded");
                    return;
                }
                self.surface
                    .show_statistics(&render::statistics_view(&report));
            }
            Err(err) => self.report(err, "failed to load statistics").await,
        }
    }

    pub async fn run_service_search(&self, service: &str) {
        let ticket = self.fences.search.ticket();
        match self.client.search_by_service(service).await {
            Ok(outcome) => {
                if !self.fences.search.is_current(ticket) {
                    debug!(ticket, view = "search", "stale result discarded");
                    return;
                }
                self.surface.show_search_results(&render::search_view(&outcome));
            }
            Err(err) => self.report(err, "search failed").await,
        }
    }

    pub async fn run_id_search(&self, raw_id: &str) {
        let ticket = self.fences.search.ticket();
        match self.client.search_by_id(raw_id).await {
            Ok(outcome) => {
                if !self.fences.search.is_current(ticket) {
                    debug!(ticket, view = "search", "stale result discarded");
                    return;
                }
                self.surface.show_search_results(&render::search_view(&outcome));
            }
            Err(err) => self.report(err, "search failed").await,
        }
    }

    pub async fn run_comparison(&self, service: &str) {
        let ticket = self.fences.comparison.ticket();
        match self.client.compare(service).await {
            Ok(report) => {
                if !self.fences.comparison.is_current(ticket) {
                    debug!(ticket, view = "comparison", "stale result discarded");
                    return;
                }
                self.surface
                    .show_comparison(&render::comparison_view(&report, service));
            }
            Err(err) => self.report(err, "comparison failed").await,
        }
    }

    /// Populates the server-side sample data set. The seed endpoint leaves
    /// the catalog and the provider list stale, so both are re-fetched here
    /// on success.
    pub async fn seed_sample_data(&self) {
        match self.client.seed_sample_data().await {
            Ok(message) => {
                self.notices.show(message, NoticeKind::Success).await;
                self.refresh_catalog().await;
                self.refresh_providers().await;
            }
            Err(err) => self.report(err, "failed to load sample data").await,
        }
    }

    /// Converts an operation failure into a banner message. Validation
    /// failures speak for themselves; everything else gets its context.
    async fn report(&self, err: DirectoryError, context: &str) {
        warn!(error = %err, context, "directory operation failed");
        let kind = err.notice_kind();
        let text = match &err {
            DirectoryError::Validation(message) => message.clone(),
            _ => format!("{context}: {err}"),
        };
        self.notices.show(text, kind).await;
    }
}
