//! Client-side core of the provider-directory dashboard: the typed
//! directory client, the tab-scoped view-state controller, the form
//! controller, pure renderers, and the shared UI feedback primitives. All
//! domain computation (indexing, search, statistics) happens on the remote
//! service; nothing here computes a search result.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::SortKey,
    error::ErrorBody,
    protocol::{
        ComparisonReport, IdSearchResponse, Provider, SeedResponse, ServiceSearchResponse,
        StatisticsReport,
    },
};
use tracing::debug;

pub mod catalog;
pub mod controller;
pub mod error;
pub mod form;
pub mod notify;
pub mod render;
pub mod signal;
pub mod surface;

#[cfg(test)]
mod tests;

pub use crate::{
    catalog::{SelectorCatalog, ServiceOption},
    controller::{DashboardController, Tab},
    error::DirectoryError,
    form::{FormController, FormInput, FormPhase},
    notify::{Notice, NotificationChannel, NoticeKind},
    signal::{LoadingGuard, UiSignal},
    surface::{DashboardSurface, NullSurface},
};

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// What a search was asked for, kept alongside its outcome for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ByService,
    ById,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub kind: QueryKind,
    pub term: String,
}

/// Result of one search request. Immutable; a newer search supersedes it
/// wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub providers: Vec<Provider>,
    pub elapsed_ms: f64,
    pub total_found: u64,
    pub query: SearchQuery,
}

/// Typed wrapper over the remote directory service. One operation per
/// remote capability; each acquires the loading signal for exactly the
/// duration of its network call, releasing it on every exit path.
pub struct DirectoryClient {
    http: Client,
    base_url: String,
    signal: Arc<UiSignal>,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, signal: Arc<UiSignal>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            signal,
        }
    }

    pub async fn fetch_service_catalog(&self) -> Result<Vec<String>> {
        let _loading = self.signal.begin();
        self.get_json(format!("{}/api/servicios_unicos", self.base_url))
            .await
    }

    pub async fn search_by_service(&self, service: &str) -> Result<SearchOutcome> {
        if service.trim().is_empty() {
            return Err(DirectoryError::validation("select a service to search for"));
        }
        let _loading = self.signal.begin();
        let response: ServiceSearchResponse = self
            .get_json(format!("{}/api/buscar/{service}", self.base_url))
            .await?;
        Ok(SearchOutcome {
            providers: response.providers,
            elapsed_ms: response.elapsed_ms,
            total_found: response.total_found,
            query: SearchQuery {
                kind: QueryKind::ByService,
                term: service.to_string(),
            },
        })
    }

    /// A miss is a successful outcome with `total_found == 0`, not an error.
    pub async fn search_by_id(&self, raw_id: &str) -> Result<SearchOutcome> {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Err(DirectoryError::validation("enter an id to search for"));
        }
        let id: i64 = raw_id
            .parse()
            .map_err(|_| DirectoryError::validation(format!("'{raw_id}' is not a valid provider id")))?;

        let _loading = self.signal.begin();
        let response: IdSearchResponse = self
            .get_json(format!("{}/api/buscar_id/{id}", self.base_url))
            .await?;
        let providers: Vec<Provider> = if response.found {
            response.provider.into_iter().collect()
        } else {
            Vec::new()
        };
        Ok(SearchOutcome {
            total_found: providers.len() as u64,
            providers,
            elapsed_ms: response.elapsed_ms,
            query: SearchQuery {
                kind: QueryKind::ById,
                term: raw_id.to_string(),
            },
        })
    }

    pub async fn list_all(&self, sort: SortKey) -> Result<Vec<Provider>> {
        let _loading = self.signal.begin();
        self.get_json(format!(
            "{}/api/proveedores?orden={}",
            self.base_url,
            sort.as_query_value()
        ))
        .await
    }

    /// Local validation first; a server-side rejection (such as a duplicate
    /// id) comes back as [`DirectoryError::Remote`] with the server message.
    pub async fn create_provider(&self, candidate: &Provider) -> Result<Provider> {
        if candidate.name.trim().is_empty() {
            return Err(DirectoryError::validation("provider name is required"));
        }
        if candidate.service.trim().is_empty() {
            return Err(DirectoryError::validation("service category is required"));
        }
        if !(1.0..=5.0).contains(&candidate.rating) {
            return Err(DirectoryError::validation("rating must be between 1 and 5"));
        }
        let _loading = self.signal.begin();
        let response = self
            .http
            .post(format!("{}/api/proveedores", self.base_url))
            .json(candidate)
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        Self::decode(response).await
    }

    pub async fn compare(&self, service: &str) -> Result<ComparisonReport> {
        if service.trim().is_empty() {
            return Err(DirectoryError::validation("select a service to compare"));
        }
        let _loading = self.signal.begin();
        self.get_json(format!("{}/api/comparar_busqueda/{service}", self.base_url))
            .await
    }

    pub async fn fetch_statistics(&self) -> Result<StatisticsReport> {
        let _loading = self.signal.begin();
        self.get_json(format!("{}/api/estadisticas", self.base_url))
            .await
    }

    /// Triggers server-side sample population. Refreshing the catalog and
    /// the provider list afterwards is the caller's responsibility.
    pub async fn seed_sample_data(&self) -> Result<String> {
        let _loading = self.signal.begin();
        let response = self
            .http
            .post(format!("{}/api/cargar_datos_ejemplo", self.base_url))
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        let seeded: SeedResponse = Self::decode(response).await?;
        Ok(seeded.message)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!(%url, "directory request");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(DirectoryError::Transport)?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|rejection| rejection.error)
                .unwrap_or_else(|_| format!("directory service rejected the request ({status})"));
            return Err(DirectoryError::Remote { status, message });
        }
        serde_json::from_str(&body).map_err(|err| DirectoryError::Remote {
            status,
            message: format!("malformed response from directory service: {err}"),
        })
    }
}
