//! Wire payloads of the remote directory service. Field names on the wire
//! are the service's own (Spanish) identifiers; Rust-side names stay
//! idiomatic via serde renames.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::ProviderId;

/// A directory entry exactly as the service serializes it. Also the request
/// body of a provider creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Lower-cased category key.
    #[serde(rename = "servicio")]
    pub service: String,
    /// Rating in `[1, 5]`.
    #[serde(rename = "calificacion")]
    pub rating: f64,
}

/// Response of `GET /api/buscar/{service}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSearchResponse {
    #[serde(rename = "resultados")]
    pub providers: Vec<Provider>,
    #[serde(rename = "tiempo_busqueda")]
    pub elapsed_ms: f64,
    #[serde(rename = "total_encontrados")]
    pub total_found: u64,
}

/// Response of `GET /api/buscar_id/{id}`. On a miss the service sends
/// `encontrado: false` with no `resultado` and a human-readable `mensaje`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdSearchResponse {
    #[serde(rename = "encontrado")]
    pub found: bool,
    #[serde(rename = "resultado", default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(rename = "tiempo_busqueda")]
    pub elapsed_ms: f64,
    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Measurements of one search strategy in a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    #[serde(rename = "tiempo")]
    pub elapsed_ms: f64,
    #[serde(rename = "total")]
    pub total_found: u64,
}

/// Response of `GET /api/comparar_busqueda/{service}`. A speedup factor
/// above 1 means the indexed strategy beat the linear scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(rename = "arbol_b")]
    pub tree: StrategyMetrics,
    #[serde(rename = "busqueda_lineal")]
    pub linear: StrategyMetrics,
    #[serde(rename = "mejora_rendimiento")]
    pub speedup_factor: f64,
}

/// Response of `GET /api/estadisticas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    #[serde(rename = "total_proveedores")]
    pub total_providers: u64,
    #[serde(rename = "total_nodos")]
    pub total_nodes: u64,
    #[serde(rename = "altura")]
    pub tree_height: u32,
    #[serde(rename = "grado")]
    pub tree_degree: u32,
    /// Provider count per service key. Iteration order is not defined.
    #[serde(rename = "servicios_disponibles")]
    pub per_service_counts: HashMap<String, u64>,
}

/// Response of `POST /api/cargar_datos_ejemplo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    #[serde(rename = "mensaje")]
    pub message: String,
}
