use serde::{Deserialize, Serialize};

/// Caller-supplied unique key of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub i64);

/// Sort orders accepted by the provider listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Service,
}

impl SortKey {
    /// Value of the `orden` query parameter for this key.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Name => "nombre",
            SortKey::Rating => "calificacion",
            SortKey::Service => "servicio",
        }
    }

    pub fn from_arg(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "nombre" => Some(SortKey::Name),
            "rating" | "calificacion" => Some(SortKey::Rating),
            "service" | "servicio" => Some(SortKey::Service),
            _ => None,
        }
    }
}
