//! Pure mapping from response payloads to render-ready view models. No
//! network and no shared state; the surface decides how these are shown.

use shared::protocol::{ComparisonReport, Provider, StatisticsReport};

use crate::{QueryKind, SearchOutcome};

pub const RATING_GLYPH_COUNT: usize = 5;
const FILLED_GLYPH: char = '★';
const EMPTY_GLYPH: char = '☆';

/// Capitalized form of a lower-case catalog key, for display only.
pub fn display_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCard {
    pub id: i64,
    pub name: String,
    pub service_label: String,
    pub rating: f64,
    /// Five glyphs, filled then empty, left to right.
    pub rating_glyphs: String,
}

pub fn provider_card(provider: &Provider) -> ProviderCard {
    // round-half-away-from-zero, per the displayed 1..=5 scale
    let filled = provider.rating.round().clamp(0.0, RATING_GLYPH_COUNT as f64) as usize;
    let mut rating_glyphs = String::new();
    for position in 1..=RATING_GLYPH_COUNT {
        rating_glyphs.push(if position <= filled {
            FILLED_GLYPH
        } else {
            EMPTY_GLYPH
        });
    }
    ProviderCard {
        id: provider.id.0,
        name: provider.name.clone(),
        service_label: display_label(&provider.service),
        rating: provider.rating,
        rating_glyphs,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHeader {
    pub kind: QueryKind,
    pub term: String,
    pub total_found: u64,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchBody {
    /// Nothing matched; the body is a placeholder, never an empty grid.
    NoResults,
    Cards(Vec<ProviderCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub header: SearchHeader,
    pub body: SearchBody,
}

pub fn search_view(outcome: &SearchOutcome) -> SearchView {
    let header = SearchHeader {
        kind: outcome.query.kind,
        term: outcome.query.term.clone(),
        total_found: outcome.total_found,
        elapsed_ms: outcome.elapsed_ms,
    };
    let body = if outcome.total_found == 0 {
        SearchBody::NoResults
    } else {
        SearchBody::Cards(outcome.providers.iter().map(provider_card).collect())
    };
    SearchView { header, body }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderListView {
    /// The directory holds no providers yet.
    Empty,
    Cards(Vec<ProviderCard>),
}

pub fn provider_list_view(providers: &[Provider]) -> ProviderListView {
    if providers.is_empty() {
        ProviderListView::Empty
    } else {
        ProviderListView::Cards(providers.iter().map(provider_card).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonHeadline {
    /// The indexed strategy won; the factor is preformatted to two decimals.
    Faster { factor_label: String },
    Comparable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsBlock {
    pub strategy: String,
    pub elapsed_ms: f64,
    pub total_found: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub service_label: String,
    pub headline: ComparisonHeadline,
    pub tree: MetricsBlock,
    pub linear: MetricsBlock,
}

pub fn comparison_view(report: &ComparisonReport, service: &str) -> ComparisonView {
    // boundary at exactly 1: equal performance is "comparable"
    let headline = if report.speedup_factor > 1.0 {
        ComparisonHeadline::Faster {
            factor_label: format!("{:.2}", report.speedup_factor),
        }
    } else {
        ComparisonHeadline::Comparable
    };
    ComparisonView {
        service_label: display_label(service),
        headline,
        tree: MetricsBlock {
            strategy: "B-tree index".to_string(),
            elapsed_ms: report.tree.elapsed_ms,
            total_found: report.tree.total_found,
        },
        linear: MetricsBlock {
            strategy: "Linear scan".to_string(),
            elapsed_ms: report.linear.elapsed_ms,
            total_found: report.linear.total_found,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCountLine {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    pub total_providers: u64,
    pub total_nodes: u64,
    pub tree_height: u32,
    pub tree_degree: u32,
    /// One line per catalog entry, in map iteration order.
    pub per_service: Vec<ServiceCountLine>,
    pub min_keys_per_node: u32,
    pub max_keys_per_node: u32,
}

pub fn statistics_view(report: &StatisticsReport) -> StatisticsView {
    let per_service = report
        .per_service_counts
        .iter()
        .map(|(key, count)| ServiceCountLine {
            label: display_label(key),
            count: *count,
        })
        .collect();
    StatisticsView {
        total_providers: report.total_providers,
        total_nodes: report.total_nodes,
        tree_height: report.tree_height,
        tree_degree: report.tree_degree,
        per_service,
        min_keys_per_node: report.tree_degree.saturating_sub(1),
        max_keys_per_node: (2 * report.tree_degree).saturating_sub(1),
    }
}
