//! Console implementation of the presentation boundary: each named sink
//! becomes a block of plain text on stdout.

use client_core::{
    render::{ComparisonHeadline, ComparisonView, ProviderCard, ProviderListView, SearchBody,
        SearchView, StatisticsView},
    DashboardSurface, Notice, NoticeKind, QueryKind, ServiceOption, Tab,
};

pub struct ConsoleSurface;

impl ConsoleSurface {
    pub fn new() -> Self {
        Self
    }

    fn print_card(card: &ProviderCard) {
        println!("  {} (id {})", card.name, card.id);
        println!("    service: {}", card.service_label);
        println!("    rating:  {} {}/5", card.rating_glyphs, card.rating);
    }
}

impl DashboardSurface for ConsoleSurface {
    fn set_loading(&self, active: bool) {
        if active {
            println!("(loading...)");
        }
    }

    fn show_notice(&self, notice: &Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Warning => "warn",
            NoticeKind::Error => "error",
        };
        println!("[{tag}] {}", notice.text);
    }

    fn clear_notice(&self) {}

    fn set_active_tab(&self, tab: Tab) {
        println!("== {} ==", tab.slug());
    }

    fn show_search_results(&self, view: &SearchView) {
        let kind = match view.header.kind {
            QueryKind::ByService => "service",
            QueryKind::ById => "id",
        };
        println!(
            "search by {kind} \"{}\": {} found in {} ms",
            view.header.term, view.header.total_found, view.header.elapsed_ms
        );
        match &view.body {
            SearchBody::NoResults => println!("  no providers found"),
            SearchBody::Cards(cards) => {
                for card in cards {
                    Self::print_card(card);
                }
            }
        }
    }

    fn show_provider_list(&self, view: &ProviderListView) {
        match view {
            ProviderListView::Empty => println!("no providers registered yet"),
            ProviderListView::Cards(cards) => {
                println!("{} providers:", cards.len());
                for card in cards {
                    Self::print_card(card);
                }
            }
        }
    }

    fn show_comparison(&self, view: &ComparisonView) {
        println!("comparison for {}", view.service_label);
        match &view.headline {
            ComparisonHeadline::Faster { factor_label } => {
                println!("  the B-tree index was {factor_label}x faster");
            }
            ComparisonHeadline::Comparable => {
                println!("  both strategies performed comparably");
            }
        }
        for block in [&view.tree, &view.linear] {
            println!(
                "  {}: {} ms, {} found",
                block.strategy, block.elapsed_ms, block.total_found
            );
        }
    }

    fn show_statistics(&self, view: &StatisticsView) {
        println!(
            "providers: {}  nodes: {}  height: {}  degree: {}",
            view.total_providers, view.total_nodes, view.tree_height, view.tree_degree
        );
        for line in &view.per_service {
            println!("  {}: {}", line.label, line.count);
        }
        println!(
            "  each node holds between {} and {} keys",
            view.min_keys_per_node, view.max_keys_per_node
        );
    }

    fn set_service_options(&self, search: &[ServiceOption], _compare: &[ServiceOption]) {
        let names: Vec<&str> = search
            .iter()
            .filter(|option| !option.value.is_empty())
            .map(|option| option.label.as_str())
            .collect();
        println!("services: {}", names.join(", "));
    }

    fn clear_form(&self) {}
}
