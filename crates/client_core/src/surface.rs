//! Presentation boundary: the named sinks the controller writes structured
//! view models into. Markup and placement live behind this trait.

use crate::{
    catalog::ServiceOption,
    controller::Tab,
    notify::Notice,
    render::{ComparisonView, ProviderListView, SearchView, StatisticsView},
};

pub trait DashboardSurface: Send + Sync {
    /// Loading indicator slot.
    fn set_loading(&self, active: bool);
    /// Message banner slot.
    fn show_notice(&self, notice: &Notice);
    fn clear_notice(&self);
    /// Active-tab marker.
    fn set_active_tab(&self, tab: Tab);
    fn show_search_results(&self, view: &SearchView);
    fn show_provider_list(&self, view: &ProviderListView);
    fn show_comparison(&self, view: &ComparisonView);
    fn show_statistics(&self, view: &StatisticsView);
    /// Both service selectors, rebuilt together.
    fn set_service_options(&self, search: &[ServiceOption], compare: &[ServiceOption]);
    /// Resets the new-provider form fields.
    fn clear_form(&self);
}

/// Discards everything. Stands in where no presentation is attached.
pub struct NullSurface;

impl DashboardSurface for NullSurface {
    fn set_loading(&self, _active: bool) {}
    fn show_notice(&self, _notice: &Notice) {}
    fn clear_notice(&self) {}
    fn set_active_tab(&self, _tab: Tab) {}
    fn show_search_results(&self, _view: &SearchView) {}
    fn show_provider_list(&self, _view: &ProviderListView) {}
    fn show_comparison(&self, _view: &ComparisonView) {}
    fn show_statistics(&self, _view: &StatisticsView) {}
    fn set_service_options(&self, _search: &[ServiceOption], _compare: &[ServiceOption]) {}
    fn clear_form(&self) {}
}
