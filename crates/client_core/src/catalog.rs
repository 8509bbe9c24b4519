//! Service-name catalog backing the two selection controls.

use tokio::sync::Mutex;

use crate::render::display_label;

/// One entry of a selection control. The value is the lower-case key used in
/// request paths; the label is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOption {
    pub value: String,
    pub label: String,
}

pub const PLACEHOLDER_LABEL: &str = "Select a service";

impl ServiceOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

#[derive(Default)]
struct Slots {
    search: Vec<ServiceOption>,
    compare: Vec<ServiceOption>,
}

/// Two presentation-bound copies of the service catalog, one per selection
/// control. Both are rebuilt together on every refresh, so they are
/// identical immediately afterwards.
pub struct SelectorCatalog {
    slots: Mutex<Slots>,
}

impl SelectorCatalog {
    pub fn new() -> Self {
        let initial = vec![ServiceOption::placeholder()];
        Self {
            slots: Mutex::new(Slots {
                search: initial.clone(),
                compare: initial,
            }),
        }
    }

    /// Rebuilds both copies from a fetched catalog, discarding prior entries.
    /// Duplicate keys are dropped, first occurrence wins. Returns the new
    /// copies for handing to the surface.
    pub async fn rebuild(&self, services: &[String]) -> (Vec<ServiceOption>, Vec<ServiceOption>) {
        let mut options = Vec::with_capacity(services.len() + 1);
        options.push(ServiceOption::placeholder());
        for service in services {
            if options.iter().any(|option| option.value == *service) {
                continue;
            }
            options.push(ServiceOption {
                value: service.clone(),
                label: display_label(service),
            });
        }

        let mut slots = self.slots.lock().await;
        slots.search = options.clone();
        slots.compare = options;
        (slots.search.clone(), slots.compare.clone())
    }

    pub async fn search_options(&self) -> Vec<ServiceOption> {
        self.slots.lock().await.search.clone()
    }

    pub async fn compare_options(&self) -> Vec<ServiceOption> {
        self.slots.lock().await.compare.clone()
    }
}

impl Default for SelectorCatalog {
    fn default() -> Self {
        Self::new()
    }
}
