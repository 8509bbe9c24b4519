//! New-provider form: local validation, submission, dependent refreshes.

use std::sync::Arc;

use shared::{domain::ProviderId, protocol::Provider};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    controller::DashboardController,
    error::DirectoryError,
    notify::{NotificationChannel, NoticeKind},
    surface::DashboardSurface,
    DirectoryClient,
};

/// Raw field contents as captured from the form inputs.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub id: String,
    pub name: String,
    pub service: String,
    pub rating: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("all fields are required")]
    MissingField,
    #[error("provider id must be an integer")]
    InvalidId,
    #[error("rating must be a number between 1 and 5")]
    InvalidRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

/// Submission machine: Idle -> Validating -> Submitting -> Idle. Both
/// success and failure return to Idle; a validation failure never reaches
/// the network.
pub struct FormController {
    client: Arc<DirectoryClient>,
    controller: Arc<DashboardController>,
    surface: Arc<dyn DashboardSurface>,
    notices: Arc<NotificationChannel>,
    phase: Mutex<FormPhase>,
}

impl FormController {
    pub fn new(
        client: Arc<DirectoryClient>,
        controller: Arc<DashboardController>,
        surface: Arc<dyn DashboardSurface>,
        notices: Arc<NotificationChannel>,
    ) -> Self {
        Self {
            client,
            controller,
            surface,
            notices,
            phase: Mutex::new(FormPhase::Idle),
        }
    }

    /// Validates raw input without touching the network. The service key is
    /// lower-cased here; the server stores it that way.
    pub fn validate(input: &FormInput) -> Result<Provider, FormError> {
        let name = input.name.trim();
        let service = input.service.trim();
        if name.is_empty() || service.is_empty() {
            return Err(FormError::MissingField);
        }
        let id: i64 = input.id.trim().parse().map_err(|_| FormError::InvalidId)?;
        let rating: f64 = input
            .rating
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidRating)?;
        if !(1.0..=5.0).contains(&rating) {
            return Err(FormError::InvalidRating);
        }
        Ok(Provider {
            id: ProviderId(id),
            name: name.to_string(),
            service: service.to_lowercase(),
            rating,
        })
    }

    pub async fn phase(&self) -> FormPhase {
        *self.phase.lock().await
    }

    pub async fn submit(&self, input: FormInput) {
        {
            *self.phase.lock().await = FormPhase::Validating;
        }
        let candidate = match Self::validate(&input) {
            Ok(candidate) => candidate,
            Err(err) => {
                *self.phase.lock().await = FormPhase::Idle;
                self.notices.show(err.to_string(), NoticeKind::Warning).await;
                return;
            }
        };

        {
            *self.phase.lock().await = FormPhase::Submitting;
        }
        let result = self.client.create_provider(&candidate).await;
        {
            *self.phase.lock().await = FormPhase::Idle;
        }
        match result {
            Ok(created) => {
                info!(id = created.id.0, service = %created.service, "provider created");
                self.surface.clear_form();
                self.notices
                    .show("Provider added successfully", NoticeKind::Success)
                    .await;
                self.controller.refresh_catalog().await;
                self.controller.refresh_providers().await;
            }
            Err(err) => {
                let kind = err.notice_kind();
                let text = match &err {
                    DirectoryError::Remote { message, .. } => message.clone(),
                    DirectoryError::Validation(message) => message.clone(),
                    DirectoryError::Transport(_) => "failed to add the provider".to_string(),
                };
                self.notices.show(text, kind).await;
            }
        }
    }
}
