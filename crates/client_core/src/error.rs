//! Failure taxonomy for directory operations. Every failure is terminal for
//! its operation; callers convert it into a notification and wait for the
//! next user action.

use reqwest::StatusCode;
use thiserror::Error;

use crate::notify::NoticeKind;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Local, pre-network, user-correctable input problem. No request was
    /// issued.
    #[error("{0}")]
    Validation(String),
    /// The service answered, but with a rejection or an undecodable body.
    /// Carries the server-supplied message when one was present.
    #[error("{message}")]
    Remote {
        status: StatusCode,
        message: String,
    },
    /// The request never produced a response.
    #[error("request failed before a response arrived: {0}")]
    Transport(#[source] reqwest::Error),
}

impl DirectoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Notification severity for this failure: validation problems warn,
    /// everything else is an error.
    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            Self::Validation(_) => NoticeKind::Warning,
            Self::Remote { .. } | Self::Transport(_) => NoticeKind::Error,
        }
    }
}
