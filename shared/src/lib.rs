//! Headless core for the attraction listing and detail views.
//!
//! The shell delivers [`Event`]s, the core mutates its [`Model`] and asks the
//! shell for side effects through [`Capabilities`]. The listing feed is
//! driven by [`feed::FeedController`], which fences every page request with a
//! generation so that late responses for superseded filters never reach the
//! screen.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod cards;
pub mod carousel;
pub mod config;
pub mod detail;
pub mod event;
pub mod feed;
pub mod filters;
pub mod gateway;
pub mod model;
pub mod sentinel;
pub mod view;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::ApiConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::Model;
pub use view::ViewModel;

pub const ATTRACTIONS_PATH: &str = "/api/attractions";
pub const ATTRACTION_PATH: &str = "/api/attraction";
pub const CATEGORIES_PATH: &str = "/api/categories";
pub const MRTS_PATH: &str = "/api/mrts";
pub const ATTRACTION_PAGE_PATH: &str = "/attraction";
pub const FIRST_PAGE: u32 = 0;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const SENTINEL_TARGET: &str = "attraction-feed-sentinel";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load attractions. Please try again later.";
pub const INVALID_ID_MESSAGE: &str = "Invalid attraction id.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Transport,
    Decode,
    InvalidInput,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT_ERROR",
            Self::Decode => "DECODE_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
        }
    }
}

/// Failure taxonomy shared by the gateway, the feed and the detail view.
///
/// Transport and decode failures are handled identically by the feed: the
/// generation becomes terminal and one message is shown.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("[{}] {message}", .kind.code())]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
    pub http_status: Option<u16>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
            http_status: None,
        }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Transport | ErrorKind::Decode => LOAD_FAILED_MESSAGE.into(),
            ErrorKind::InvalidInput => self.message.clone(),
        }
    }

    /// Builds a transport error from a non-success status, preferring the
    /// server's `{ "error": true, "message": ... }` body when present.
    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        Self::transport(message).with_status(status)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
}

pub type AppResult<T> = Result<T, AppError>;
