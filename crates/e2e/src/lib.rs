//! restprobe E2E checks
//!
//! This crate drives end-to-end checks against two public user APIs and
//! one landing page:
//! - reqres: unauthenticated list/get/create calls with body assertions
//! - GoRest: an authenticated create -> update -> delete flow that carries
//!   the created user id and a bearer token between calls
//! - the reqres landing page, read through a browser driver
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   TestRunner (sequential)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ReqresChecks ──────────┐                                   │
//! │  UserFlow ──────────────┼── ApiClient (reqwest, timeout)    │
//! │    └── CreatedUser { Unset | Set(id) }                      │
//! │  HomePageCheck ──── dyn BrowserDriver ── PlaywrightDriver   │
//! │  front_end_and_api = HomePageCheck + ReqresChecks           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod client;
pub mod combined;
pub mod error;
pub mod fixtures;
pub mod reqres;
pub mod runner;
pub mod users;

pub use browser::{BrowserDriver, HomePageCheck, PlaywrightDriver};
pub use client::{ApiClient, ApiResponse};
pub use error::{E2eError, E2eResult};
pub use fixtures::{RandomUsers, UserSource};
pub use reqres::ReqresChecks;
pub use runner::{Check, TestRunner, TestSuiteResult};
pub use users::{CreatedUser, UserFlow};
