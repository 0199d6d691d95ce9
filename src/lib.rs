//! pr-backport: backport merged pull requests onto release branches
//!
//! The library works out how a PR was merged (squash, merge commit or
//! rebase), rebuilds the exact commits to replay, cherry-picks them onto a
//! fresh branch off the release branch and opens the backport PR.
//!
//! - [`cherrypick`] - planning and execution engine, [`cherrypick::CherryPicker`]
//! - [`platform`] - source-hosting API ([`platform::PlatformService`], GitHub)
//! - [`git`] - local git execution ([`git::GitBackend`])
//! - [`config`] - per-invocation options
//! - [`auth`] - GitHub token discovery

pub mod auth;
pub mod cherrypick;
pub mod config;
pub mod error;
pub mod git;
pub mod platform;
pub mod types;

pub use error::{Error, Result};
