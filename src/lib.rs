//! Country Lens - country metadata aggregated from public APIs.
//!
//! # Overview
//!
//! Country Lens serves two things to a browser front end:
//!
//! - a directory of every known country, passed through from Nager.Date
//! - a per-country profile that merges identity and borders (Nager.Date),
//!   population history and flag image (CountriesNow)
//!
//! Every profile is assembled fresh per request. Nothing is cached or
//! persisted, and nothing is retried.
//!
//! # Modules
//!
//! - [`model`]: Wire types for summaries, profiles and upstream records
//! - [`data_sources`]: Provider ports and their reqwest clients
//! - [`directory`]: Country listing
//! - [`aggregation`]: Profile assembly with per-stage degradation
//! - [`matching`]: Name joins across providers
//! - [`error`]: Error taxonomy and HTTP mapping
//! - [`config`]: Startup configuration
//! - [`api`]: HTTP API handlers and router

pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_sources;
pub mod directory;
pub mod error;
pub mod matching;
pub mod model;
