//! Campus seed: initial catalog, queues and feed loaded from YAML.
//!
//! The default seed is compiled in; `CAMPUS_SEED` points at a replacement
//! file. Every section is optional.

use std::path::Path;

use serde::Deserialize;

use super::catalog::{Book, Equipment, Hall, StudyRoom};
use super::feed::{ConnectPost, Post};
use super::ledger::{Redemption, Reward};
use super::requests::{Event, EventRequest, ResourceRequest};

pub const DEFAULT_SEED: &str = include_str!("../../seed/campus.yaml");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid seed: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Seed {
    pub books: Vec<Book>,
    pub equipment: Vec<Equipment>,
    pub study_rooms: Vec<StudyRoom>,
    pub halls: Vec<Hall>,
    pub events: Vec<Event>,
    pub event_requests: Vec<EventRequest>,
    pub resource_requests: Vec<ResourceRequest>,
    pub rewards: Vec<Reward>,
    pub redemptions: Vec<Redemption>,
    pub posts: Vec<Post>,
    pub connect_posts: Vec<ConnectPost>,
}

impl Seed {
    /// Parse a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] for malformed YAML or records.
    pub fn parse(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Load the seed at `path`, or the built-in seed when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        let Some(path) = path else {
            return Self::parse(DEFAULT_SEED);
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|source| SeedError::Read { path: path.display().to_string(), source })?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
