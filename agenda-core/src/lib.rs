//! Core of the agenda service.
//!
//! - `store`: the flat JSON document holding every table
//! - `locations`: read-only view over the `ubicaciones` table
//! - `manager`: booking rules and event CRUD on top of the store
//! - `config`: where the database lives and where the server listens

pub mod config;
pub mod error;
pub mod event;
pub mod locations;
pub mod manager;
pub mod schedule;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AgendaConfig;
pub use error::{AgendaError, AgendaResult};
pub use event::{EventView, Location, StoredEvent};
pub use manager::EventManager;
pub use store::JsonStore;
