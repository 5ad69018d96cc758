//! Runtime orchestration for the tile RPG session.
//!
//! This crate wires together oracle access, the save repository, and the
//! simulation worker into a cohesive runtime API. Consumers embed [`Runtime`]
//! to drive the session, subscribe to events, and save or load through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameStateEvent, PersistenceEvent, PersistenceOp, Topic};
pub use oracle::{DialogueOracleImpl, OracleManager, SkillOracleImpl, ZoneOracleImpl};
pub use repository::{
    FORMAT_VERSION, FileStateRepository, InMemoryStateRepo, RepositoryError, SaveRecord,
    StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
