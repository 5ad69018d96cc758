//! Repository layer for dynamic runtime data.
//!
//! Repositories hold data that CHANGES during gameplay: the saved session,
//! stored as one [`SaveRecord`] per slot key.
//!
//! Static game content (zones, items, skills, dialogue) is handled by
//! oracles, not repositories.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use record::{FORMAT_VERSION, SaveRecord};
pub use traits::StateRepository;
