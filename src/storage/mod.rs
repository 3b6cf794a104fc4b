//! Local persistence for the user list

mod store;
mod users;

pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use users::{load_users, save_users};

#[cfg(test)]
pub use store::MockKeyValueStore;
