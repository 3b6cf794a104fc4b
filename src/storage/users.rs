//! Typed access to the persisted user list

use super::store::{KeyValueStore, StorageError};
use crate::state::UserRecord;

/// Key under which the user list is stored
pub const USERS_KEY: &str = "users";

/// Load the stored users; a missing key is an empty list
pub fn load_users(store: &dyn KeyValueStore) -> Result<Vec<UserRecord>, StorageError> {
    match store.get(USERS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Replace the stored user list
pub fn save_users(store: &mut dyn KeyValueStore, users: &[UserRecord]) -> Result<(), StorageError> {
    let json = serde_json::to_string(users)?;
    store.set(USERS_KEY, json)
}
