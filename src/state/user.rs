//! User records produced by the entry form

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trimmed field values handed to the gateway while a submission is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
}

impl UserDraft {
    /// Build a draft, trimming surrounding whitespace from every value
    pub fn trimmed(name: &str, email: &str, phone: &str, age: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            age: age.trim().to_string(),
        }
    }
}

/// A created user. Fields are private so a record cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: String,
    name: String,
    email: String,
    phone: String,
    age: String,
}

impl UserRecord {
    /// Promote a draft into a record with a freshly generated id
    pub fn from_draft(draft: UserDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            age: draft.age,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn age(&self) -> &str {
        &self.age
    }
}
