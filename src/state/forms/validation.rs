//! Field validation rules for the user form
//!
//! Every field has an ordered rule chain; the first rule that fails decides
//! the message for that field. Fields are checked independently of each other.

use super::field::UserField;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

const NAME_MIN_CHARS: usize = 2;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;
const AGE_MIN: u64 = 18;
const AGE_MAX: u64 = 120;

/// A single failed rule. `Display` is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Name can only contain letters and spaces")]
    NameInvalidChars,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Phone number must be 10-15 digits")]
    PhoneInvalid,
    #[error("Age is required")]
    AgeRequired,
    #[error("Age must be a number")]
    AgeNotNumber,
    #[error("Age must be at least 18")]
    AgeTooLow,
    #[error("Age must be less than 120")]
    AgeTooHigh,
}

impl FieldError {
    /// The field this error belongs to
    pub fn field(&self) -> UserField {
        match self {
            Self::NameRequired | Self::NameTooShort | Self::NameInvalidChars => UserField::Name,
            Self::EmailRequired | Self::EmailInvalid => UserField::Email,
            Self::PhoneRequired | Self::PhoneInvalid => UserField::Phone,
            Self::AgeRequired | Self::AgeNotNumber | Self::AgeTooLow | Self::AgeTooHigh => {
                UserField::Age
            }
        }
    }
}

/// Current validation messages keyed by field. Valid fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    errors: BTreeMap<UserField, FieldError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: UserField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn message(&self, field: UserField) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn contains(&self, field: UserField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, error: FieldError) {
        self.errors.insert(error.field(), error);
    }

    /// Drop the error for one field; returns whether there was one
    pub fn clear_field(&mut self, field: UserField) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First invalid field in display order
    pub fn first_field(&self) -> Option<UserField> {
        self.errors.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

impl FromIterator<FieldError> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut set = ErrorSet::new();
        for error in iter {
            set.insert(error);
        }
        set
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

static NAME_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn name_pattern() -> Option<&'static Regex> {
    NAME_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z ]+$").ok())
        .as_ref()
}

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn check_name(raw: &str) -> Option<FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Some(FieldError::NameRequired)
    } else if trimmed.chars().count() < NAME_MIN_CHARS {
        Some(FieldError::NameTooShort)
    } else if !name_pattern().is_some_and(|re| re.is_match(trimmed)) {
        Some(FieldError::NameInvalidChars)
    } else {
        None
    }
}

fn check_email(raw: &str) -> Option<FieldError> {
    if is_blank(raw) {
        Some(FieldError::EmailRequired)
    } else if !email_pattern().is_some_and(|re| re.is_match(raw)) {
        Some(FieldError::EmailInvalid)
    } else {
        None
    }
}

fn check_phone(raw: &str) -> Option<FieldError> {
    if is_blank(raw) {
        return Some(FieldError::PhoneRequired);
    }
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let valid = (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit());
    if valid {
        None
    } else {
        Some(FieldError::PhoneInvalid)
    }
}

fn check_age(raw: &str) -> Option<FieldError> {
    if is_blank(raw) {
        return Some(FieldError::AgeRequired);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Some(FieldError::AgeNotNumber);
    }
    // All-digit strings that overflow u64 are far above the limit anyway
    match raw.parse::<u64>() {
        Ok(age) if age < AGE_MIN => Some(FieldError::AgeTooLow),
        Ok(age) if age <= AGE_MAX => None,
        _ => Some(FieldError::AgeTooHigh),
    }
}

/// Run the rule chain for one field against its raw text
pub fn validate_field(field: UserField, raw: &str) -> Option<FieldError> {
    match field {
        UserField::Name => check_name(raw),
        UserField::Email => check_email(raw),
        UserField::Phone => check_phone(raw),
        UserField::Age => check_age(raw),
    }
}

/// Validate all four fields. `value_of` supplies the raw text per field.
pub fn validate_all<'a>(value_of: impl Fn(UserField) -> &'a str) -> ErrorSet {
    UserField::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, value_of(field)))
        .collect()
}
