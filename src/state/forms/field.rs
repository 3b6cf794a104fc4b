//! Form field value objects

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of fields on the user form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Email,
    Phone,
    Age,
}

impl UserField {
    pub const ALL: [UserField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Age];

    /// Stable key used for parsing and lookups
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Age => "age",
        }
    }

    /// Label rendered above the input (all fields are required)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name *",
            Self::Email => "Email *",
            Self::Phone => "Phone Number *",
            Self::Age => "Age *",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Enter your full name",
            Self::Email => "Enter your email address",
            Self::Phone => "Enter your phone number",
            Self::Age => "Enter your age",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
            Self::Age => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a field name is outside the four-field set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for UserField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Holds the raw text of one input exactly as typed
#[derive(Debug, Clone)]
pub struct FormField {
    pub field: UserField,
    value: String,
}

impl FormField {
    pub fn new(field: UserField) -> Self {
        Self {
            field,
            value: String::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    /// Raw value, untrimmed
    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character; returns false when already empty
    pub fn pop_char(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Value for rendering, falling back to the placeholder when empty
    pub fn display_value(&self) -> &str {
        if self.value.is_empty() {
            self.field.placeholder()
        } else {
            &self.value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        for field in UserField::ALL {
            assert_eq!(field.key().parse::<UserField>(), Ok(field));
        }
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = "address".parse::<UserField>().unwrap_err();
        assert_eq!(err, UnknownField("address".to_string()));
        assert_eq!(err.to_string(), "unknown form field: address");
    }

    #[test]
    fn test_index_round_trip() {
        for field in UserField::ALL {
            assert_eq!(UserField::from_index(field.index()), Some(field));
        }
        assert_eq!(UserField::from_index(4), None);
    }

    #[test]
    fn test_push_and_pop_keep_raw_text() {
        let mut field = FormField::new(UserField::Name);
        for c in " Jo ".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), " Jo ");
        assert!(field.pop_char());
        assert_eq!(field.as_text(), " Jo");
    }

    #[test]
    fn test_pop_on_empty_returns_false() {
        let mut field = FormField::new(UserField::Age);
        assert!(!field.pop_char());
    }

    #[test]
    fn test_display_value_uses_placeholder() {
        let mut field = FormField::new(UserField::Email);
        assert_eq!(field.display_value(), "Enter your email address");
        field.set_text("a@b.co".to_string());
        assert_eq!(field.display_value(), "a@b.co");
    }
}
