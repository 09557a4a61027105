use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::FormInput;

/// Minimum trimmed length for the name and role fields.
pub const MIN_TEXT_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Role,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Role => "role",
        }
    }
}

/// Per-field errors. An empty result means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    fn reject(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Runs every rule; no short-circuit so all errors can be shown together.
pub fn validate(input: &FormInput) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !long_enough(&input.name) {
        result.reject(Field::Name, "Please enter your full name.");
    }
    if !looks_like_email(&input.email) {
        result.reject(Field::Email, "Please enter a valid email address.");
    }
    if !long_enough(&input.role) {
        result.reject(Field::Role, "Please tell us your role.");
    }

    result
}

fn long_enough(value: &str) -> bool {
    value.trim().chars().count() >= MIN_TEXT_LEN
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}

/// Permissive shape check, not RFC validation.
pub fn looks_like_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{looks_like_email, validate, Field};
    use crate::guard::{FormInput, InterestKind};

    fn input(name: &str, email: &str, role: &str) -> FormInput {
        FormInput {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            message: String::new(),
            interest: InterestKind::Waitlist,
            honeypot: String::new(),
        }
    }

    #[test]
    fn reports_every_failing_field() {
        let result = validate(&input("ab", "bad", "x"));
        let fields: Vec<Field> = result.fields().collect();
        assert_eq!(fields, vec![Field::Email, Field::Role]);
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let result = validate(&input("  a  ", "jane@acme.com", "Engineer"));
        assert_eq!(result.fields().collect::<Vec<_>>(), vec![Field::Name]);
        assert!(result.error(Field::Name).is_some());
    }

    #[test]
    fn valid_input_has_no_errors() {
        let result = validate(&input("Jane Smith", "jane@acme.com", "Engineer"));
        assert!(result.is_valid());
        assert_eq!(result.error(Field::Email), None);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(looks_like_email("odd@name@host.io"));
        assert!(!looks_like_email("bad"));
        assert!(!looks_like_email("@acme.com"));
        assert!(!looks_like_email("jane@acme"));
        assert!(!looks_like_email("jane@.com"));
        assert!(!looks_like_email("jane@acme."));
        assert!(!looks_like_email("jane doe@acme.com"));
        assert!(!looks_like_email(""));
    }
}
