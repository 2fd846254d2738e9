//! Declarative form validation.
//!
//! A [`Schema`] maps each form field to an ordered list of [`Rule`]s. Every
//! rule carries the message shown next to the field when it fails. Schemas
//! are evaluated synchronously against raw form input ([`FieldValues`]) so a
//! submission can be rejected before anything is sent to the backend.
//!
//! ```
//! use frituur_core::{FieldValues, Schema};
//! use frituur_core::validation::Field;
//!
//! let schema = Schema::new()
//!     .field(Field::new("name").required("Name is required").min_length(3, "Too short"));
//!
//! let values = FieldValues::new().with("name", "ab");
//! let errors = schema.validate(&values).unwrap_err();
//! assert_eq!(errors.get("name"), Some("Too short"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

/// Raw form input, keyed by field name.
///
/// Missing fields read as the empty string, the same as an untouched input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the value of a field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Get the value of a field, or `""` if it was never set.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Get a trimmed value, or `None` if the field is blank.
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        let value = self.get(name).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Clear every field.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// The predicate part of a [`Rule`].
#[derive(Debug, Clone)]
pub enum Check {
    /// The value must not be blank.
    Required,
    /// The value must parse as a decimal number.
    Numeric,
    /// The value must be at least this many characters long.
    MinLength(usize),
    /// The value, read as a number, must be at least this large.
    MinValue(Decimal),
    /// The value must match this pattern.
    Pattern(Regex),
}

/// A predicate plus the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: String,
}

impl Rule {
    /// Returns true if `value` passes this rule.
    ///
    /// Only [`Check::Required`] looks at blank values; every other check
    /// passes on an empty input so optional fields can still carry rules.
    #[must_use]
    pub fn passes(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return !matches!(self.check, Check::Required);
        }
        match &self.check {
            Check::Required => true,
            Check::Numeric => Decimal::from_str(value).is_ok(),
            Check::MinLength(len) => value.chars().count() >= *len,
            // Non-numeric input is the business of `Check::Numeric`.
            Check::MinValue(min) => !matches!(Decimal::from_str(value), Ok(v) if v < *min),
            Check::Pattern(regex) => regex.is_match(value),
        }
    }
}

/// The rules for one form field.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    rules: Vec<Rule>,
}

impl Field {
    /// A field with no rules yet.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append an arbitrary rule.
    #[must_use]
    pub fn rule(mut self, check: Check, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            check,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Check::Required, message)
    }

    #[must_use]
    pub fn numeric(self, message: impl Into<String>) -> Self {
        self.rule(Check::Numeric, message)
    }

    #[must_use]
    pub fn min_length(self, len: usize, message: impl Into<String>) -> Self {
        self.rule(Check::MinLength(len), message)
    }

    #[must_use]
    pub fn min_value(self, min: Decimal, message: impl Into<String>) -> Self {
        self.rule(Check::MinValue(min), message)
    }

    #[must_use]
    pub fn pattern(self, regex: Regex, message: impl Into<String>) -> Self {
        self.rule(Check::Pattern(regex), message)
    }

    /// The message of the first failing rule, if any.
    #[must_use]
    pub fn first_failure(&self, value: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| !rule.passes(value))
            .map(|rule| rule.message.as_str())
    }
}

/// An ordered set of field rules for one kind of form.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// An empty schema, which accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate form input.
    ///
    /// Each field reports at most one error: the first of its rules that fails.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self, values: &FieldValues) -> Result<(), ValidationErrors> {
        let errors: BTreeMap<&'static str, String> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .first_failure(values.get(field.name))
                    .map(|message| (field.name, message.to_string()))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Per-field validation failures, shown inline next to each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    /// A single failure, for checks done outside a schema.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(BTreeMap::from([(field, message.into())]))
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
