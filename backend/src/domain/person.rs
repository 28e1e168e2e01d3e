//! Person entity and its creation-time subset.
//!
//! A [`PersonDraft`] is transient: it carries every mutable field but has no
//! storage identity. A [`Person`] is persisted and always carries the
//! [`PersonId`] assigned by storage.

use std::fmt;

use chrono::NaiveDate;

/// Which name field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl NameField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first_name",
            Self::Last => "last_name",
        }
    }
}

/// Validation errors raised while building person values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonValidationError {
    #[error("{} must not be empty", .field.as_str())]
    EmptyName { field: NameField },
    #[error("birth_date must be an ISO-8601 calendar date (YYYY-MM-DD), got {value:?}")]
    InvalidBirthDate { value: String },
}

/// Storage-assigned person identifier.
///
/// Identifiers are generated by storage on insert and never reused after
/// deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(i64);

impl PersonId {
    /// Wrap a raw storage identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PersonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty first or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a name for `field`.
    ///
    /// Whitespace-only values are rejected; other values are kept verbatim.
    pub fn new(value: impl Into<String>, field: NameField) -> Result<Self, PersonValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PersonValidationError::EmptyName { field });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// This is the only place where textual birth dates become [`NaiveDate`]
/// values; everything past the inbound boundary works with typed dates.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use person_api::domain::parse_birth_date;
///
/// let date = parse_birth_date("1815-12-10").expect("valid date");
/// assert_eq!(date, NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid"));
/// assert!(parse_birth_date("10/12/1815").is_err());
/// ```
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, PersonValidationError> {
    let invalid = || PersonValidationError::InvalidBirthDate {
        value: raw.to_owned(),
    };
    if !has_calendar_date_shape(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/// Exactly four year digits, two month digits and two day digits.
fn has_calendar_date_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(pos, byte)| match pos {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Transient person: every mutable field, no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    first_name: PersonName,
    last_name: PersonName,
    birth_date: NaiveDate,
}

impl PersonDraft {
    /// Build a draft from already validated parts.
    pub fn new(first_name: PersonName, last_name: PersonName, birth_date: NaiveDate) -> Self {
        Self {
            first_name,
            last_name,
            birth_date,
        }
    }

    /// Validate raw names and build a draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use person_api::domain::PersonDraft;
    ///
    /// let birth_date = NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date");
    /// let draft = PersonDraft::try_from_parts("Ada", "Lovelace", birth_date).expect("valid");
    /// assert_eq!(draft.last_name().as_ref(), "Lovelace");
    /// assert!(PersonDraft::try_from_parts("", "Lovelace", birth_date).is_err());
    /// ```
    pub fn try_from_parts(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Result<Self, PersonValidationError> {
        Ok(Self::new(
            PersonName::new(first_name, NameField::First)?,
            PersonName::new(last_name, NameField::Last)?,
            birth_date,
        ))
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
}

/// Persisted person.
///
/// ## Invariants
/// - `id` was assigned by storage and never changes.
/// - Both names are non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    first_name: PersonName,
    last_name: PersonName,
    birth_date: NaiveDate,
}

impl Person {
    /// Attach a storage identity to a draft.
    pub fn new(id: PersonId, draft: PersonDraft) -> Self {
        let PersonDraft {
            first_name,
            last_name,
            birth_date,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            birth_date,
        }
    }

    /// Replace every mutable field with the values from `draft`, keeping `id`.
    #[must_use]
    pub fn with_details(self, draft: PersonDraft) -> Self {
        Self::new(self.id, draft)
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
}
