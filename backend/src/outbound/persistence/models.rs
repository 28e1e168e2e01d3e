//! Internal Diesel row structs for the `persons` table.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain; conversion happens in the repository adapter.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{Person, PersonDraft, PersonId, PersonValidationError};

use super::schema::persons;

/// Row struct for reading from the persons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl TryFrom<PersonRow> for Person {
    type Error = PersonValidationError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let draft = PersonDraft::try_from_parts(row.first_name, row.last_name, row.birth_date)?;
        Ok(Self::new(PersonId::new(row.id), draft))
    }
}

/// Insertable struct for new person records; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = persons)]
pub(crate) struct NewPersonRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a PersonDraft> for NewPersonRow<'a> {
    fn from(draft: &'a PersonDraft) -> Self {
        Self {
            first_name: draft.first_name().as_ref(),
            last_name: draft.last_name().as_ref(),
            birth_date: draft.birth_date(),
        }
    }
}

/// Changeset overwriting every mutable column of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = persons)]
pub(crate) struct PersonUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a Person> for PersonUpdate<'a> {
    fn from(person: &'a Person) -> Self {
        Self {
            first_name: person.first_name().as_ref(),
            last_name: person.last_name().as_ref(),
            birth_date: person.birth_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::NameField;

    #[fixture]
    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date")
    }

    #[rstest]
    fn rows_convert_to_people(birth_date: NaiveDate) {
        let person = Person::try_from(PersonRow {
            id: 3,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            birth_date,
        })
        .expect("valid row");

        assert_eq!(person.id(), PersonId::new(3));
        assert_eq!(person.first_name().as_ref(), "Ada");
        assert_eq!(person.birth_date(), birth_date);
    }

    #[rstest]
    fn rows_with_blank_names_are_rejected(birth_date: NaiveDate) {
        let err = Person::try_from(PersonRow {
            id: 3,
            first_name: "Ada".to_owned(),
            last_name: " ".to_owned(),
            birth_date,
        })
        .expect_err("blank last name");

        assert_eq!(
            err,
            PersonValidationError::EmptyName {
                field: NameField::Last
            }
        );
    }

    #[rstest]
    fn changesets_borrow_every_mutable_field(birth_date: NaiveDate) {
        let person = Person::new(
            PersonId::new(1),
            PersonDraft::try_from_parts("Ada", "King", birth_date).expect("valid draft"),
        );
        let update = PersonUpdate::from(&person);

        assert_eq!(update.first_name, "Ada");
        assert_eq!(update.last_name, "King");
        assert_eq!(update.birth_date, birth_date);
    }
}
