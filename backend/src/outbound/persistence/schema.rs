//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly; `diesel print-schema`
//! regenerates them from a migrated database.

diesel::table! {
    /// Stored people.
    ///
    /// `id` is assigned by the `BIGSERIAL` sequence on insert.
    persons (id) {
        /// Primary key drawn from the `persons_id_seq` sequence.
        id -> Int8,
        first_name -> Text,
        last_name -> Text,
        birth_date -> Date,
    }
}
