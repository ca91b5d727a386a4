//! FILENAME: records/src/field.rs
//! PURPOSE: Named accessors over `UserRecord` fields.
//! CONTEXT: Aggregators and the table view address record fields through
//! `RecordField` rather than closures, so parameters stay serializable and
//! an unknown field name is caught once, at parse time.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::record::UserRecord;

/// A field of `UserRecord` that can be grouped, filtered, searched, or measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Id,
    FirstName,
    LastName,
    /// "First Last".
    #[serde(alias = "name")]
    FullName,
    Email,
    Age,
    Gender,
    #[serde(alias = "address.country")]
    Country,
    #[serde(alias = "address.state")]
    State,
    #[serde(alias = "company.department")]
    Department,
}

impl RecordField {
    pub const ALL: [RecordField; 10] = [
        RecordField::Id,
        RecordField::FirstName,
        RecordField::LastName,
        RecordField::FullName,
        RecordField::Email,
        RecordField::Age,
        RecordField::Gender,
        RecordField::Country,
        RecordField::State,
        RecordField::Department,
    ];

    /// Canonical name, as serialized. Parsing also accepts the nested JSON
    /// paths of the API payload ("address.country") and "name".
    pub fn name(self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::FirstName => "firstName",
            RecordField::LastName => "lastName",
            RecordField::FullName => "fullName",
            RecordField::Email => "email",
            RecordField::Age => "age",
            RecordField::Gender => "gender",
            RecordField::Country => "country",
            RecordField::State => "state",
            RecordField::Department => "department",
        }
    }

    /// Whether `number()` yields a value for this field.
    pub fn is_numeric(self) -> bool {
        matches!(self, RecordField::Id | RecordField::Age)
    }

    /// The field's value rendered as text. Numeric fields are formatted.
    pub fn text(self, record: &UserRecord) -> Cow<'_, str> {
        match self {
            RecordField::Id => Cow::Owned(record.id.to_string()),
            RecordField::FirstName => Cow::Borrowed(&record.first_name),
            RecordField::LastName => Cow::Borrowed(&record.last_name),
            RecordField::FullName => Cow::Owned(record.full_name()),
            RecordField::Email => Cow::Borrowed(&record.email),
            RecordField::Age => Cow::Owned(record.age.to_string()),
            RecordField::Gender => Cow::Borrowed(&record.gender),
            RecordField::Country => Cow::Borrowed(&record.address.country),
            RecordField::State => Cow::Borrowed(&record.address.state),
            RecordField::Department => Cow::Borrowed(&record.company.department),
        }
    }

    /// The field's numeric value, or `None` for text fields.
    pub fn number(self, record: &UserRecord) -> Option<f64> {
        match self {
            RecordField::Id => Some(record.id as f64),
            RecordField::Age => Some(record.age as f64),
            _ => None,
        }
    }

    /// The field's value as an integer, for bucketing. `None` for text fields.
    pub fn integer(self, record: &UserRecord) -> Option<i64> {
        match self {
            RecordField::Id => i64::try_from(record.id).ok(),
            RecordField::Age => Some(i64::from(record.age)),
            _ => None,
        }
    }

    /// Fails with `InvalidParameter` unless the field is numeric.
    pub fn require_numeric(self) -> Result<Self, AnalyticsError> {
        if self.is_numeric() {
            Ok(self)
        } else {
            Err(AnalyticsError::invalid(format!(
                "field '{}' is not numeric",
                self.name()
            )))
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordField {
    type Err = AnalyticsError;

    /// Accepts exactly the names serde accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "id" => RecordField::Id,
            "firstName" => RecordField::FirstName,
            "lastName" => RecordField::LastName,
            "fullName" | "name" => RecordField::FullName,
            "email" => RecordField::Email,
            "age" => RecordField::Age,
            "gender" => RecordField::Gender,
            "address.country" | "country" => RecordField::Country,
            "address.state" | "state" => RecordField::State,
            "company.department" | "department" => RecordField::Department,
            other => {
                return Err(AnalyticsError::invalid(format!(
                    "unknown record field '{}'",
                    other
                )))
            }
        };
        Ok(field)
    }
}
