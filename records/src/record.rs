//! FILENAME: records/src/record.rs
//! PURPOSE: The user record shared by every aggregator and the table view.
//! CONTEXT: Records arrive as already-validated JSON objects from the user
//! directory API. They are read-only once built; nothing downstream mutates them.

use serde::{Deserialize, Serialize};

/// Unique identifier of a user (positive).
pub type UserId = u64;

/// Postal address of a user. Only the fields the dashboard groups on are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
}

/// Employer information of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub department: String,
}

/// A single user from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    /// One of a small fixed set ("male" / "female" in practice).
    pub gender: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

impl UserRecord {
    pub fn new(id: UserId, first_name: &str, last_name: &str, email: &str, age: u32, gender: &str) -> Self {
        UserRecord {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            age,
            gender: gender.to_string(),
            address: Address::default(),
            company: Company::default(),
        }
    }

    /// Builder-style setter for the address fields.
    pub fn with_address(mut self, country: &str, state: &str) -> Self {
        self.address = Address {
            country: country.to_string(),
            state: state.to_string(),
        };
        self
    }

    /// Builder-style setter for the department.
    pub fn with_department(mut self, department: &str) -> Self {
        self.company = Company {
            department: department.to_string(),
        };
        self
    }

    /// "First Last", the label the directory shows and sorts by.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_camel_case() {
        let json = r#"{
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "email": "emily.johnson@x.dummyjson.com",
            "age": 28,
            "gender": "female",
            "address": { "country": "United States", "state": "Mississippi", "city": "Phoenix" },
            "company": { "department": "Engineering", "name": "Dooley" },
            "image": "https://example.invalid/1.png"
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.first_name, "Emily");
        assert_eq!(record.address.state, "Mississippi");
        assert_eq!(record.company.department, "Engineering");
        assert_eq!(record.full_name(), "Emily Johnson");
    }

    #[test]
    fn missing_nested_objects_default_to_empty() {
        let json = r#"{"id":2,"firstName":"A","lastName":"B","email":"a@b","age":3,"gender":"male"}"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert!(record.address.country.is_empty());
        assert!(record.company.department.is_empty());
    }
}
