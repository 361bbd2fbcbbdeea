//! Personnel intake record

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Stored personnel record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PersonnelRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    /// Free-text department name, not linked to the registry
    pub department: String,
}

/// Personnel intake form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonnelCreate {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub birthday: NaiveDate,
    #[validate(custom(function = "non_negative"))]
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    Ok(())
}

impl PersonnelRecord {
    pub fn from_create(id: i64, data: PersonnelCreate) -> Self {
        Self {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            birthday: data.birthday,
            salary: data.salary,
            hire_date: data.hire_date,
            department: data.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(salary: &str) -> PersonnelCreate {
        serde_json::from_value(serde_json::json!({
            "first_name": "Linus",
            "last_name": "Torvalds",
            "birthday": "1969-12-28",
            "salary": salary,
            "hire_date": "2024-03-01",
            "department": "Kernel"
        }))
        .unwrap()
    }

    #[test]
    fn test_accepts_decimal_salary() {
        let f = form("52000.50");
        assert!(f.validate().is_ok());
        assert_eq!(f.salary, Decimal::new(5200050, 2));
    }

    #[test]
    fn test_rejects_negative_salary() {
        let errors = form("-1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("salary"));
    }
}
