//! Create payload, its validation rules, and the mapping onto a persistable row.

use std::collections::BTreeMap;

use entity::employees;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 50;
const TITLE_MAX_LEN: usize = 100;
const EMAIL_MAX_LEN: usize = 254;
const MIN_AGE: i32 = 18;
const MAX_AGE: i32 = 65;

/// Raw create payload. Every field is optional at the wire level so a missing
/// field is reported alongside the others instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub salary: Option<i32>,
    pub age: Option<i32>,
    pub title: Option<String>,
    pub email: Option<String>,
}

/// A create payload that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub salary: i32,
    pub age: i32,
    pub title: String,
    pub email: String,
}

/// Field name to message, one entry per failing field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    fn record<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.0.entry(field.to_string()).or_insert(message);
                None
            }
        }
    }
}

impl EmployeeInput {
    pub fn validate(self) -> Result<NewEmployee, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.record("name", validate_name(self.name));
        let salary = errors.record("salary", validate_salary(self.salary));
        let age = errors.record("age", validate_age(self.age));
        let title = errors.record("title", validate_title(self.title));
        let email = errors.record("email", validate_email(self.email));

        match (name, salary, age, title, email) {
            (Some(name), Some(salary), Some(age), Some(title), Some(email)) => Ok(NewEmployee {
                name,
                salary,
                age,
                title,
                email,
            }),
            _ => Err(errors),
        }
    }
}

impl NewEmployee {
    /// The id stays unset; the repository assigns it on save.
    pub fn into_active_model(self) -> employees::ActiveModel {
        employees::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            salary: Set(self.salary),
            age: Set(Some(self.age)),
            title: Set(Some(self.title)),
            email: Set(Some(self.email)),
        }
    }
}

/// Blankness ignores whitespace; the value itself is kept as given.
fn required_text(value: Option<String>, label: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(format!("{label} must not be blank")),
    }
}

fn validate_name(value: Option<String>) -> Result<String, String> {
    let name = required_text(value, "Name")?;
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "Name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        ));
    }
    Ok(name)
}

fn validate_salary(value: Option<i32>) -> Result<i32, String> {
    match value {
        None => Err("Salary must not be null".into()),
        Some(salary) if salary <= 0 => Err("Salary must be greater than zero".into()),
        Some(salary) => Ok(salary),
    }
}

fn validate_age(value: Option<i32>) -> Result<i32, String> {
    match value {
        None => Err("Age must not be null".into()),
        Some(age) if age < MIN_AGE => Err(format!("Age must be at least {MIN_AGE}")),
        Some(age) if age > MAX_AGE => Err(format!("Age must not exceed {MAX_AGE}")),
        Some(age) => Ok(age),
    }
}

fn validate_title(value: Option<String>) -> Result<String, String> {
    let title = required_text(value, "Title")?;
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(format!("Title must not exceed {TITLE_MAX_LEN} characters"));
    }
    Ok(title)
}

fn validate_email(value: Option<String>) -> Result<String, String> {
    let email = required_text(value, "Email")?;
    if !is_valid_email(&email) {
        return Err("Email must be valid".into());
    }
    Ok(email)
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
