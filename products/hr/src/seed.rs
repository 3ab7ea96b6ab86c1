use entity::employees;
use tracing::info;

use crate::{error::HrResult, input::EmployeeInput, service::EmployeeService};

const DEMO_ROSTER: &[(&str, i32, i32, &str, &str)] = &[
    ("Ada Lovelace", 9800, 36, "Principal Engineer", "ada@sme.test"),
    ("Grace Hopper", 9500, 58, "Distinguished Engineer", "grace@sme.test"),
    ("Alan Turing", 9100, 41, "Research Lead", "alan@sme.test"),
    ("Katherine Johnson", 8700, 52, "Flight Analyst", "katherine@sme.test"),
    ("Linus Torvalds", 8200, 45, "Kernel Maintainer", "linus@sme.test"),
    ("Margaret Hamilton", 7900, 61, "Software Director", "margaret@sme.test"),
    ("Dennis Ritchie", 7400, 64, "Systems Architect", "dennis@sme.test"),
    ("Barbara Liskov", 7000, 59, "Staff Engineer", "barbara@sme.test"),
    ("Ken Thompson", 6600, 63, "Senior Engineer", "ken@sme.test"),
    ("Radia Perlman", 6100, 55, "Network Engineer", "radia@sme.test"),
    ("John Doe", 5000, 30, "Software Engineer", "john.doe@sme.test"),
    ("Jane Smith", 4200, 24, "Associate Engineer", "jane.smith@sme.test"),
];

/// Inserts the demo roster through the regular create path.
pub async fn seed_demo_employees(service: &EmployeeService) -> HrResult<Vec<employees::Model>> {
    let mut created = Vec::with_capacity(DEMO_ROSTER.len());
    for &(name, salary, age, title, email) in DEMO_ROSTER {
        let input = EmployeeInput {
            name: Some(name.to_string()),
            salary: Some(salary),
            age: Some(age),
            title: Some(title.to_string()),
            email: Some(email.to_string()),
        };
        created.push(service.create_employee(input).await?);
    }
    info!(count = created.len(), "demo employees seeded");
    Ok(created)
}

pub fn demo_roster_len() -> usize {
    DEMO_ROSTER.len()
}
