#![allow(dead_code)]

use std::sync::Arc;

use products_hr::{EmployeeInput, EmployeeService, SeaOrmEmployeeRepository};
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

pub async fn sqlite_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE employees (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            salary INTEGER NOT NULL,
            age INTEGER,
            title TEXT,
            email TEXT
        );
        "#,
    ))
    .await
    .unwrap();
    db
}

pub struct SqliteContext {
    pub repo: SeaOrmEmployeeRepository,
    pub service: EmployeeService,
}

impl SqliteContext {
    pub async fn new() -> Self {
        let repo = SeaOrmEmployeeRepository::new(sqlite_db().await);
        let service = EmployeeService::new(Arc::new(repo.clone()));
        Self { repo, service }
    }

    pub async fn hire(&self, name: &str, salary: i32) -> products_hr::Employee {
        self.service
            .create_employee(employee_input(name, salary))
            .await
            .unwrap()
    }
}

pub fn employee_input(name: &str, salary: i32) -> EmployeeInput {
    let handle: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    EmployeeInput {
        name: Some(name.to_string()),
        salary: Some(salary),
        age: Some(30),
        title: Some("Engineer".to_string()),
        email: Some(format!("{handle}@example.com")),
    }
}
