use std::sync::Arc;

use entity::employees;
use tracing::{debug, info, instrument};

use crate::{
    criteria::{EmployeeSearchCriteria, build_query},
    error::{HrError, HrResult},
    ids::parse_employee_id,
    input::EmployeeInput,
    repository::EmployeeRepository,
};

/// Size of the top earners projection.
pub const TOP_EARNERS_LIMIT: u64 = 10;

/// Entry point for every employee operation the HTTP layer exposes.
#[derive(Clone)]
pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    /// Never fails on bad filter values; a malformed id filter is ignored.
    #[instrument(name = "hr.employees.search", skip(self), err)]
    pub async fn search_employees(
        &self,
        criteria: &EmployeeSearchCriteria,
    ) -> HrResult<Vec<employees::Model>> {
        let rows = self.repo.find_matching(build_query(criteria)).await?;
        debug!(matched = rows.len(), "employee search finished");
        Ok(rows)
    }

    /// Lenient lookup: a malformed or unknown id yields `None` rather than an error.
    /// Deletion, by contrast, rejects both.
    #[instrument(name = "hr.employees.get", skip(self), err)]
    pub async fn get_employee_by_id(&self, id: &str) -> HrResult<Option<employees::Model>> {
        // The search path drops malformed ids, which would turn this into "first row".
        if parse_employee_id(id).is_none() {
            return Ok(None);
        }
        let rows = self
            .search_employees(&EmployeeSearchCriteria::by_id(id))
            .await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(name = "hr.employees.highest_salary", skip(self), err)]
    pub async fn highest_salary(&self) -> HrResult<i32> {
        Ok(self.repo.max_salary().await?.unwrap_or(0))
    }

    #[instrument(name = "hr.employees.top_earners", skip(self), err)]
    pub async fn top_earning_names(&self) -> HrResult<Vec<String>> {
        Ok(self.repo.top_names_by_salary(TOP_EARNERS_LIMIT).await?)
    }

    #[instrument(name = "hr.employees.create", skip_all, err(level = "warn"))]
    pub async fn create_employee(&self, input: EmployeeInput) -> HrResult<employees::Model> {
        let new_employee = input.validate()?;
        let saved = self.repo.save(new_employee.into_active_model()).await?;
        info!(employee_id = %saved.id, "employee created");
        Ok(saved)
    }

    /// Returns the removed employee's name.
    #[instrument(name = "hr.employees.delete", skip(self), err(level = "warn"))]
    pub async fn delete_employee(&self, id: &str) -> HrResult<String> {
        let employee_id =
            parse_employee_id(id).ok_or_else(|| HrError::InvalidArgument(id.to_string()))?;
        let employee = self
            .repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| HrError::NotFound(id.to_string()))?;
        // A concurrent delete may win between the lookup and this call.
        if !self.repo.delete_by_id(employee_id).await? {
            return Err(HrError::NotFound(id.to_string()));
        }
        info!(employee_id = %employee_id, "employee deleted");
        Ok(employee.name)
    }
}
