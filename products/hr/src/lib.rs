//! HR vertical slice: the employee directory.
//!
//! Requests flow from the HTTP layer into [`EmployeeService`], which composes the
//! criteria query builder, the [`EmployeeRepository`] and the input mapper.

pub mod criteria;
pub mod error;
pub mod ids;
pub mod input;
pub mod repository;
pub mod seed;
pub mod service;

pub use criteria::{EmployeeSearchCriteria, build_query};
pub use error::{HrError, HrResult};
pub use ids::parse_employee_id;
pub use input::{EmployeeInput, FieldErrors, NewEmployee};
pub use repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use service::{EmployeeService, TOP_EARNERS_LIMIT};

pub use entity::employees::Model as Employee;
