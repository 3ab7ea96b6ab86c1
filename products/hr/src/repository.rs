use async_trait::async_trait;
use entity::employees;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    QuerySelect, Select,
};
use std::sync::Arc;
use uuid::Uuid;

/// Persistence port for employee rows. Storage faults surface as [`DbErr`].
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Runs a query produced by [`crate::build_query`]; storage order unless the query orders.
    async fn find_matching(
        &self,
        query: Select<employees::Entity>,
    ) -> Result<Vec<employees::Model>, DbErr>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>, DbErr>;

    /// Returns `true` when a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DbErr>;

    /// Assigns an id when the model has none, persists it, and returns the stored row.
    async fn save(&self, employee: employees::ActiveModel) -> Result<employees::Model, DbErr>;

    /// Names only, highest salary first, at most `limit` entries.
    async fn top_names_by_salary(&self, limit: u64) -> Result<Vec<String>, DbErr>;

    /// `None` when the table is empty.
    async fn max_salary(&self) -> Result<Option<i32>, DbErr>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_matching(
        &self,
        query: Select<employees::Entity>,
    ) -> Result<Vec<employees::Model>, DbErr> {
        query.all(&*self.db).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id).one(&*self.db).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DbErr> {
        let res = employees::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn save(&self, mut employee: employees::ActiveModel) -> Result<employees::Model, DbErr> {
        let id = match &employee.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
            ActiveValue::NotSet => {
                let id = Uuid::new_v4();
                employee.id = ActiveValue::Set(id);
                id
            }
        };
        employees::Entity::insert(employee)
            .exec_without_returning(&*self.db)
            .await?;
        employees::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("employee {id} missing after insert")))
    }

    async fn top_names_by_salary(&self, limit: u64) -> Result<Vec<String>, DbErr> {
        employees::Entity::find()
            .select_only()
            .column(employees::Column::Name)
            .order_by_desc(employees::Column::Salary)
            .order_by_asc(employees::Column::Id)
            .limit(limit)
            .into_tuple::<String>()
            .all(&*self.db)
            .await
    }

    async fn max_salary(&self) -> Result<Option<i32>, DbErr> {
        let max = employees::Entity::find()
            .select_only()
            .column_as(employees::Column::Salary.max(), "max_salary")
            .into_tuple::<Option<i32>>()
            .one(&*self.db)
            .await?;
        Ok(max.flatten())
    }
}
