use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Salary,
    Age,
    Title,
    Email,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ids are generated by the application, so no server-side default.
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Employees::Salary).integer().not_null())
                    .col(ColumnDef::new(Employees::Age).integer())
                    .col(ColumnDef::new(Employees::Title).string_len(100))
                    .col(ColumnDef::new(Employees::Email).string_len(254))
                    .check(Expr::col(Employees::Salary).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_name")
                    .table(Employees::Table)
                    .col(Employees::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_salary")
                    .table(Employees::Table)
                    .col(Employees::Salary)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await
    }
}
