use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create hospitals table
        manager
            .create_table(
                Table::create()
                    .table(Hospitals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Hospitals::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Hospitals::Name).string().not_null())
                    .col(ColumnDef::new(Hospitals::Address).text().null())
                    .col(ColumnDef::new(Hospitals::ContactEmail).string().null())
                    .col(ColumnDef::new(Hospitals::ContactPhone).string().null())
                    .col(ColumnDef::new(Hospitals::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Hospitals::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hospitals_created_at")
                    .table(Hospitals::Table)
                    .col(Hospitals::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create departments table (ids are supplied by the client)
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Departments::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Departments::HospitalId).string().not_null())
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::HeadName).string().null())
                    .col(ColumnDef::new(Departments::DoctorCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Departments::StaffCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Departments::Status).string().not_null().default("Active"))
                    .col(ColumnDef::new(Departments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_departments_hospital_id")
                            .from(Departments::Table, Departments::HospitalId)
                            .to(Hospitals::Table, Hospitals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_departments_hospital_id")
                    .table(Departments::Table)
                    .col(Departments::HospitalId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Hospitals::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Hospitals {
    Table,
    Id,
    Name,
    Address,
    ContactEmail,
    ContactPhone,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Departments {
    Table,
    Id,
    HospitalId,
    Name,
    HeadName,
    DoctorCount,
    StaffCount,
    Status,
    CreatedAt,
}
