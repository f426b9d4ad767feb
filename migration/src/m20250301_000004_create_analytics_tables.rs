use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_hospital_tables::Hospitals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiAnalytics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AiAnalytics::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(AiAnalytics::HospitalId).string().not_null())
                    .col(ColumnDef::new(AiAnalytics::MetricName).string().not_null())
                    .col(ColumnDef::new(AiAnalytics::MetricDate).string().not_null())
                    // JSON document, stored as text
                    .col(ColumnDef::new(AiAnalytics::Value).text().not_null())
                    .col(ColumnDef::new(AiAnalytics::CalculatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_analytics_hospital_id")
                            .from(AiAnalytics::Table, AiAnalytics::HospitalId)
                            .to(Hospitals::Table, Hospitals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_analytics_hospital_metric")
                    .table(AiAnalytics::Table)
                    .col(AiAnalytics::HospitalId)
                    .col(AiAnalytics::MetricName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiAnalytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiAnalytics {
    Table,
    Id,
    HospitalId,
    MetricName,
    MetricDate,
    Value,
    CalculatedAt,
}
