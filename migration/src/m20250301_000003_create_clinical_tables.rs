use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_hospital_tables::Hospitals;
use crate::m20250301_000002_create_identity_tables::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create visits table
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visits::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Visits::HospitalId).string().not_null())
                    .col(ColumnDef::new(Visits::PatientId).string().not_null())
                    .col(ColumnDef::new(Visits::DoctorId).string().not_null())
                    .col(ColumnDef::new(Visits::Diagnosis).text().not_null())
                    .col(ColumnDef::new(Visits::PrescriptionText).text().null())
                    .col(ColumnDef::new(Visits::ClinicalNotes).text().null())
                    .col(ColumnDef::new(Visits::VisitDate).big_integer().not_null())
                    .col(ColumnDef::new(Visits::NextVisitDate).string().null())
                    .col(ColumnDef::new(Visits::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_hospital_id")
                            .from(Visits::Table, Visits::HospitalId)
                            .to(Hospitals::Table, Hospitals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_patient_id")
                            .from(Visits::Table, Visits::PatientId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_doctor_id")
                            .from(Visits::Table, Visits::DoctorId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create prescriptions table
        manager
            .create_table(
                Table::create()
                    .table(Prescriptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prescriptions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Prescriptions::VisitId).string().null())
                    .col(ColumnDef::new(Prescriptions::PatientId).string().not_null())
                    .col(ColumnDef::new(Prescriptions::DoctorId).string().null())
                    .col(ColumnDef::new(Prescriptions::MedicineName).string().not_null())
                    .col(ColumnDef::new(Prescriptions::Dosage).string().null())
                    .col(ColumnDef::new(Prescriptions::Duration).string().null())
                    .col(ColumnDef::new(Prescriptions::Status).string().not_null().default("Active"))
                    .col(ColumnDef::new(Prescriptions::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prescriptions_visit_id")
                            .from(Prescriptions::Table, Prescriptions::VisitId)
                            .to(Visits::Table, Visits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prescriptions_patient_id")
                            .from(Prescriptions::Table, Prescriptions::PatientId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prescriptions_doctor_id")
                            .from(Prescriptions::Table, Prescriptions::DoctorId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lab_reports table
        manager
            .create_table(
                Table::create()
                    .table(LabReports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LabReports::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(LabReports::PatientId).string().not_null())
                    .col(ColumnDef::new(LabReports::HospitalId).string().null())
                    .col(ColumnDef::new(LabReports::ReportName).string().not_null())
                    .col(ColumnDef::new(LabReports::FileUrl).text().not_null())
                    .col(ColumnDef::new(LabReports::ReportDate).string().not_null())
                    .col(ColumnDef::new(LabReports::Status).string().not_null().default("Normal"))
                    .col(ColumnDef::new(LabReports::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lab_reports_patient_id")
                            .from(LabReports::Table, LabReports::PatientId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lab_reports_hospital_id")
                            .from(LabReports::Table, LabReports::HospitalId)
                            .to(Hospitals::Table, Hospitals::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create vaccinations table
        manager
            .create_table(
                Table::create()
                    .table(Vaccinations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vaccinations::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Vaccinations::PatientId).string().not_null())
                    .col(ColumnDef::new(Vaccinations::VaccineName).string().not_null())
                    .col(ColumnDef::new(Vaccinations::AdministeredDate).string().not_null())
                    .col(ColumnDef::new(Vaccinations::NextDueDate).string().null())
                    .col(ColumnDef::new(Vaccinations::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vaccinations_patient_id")
                            .from(Vaccinations::Table, Vaccinations::PatientId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vaccinations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LabReports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Prescriptions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    Id,
    HospitalId,
    PatientId,
    DoctorId,
    Diagnosis,
    PrescriptionText,
    ClinicalNotes,
    VisitDate,
    NextVisitDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Prescriptions {
    Table,
    Id,
    VisitId,
    PatientId,
    DoctorId,
    MedicineName,
    Dosage,
    Duration,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LabReports {
    Table,
    Id,
    PatientId,
    HospitalId,
    ReportName,
    FileUrl,
    ReportDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Vaccinations {
    Table,
    Id,
    PatientId,
    VaccineName,
    AdministeredDate,
    NextDueDate,
    CreatedAt,
}
