use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub hospital_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub diagnosis: String,
    pub prescription_text: Option<String>,
    pub clinical_notes: Option<String>,
    pub visit_date: i64,
    pub next_visit_date: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
