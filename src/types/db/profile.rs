use sea_orm::entity::prelude::*;

/// Person record. `role` + `role_details` persist a `ProfileRole`;
/// `health_id` mirrors the patient payload so it can carry a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub user_id: Option<String>,
    pub role: String,
    pub role_details: Option<String>,
    #[sea_orm(unique)]
    pub health_id: Option<String>,
    pub hospital_id: Option<String>,
    pub department_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub is_active: bool,
    pub join_date: String,
    pub registered_by: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::hospital::Entity",
        from = "Column::HospitalId",
        to = "super::hospital::Column::Id",
        on_delete = "SetNull"
    )]
    Hospital,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::hospital::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hospital.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
