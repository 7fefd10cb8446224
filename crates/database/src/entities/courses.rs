use models::level::AcademicLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// 1-6, enforced by a table constraint
    pub credits: i32,
    pub department: String,
    pub level: AcademicLevel,
    /// 5-300, enforced by a table constraint. Capacity lives on the course;
    /// every section of it admits at most this many enrolled students.
    pub max_capacity: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::prerequisites::Entity")]
    Prerequisites,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::prerequisites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prerequisites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
