use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed edge: taking `course_id` requires having completed
/// `prerequisite_course_id`. Self-edges are rejected before insert and by
/// a table CHECK constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prerequisites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub prerequisite_course_id: Uuid,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::PrerequisiteCourseId",
        to = "super::courses::Column::Id"
    )]
    PrerequisiteCourse,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
