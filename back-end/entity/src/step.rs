use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single step of a tutorial.
///
/// `order` positions the step among its siblings. It is neither unique nor
/// contiguous; two steps of one tutorial may share a value.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "step")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub order: Option<i32>,
    #[sea_orm(column_type = "Json", nullable)]
    pub content: Option<Json>,
    pub tutorial_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tutorial::Entity",
        from = "Column::TutorialId",
        to = "super::tutorial::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Tutorial,
}

impl Related<super::tutorial::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutorial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
