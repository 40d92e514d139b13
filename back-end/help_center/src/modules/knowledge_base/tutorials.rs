use chrono::Utc;
use entity::{project, step, tutorial};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, info};

use super::relations;
use super::types::TutorialDetail;
use super::validation;
use super::ServiceError;

/// Repository for tutorials.
pub struct TutorialService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TutorialService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Tutorials of a project, each with its project and steps.
    pub async fn list_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<TutorialDetail>, ServiceError> {
        project::Entity::find_by_id(project_id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", project_id)))?;

        let tutorials = tutorial::Entity::find()
            .filter(tutorial::Column::ProjectId.eq(project_id))
            .order_by_asc(tutorial::Column::Id)
            .all(self.db)
            .await?;

        Ok(relations::load_tutorial_details(self.db, tutorials).await?)
    }

    pub async fn get(&self, id: i32) -> Result<TutorialDetail, ServiceError> {
        let tutorial = self.find(id).await?;

        relations::load_tutorial_details(self.db, vec![tutorial])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::NotFound(format!("Tutorial {}", id)))
    }

    pub async fn find(&self, id: i32) -> Result<tutorial::Model, ServiceError> {
        tutorial::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tutorial {}", id)))
    }

    /// First-or-create by (name, project).
    pub async fn create(
        &self,
        project_id: i32,
        name: &str,
    ) -> Result<tutorial::Model, ServiceError> {
        project::Entity::find_by_id(project_id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", project_id)))?;

        validation::required_text("name", name)?;

        let existing = tutorial::Entity::find()
            .filter(tutorial::Column::ProjectId.eq(project_id))
            .filter(tutorial::Column::Name.eq(name))
            .order_by_asc(tutorial::Column::Id)
            .one(self.db)
            .await?;

        if let Some(tutorial) = existing {
            debug!(tutorial_id = tutorial.id, "Tutorial already exists");
            return Ok(tutorial);
        }

        let now = Utc::now();
        let tutorial = tutorial::ActiveModel {
            name: Set(name.to_string()),
            project_id: Set(project_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(tutorial_id = tutorial.id, project_id, "Tutorial created");

        Ok(tutorial)
    }

    /// Overwrite the name; an empty string is stored as-is.
    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
    ) -> Result<tutorial::Model, ServiceError> {
        let tutorial = self.find(id).await?;

        let name = name.ok_or_else(|| {
            ServiceError::validation("name", "The name field must be present.")
        })?;
        validation::max_length("name", &name)?;

        let mut active: tutorial::ActiveModel = tutorial.into();
        active.name = Set(name);
        active.updated_at = Set(Utc::now().into());
        let tutorial = active.update(self.db).await?;

        info!(tutorial_id = tutorial.id, "Tutorial updated");

        Ok(tutorial)
    }

    /// Delete a tutorial and its steps.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let tutorial = tutorial::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tutorial {}", id)))?;

        let steps = step::Entity::delete_many()
            .filter(step::Column::TutorialId.eq(tutorial.id))
            .exec(&txn)
            .await?;

        tutorial.delete(&txn).await?;
        txn.commit().await?;

        info!(tutorial_id = id, steps = steps.rows_affected, "Tutorial deleted");

        Ok(())
    }
}
