use chrono::Utc;
use entity::{article, project, step, tutorial};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, info};

use super::relations;
use super::types::ProjectTree;
use super::validation;
use super::ServiceError;

/// Repository for projects.
pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all projects with tutorials.steps and articles.
    pub async fn list(&self) -> Result<Vec<ProjectTree>, ServiceError> {
        let projects = project::Entity::find()
            .order_by_asc(project::Column::Id)
            .all(self.db)
            .await?;

        Ok(relations::load_project_trees(self.db, projects).await?)
    }

    /// Get one project with tutorials.steps and articles.
    pub async fn get(&self, id: i32) -> Result<ProjectTree, ServiceError> {
        let project = self.find(id).await?;

        relations::load_project_trees(self.db, vec![project])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", id)))
    }

    /// Get the bare project row.
    pub async fn find(&self, id: i32) -> Result<project::Model, ServiceError> {
        project::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", id)))
    }

    /// First-or-create by name.
    pub async fn create(&self, name: &str) -> Result<project::Model, ServiceError> {
        validation::required_text("name", name)?;

        let existing = project::Entity::find()
            .filter(project::Column::Name.eq(name))
            .order_by_asc(project::Column::Id)
            .one(self.db)
            .await?;

        if let Some(project) = existing {
            debug!(project_id = project.id, "Project already exists");
            return Ok(project);
        }

        let now = Utc::now();
        let project = project::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(project_id = project.id, name = %project.name, "Project created");

        Ok(project)
    }

    /// Overwrite the name.
    ///
    /// The name must be present, but unlike creation an empty string is
    /// accepted and stored as-is.
    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
    ) -> Result<project::Model, ServiceError> {
        let project = self.find(id).await?;

        let name = name.ok_or_else(|| {
            ServiceError::validation("name", "The name field must be present.")
        })?;
        validation::max_length("name", &name)?;

        let mut active: project::ActiveModel = project.into();
        active.name = Set(name);
        active.updated_at = Set(Utc::now().into());
        let project = active.update(self.db).await?;

        info!(project_id = project.id, "Project updated");

        Ok(project)
    }

    /// Delete a project together with its tutorials, their steps and its articles.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let project = project::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", id)))?;

        let tutorial_ids: Vec<i32> = tutorial::Entity::find()
            .filter(tutorial::Column::ProjectId.eq(project.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if !tutorial_ids.is_empty() {
            step::Entity::delete_many()
                .filter(step::Column::TutorialId.is_in(tutorial_ids.clone()))
                .exec(&txn)
                .await?;
            tutorial::Entity::delete_many()
                .filter(tutorial::Column::Id.is_in(tutorial_ids.clone()))
                .exec(&txn)
                .await?;
        }

        let articles = article::Entity::delete_many()
            .filter(article::Column::ProjectId.eq(project.id))
            .exec(&txn)
            .await?;

        project.delete(&txn).await?;
        txn.commit().await?;

        info!(
            project_id = id,
            tutorials = tutorial_ids.len(),
            articles = articles.rows_affected,
            "Project deleted"
        );

        Ok(())
    }
}
