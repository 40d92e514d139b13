use chrono::Utc;
use entity::{article, project};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use tracing::{debug, info};

use super::relations;
use super::types::{ArticleChanges, ArticleDetail, NewArticle};
use super::validation;
use super::ServiceError;

/// Repository for project articles.
pub struct ArticleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArticleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Articles of a project, each with its project.
    pub async fn list_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<ArticleDetail>, ServiceError> {
        self.project(project_id).await?;

        let articles = article::Entity::find()
            .filter(article::Column::ProjectId.eq(project_id))
            .order_by_asc(article::Column::Id)
            .all(self.db)
            .await?;

        Ok(relations::load_article_details(self.db, articles).await?)
    }

    pub async fn get(&self, id: i32) -> Result<ArticleDetail, ServiceError> {
        let article = self.find(id).await?;

        relations::load_article_details(self.db, vec![article])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::NotFound(format!("Article {}", id)))
    }

    pub async fn find(&self, id: i32) -> Result<article::Model, ServiceError> {
        article::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Article {}", id)))
    }

    /// First-or-create by (title, content, project).
    pub async fn create(
        &self,
        project_id: i32,
        new: NewArticle,
    ) -> Result<article::Model, ServiceError> {
        self.project(project_id).await?;
        validation::required_text("title", &new.title)?;

        let candidates = article::Entity::find()
            .filter(article::Column::ProjectId.eq(project_id))
            .filter(article::Column::Title.eq(new.title.as_str()))
            .order_by_asc(article::Column::Id)
            .all(self.db)
            .await?;

        if let Some(article) = candidates.into_iter().find(|a| a.content == new.content) {
            debug!(article_id = article.id, "Article already exists");
            return Ok(article);
        }

        let now = Utc::now();
        let article = article::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            project_id: Set(project_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(article_id = article.id, project_id, "Article created");

        Ok(article)
    }

    /// Apply the non-blank fields of `changes`.
    pub async fn update(
        &self,
        id: i32,
        changes: ArticleChanges,
    ) -> Result<article::Model, ServiceError> {
        let article = self.find(id).await?;
        let mut active: article::ActiveModel = article.into();

        if let Some(title) = changes.title.filter(|t| !t.is_empty()) {
            validation::max_length("title", &title)?;
            active.title = Set(title);
        }

        if let Some(content) = changes.content.filter(|c| !validation::is_blank(c)) {
            active.content = Set(Some(content));
        }

        active.updated_at = Set(Utc::now().into());
        let article = active.update(self.db).await?;

        info!(article_id = article.id, "Article updated");

        Ok(article)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let article = self.find(id).await?;
        article.delete(self.db).await?;

        info!(article_id = id, "Article deleted");

        Ok(())
    }

    async fn project(&self, id: i32) -> Result<project::Model, ServiceError> {
        project::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {}", id)))
    }
}
