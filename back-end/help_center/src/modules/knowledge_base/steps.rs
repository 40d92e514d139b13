use chrono::{DateTime, FixedOffset, Utc};
use entity::{step, tutorial};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use super::relations;
use super::types::{NewStep, StepChanges, StepDetail};
use super::validation;
use super::ServiceError;

/// Repository for tutorial steps, including the bulk replacement of a
/// tutorial's whole step list.
pub struct StepService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StepService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Steps of a tutorial in display sequence, each with tutorial.project.
    pub async fn list_for_tutorial(
        &self,
        tutorial_id: i32,
    ) -> Result<Vec<StepDetail>, ServiceError> {
        self.tutorial(tutorial_id).await?;

        let mut steps = step::Entity::find()
            .filter(step::Column::TutorialId.eq(tutorial_id))
            .order_by_asc(step::Column::Id)
            .all(self.db)
            .await?;
        relations::sort_steps(&mut steps);

        Ok(relations::load_step_details(self.db, steps).await?)
    }

    pub async fn get(&self, id: i32) -> Result<StepDetail, ServiceError> {
        let step = self.find(id).await?;

        relations::load_step_details(self.db, vec![step])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::NotFound(format!("Step {}", id)))
    }

    pub async fn find(&self, id: i32) -> Result<step::Model, ServiceError> {
        step::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Step {}", id)))
    }

    /// First-or-create by (title, order, content, tutorial).
    pub async fn create(
        &self,
        tutorial_id: i32,
        new: NewStep,
    ) -> Result<step::Model, ServiceError> {
        self.tutorial(tutorial_id).await?;

        let title = new.title.as_deref().unwrap_or_default();
        validation::required_text("title", title)?;

        let candidates = matching(
            step::Entity::find().filter(step::Column::TutorialId.eq(tutorial_id)),
            &new,
        )
        .order_by_asc(step::Column::Id)
        .all(self.db)
        .await?;

        if let Some(step) = candidates.into_iter().find(|s| s.content == new.content) {
            debug!(step_id = step.id, "Step already exists");
            return Ok(step);
        }

        let step = insert_active(tutorial_id, new).insert(self.db).await?;

        info!(step_id = step.id, tutorial_id, "Step created");

        Ok(step)
    }

    /// Replace every step of a tutorial with `steps`, in one transaction.
    ///
    /// Existing steps are deleted unconditionally, then each descriptor is
    /// inserted in sequence order with its fields copied verbatim. An empty
    /// list leaves the tutorial without steps. Any failure rolls the whole
    /// replacement back. Concurrent replacements of the same tutorial run one
    /// after the other; the tutorial's `updated_at` is bumped.
    pub async fn replace_all(
        &self,
        tutorial_id: i32,
        steps: Vec<NewStep>,
    ) -> Result<Vec<step::Model>, ServiceError> {
        for (index, s) in steps.iter().enumerate() {
            if let Some(title) = s.title.as_deref() {
                validation::max_length(&format!("{}.title", index), title)?;
            }
        }

        let txn = self.db.begin().await?;

        // Touching the tutorial row first takes the write lock: a row lock on
        // PostgreSQL, the database write lock on SQLite, where a waiting writer
        // is queued by the driver's busy timeout.
        let now: DateTime<FixedOffset> = Utc::now().into();
        let touched = tutorial::Entity::update_many()
            .col_expr(tutorial::Column::UpdatedAt, Expr::value(now))
            .filter(tutorial::Column::Id.eq(tutorial_id))
            .exec(&txn)
            .await?
            .rows_affected;
        if touched == 0 {
            return Err(ServiceError::NotFound(format!("Tutorial {}", tutorial_id)));
        }

        let removed = step::Entity::delete_many()
            .filter(step::Column::TutorialId.eq(tutorial_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let mut inserted = Vec::with_capacity(steps.len());
        for new in steps {
            inserted.push(insert_active(tutorial_id, new).insert(&txn).await?);
        }

        txn.commit().await?;

        info!(
            tutorial_id,
            removed,
            inserted = inserted.len(),
            "Tutorial steps replaced"
        );

        Ok(inserted)
    }

    /// Apply the non-blank fields of `changes`.
    ///
    /// Blank means null, `""` or an empty JSON array/object. Numbers are never
    /// blank, so `order: 0` overwrites rather than being skipped the way a
    /// PHP-style `empty()` check would.
    pub async fn update(
        &self,
        id: i32,
        changes: StepChanges,
    ) -> Result<step::Model, ServiceError> {
        let step = self.find(id).await?;
        let mut active: step::ActiveModel = step.into();

        if let Some(title) = changes.title.filter(|t| !t.is_empty()) {
            validation::max_length("title", &title)?;
            active.title = Set(Some(title));
        }

        if let Some(order) = changes.order {
            active.order = Set(Some(order));
        }

        if let Some(content) = changes.content.filter(|c| !validation::is_blank(c)) {
            active.content = Set(Some(content));
        }

        active.updated_at = Set(Utc::now().into());
        let step = active.update(self.db).await?;

        info!(step_id = step.id, "Step updated");

        Ok(step)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let step = self.find(id).await?;
        step.delete(self.db).await?;

        info!(step_id = id, "Step deleted");

        Ok(())
    }

    async fn tutorial(&self, id: i32) -> Result<tutorial::Model, ServiceError> {
        tutorial::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tutorial {}", id)))
    }
}

/// Narrow a step query to rows whose title and order equal the descriptor's,
/// treating `None` as SQL NULL. JSON content is compared by the caller.
fn matching(query: Select<step::Entity>, new: &NewStep) -> Select<step::Entity> {
    let query = match new.title.as_deref() {
        Some(title) => query.filter(step::Column::Title.eq(title)),
        None => query.filter(step::Column::Title.is_null()),
    };

    match new.order {
        Some(order) => query.filter(step::Column::Order.eq(order)),
        None => query.filter(step::Column::Order.is_null()),
    }
}

fn insert_active(tutorial_id: i32, new: NewStep) -> step::ActiveModel {
    let now = Utc::now();
    step::ActiveModel {
        title: Set(new.title),
        order: Set(new.order),
        content: Set(new.content),
        tutorial_id: Set(tutorial_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
}
