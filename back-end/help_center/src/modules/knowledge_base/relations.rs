//! Relationship resolver.
//!
//! Every endpoint declares the shape it needs and calls one of the `load_*`
//! functions here. Children are fetched in one query per kind and grouped in
//! memory.
//!
//! Sort rule for every collection: projects, tutorials and articles by id;
//! steps by `order` with unset orders last, then by id.

use std::collections::HashMap;

use entity::{article, project, step, tutorial};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::warn;

use super::types::{ArticleDetail, ProjectTree, StepDetail, TutorialDetail, TutorialWithSteps};

/// Sort steps into display sequence. Stable, so equal orders keep id order.
pub fn sort_steps(steps: &mut [step::Model]) {
    steps.sort_by_key(|s| (s.order.is_none(), s.order, s.id));
}

fn unique_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Steps of the given tutorials, grouped by tutorial id and sorted.
async fn steps_by_tutorial<C: ConnectionTrait>(
    db: &C,
    tutorial_ids: &[i32],
) -> Result<HashMap<i32, Vec<step::Model>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<step::Model>> = HashMap::new();
    if tutorial_ids.is_empty() {
        return Ok(grouped);
    }

    let steps = step::Entity::find()
        .filter(step::Column::TutorialId.is_in(tutorial_ids.to_vec()))
        .order_by_asc(step::Column::Id)
        .all(db)
        .await?;

    for s in steps {
        grouped.entry(s.tutorial_id).or_default().push(s);
    }
    for steps in grouped.values_mut() {
        sort_steps(steps);
    }

    Ok(grouped)
}

async fn tutorials_by_project<C: ConnectionTrait>(
    db: &C,
    project_ids: &[i32],
) -> Result<HashMap<i32, Vec<tutorial::Model>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<tutorial::Model>> = HashMap::new();
    if project_ids.is_empty() {
        return Ok(grouped);
    }

    let tutorials = tutorial::Entity::find()
        .filter(tutorial::Column::ProjectId.is_in(project_ids.to_vec()))
        .order_by_asc(tutorial::Column::Id)
        .all(db)
        .await?;

    for t in tutorials {
        grouped.entry(t.project_id).or_default().push(t);
    }

    Ok(grouped)
}

async fn articles_by_project<C: ConnectionTrait>(
    db: &C,
    project_ids: &[i32],
) -> Result<HashMap<i32, Vec<article::Model>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<article::Model>> = HashMap::new();
    if project_ids.is_empty() {
        return Ok(grouped);
    }

    let articles = article::Entity::find()
        .filter(article::Column::ProjectId.is_in(project_ids.to_vec()))
        .order_by_asc(article::Column::Id)
        .all(db)
        .await?;

    for a in articles {
        grouped.entry(a.project_id).or_default().push(a);
    }

    Ok(grouped)
}

async fn projects_by_id<C: ConnectionTrait>(
    db: &C,
    ids: &[i32],
) -> Result<HashMap<i32, project::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let projects = project::Entity::find()
        .filter(project::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await?;

    Ok(projects.into_iter().map(|p| (p.id, p)).collect())
}

async fn tutorials_by_id<C: ConnectionTrait>(
    db: &C,
    ids: &[i32],
) -> Result<HashMap<i32, tutorial::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let tutorials = tutorial::Entity::find()
        .filter(tutorial::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await?;

    Ok(tutorials.into_iter().map(|t| (t.id, t)).collect())
}

/// Project + tutorials.steps + articles, preserving the input order.
pub async fn load_project_trees<C: ConnectionTrait>(
    db: &C,
    projects: Vec<project::Model>,
) -> Result<Vec<ProjectTree>, DbErr> {
    let project_ids = unique_ids(projects.iter().map(|p| p.id));

    let mut tutorials = tutorials_by_project(db, &project_ids).await?;
    let mut articles = articles_by_project(db, &project_ids).await?;

    let tutorial_ids = unique_ids(tutorials.values().flatten().map(|t| t.id));
    let mut steps = steps_by_tutorial(db, &tutorial_ids).await?;

    Ok(projects
        .into_iter()
        .map(|project| {
            let tutorials = tutorials
                .remove(&project.id)
                .unwrap_or_default()
                .into_iter()
                .map(|tutorial| TutorialWithSteps {
                    steps: steps.remove(&tutorial.id).unwrap_or_default(),
                    tutorial,
                })
                .collect();

            ProjectTree {
                articles: articles.remove(&project.id).unwrap_or_default(),
                tutorials,
                project,
            }
        })
        .collect())
}

/// Tutorial + project + steps, preserving the input order.
pub async fn load_tutorial_details<C: ConnectionTrait>(
    db: &C,
    tutorials: Vec<tutorial::Model>,
) -> Result<Vec<TutorialDetail>, DbErr> {
    let project_ids = unique_ids(tutorials.iter().map(|t| t.project_id));
    let tutorial_ids = unique_ids(tutorials.iter().map(|t| t.id));

    let projects = projects_by_id(db, &project_ids).await?;
    let mut steps = steps_by_tutorial(db, &tutorial_ids).await?;

    Ok(tutorials
        .into_iter()
        .filter_map(|tutorial| {
            let Some(project) = projects.get(&tutorial.project_id).cloned() else {
                warn!(
                    tutorial_id = tutorial.id,
                    project_id = tutorial.project_id,
                    "Tutorial without project"
                );
                return None;
            };
            Some(TutorialDetail {
                steps: steps.remove(&tutorial.id).unwrap_or_default(),
                project,
                tutorial,
            })
        })
        .collect())
}

/// Step + tutorial + tutorial.project, preserving the input order.
pub async fn load_step_details<C: ConnectionTrait>(
    db: &C,
    steps: Vec<step::Model>,
) -> Result<Vec<StepDetail>, DbErr> {
    let tutorial_ids = unique_ids(steps.iter().map(|s| s.tutorial_id));
    let tutorials = tutorials_by_id(db, &tutorial_ids).await?;

    let project_ids = unique_ids(tutorials.values().map(|t| t.project_id));
    let projects = projects_by_id(db, &project_ids).await?;

    Ok(steps
        .into_iter()
        .filter_map(|step| {
            let tutorial = tutorials.get(&step.tutorial_id).cloned();
            let project = tutorial
                .as_ref()
                .and_then(|t| projects.get(&t.project_id).cloned());
            match (tutorial, project) {
                (Some(tutorial), Some(project)) => Some(StepDetail {
                    step,
                    tutorial,
                    project,
                }),
                _ => {
                    warn!(
                        step_id = step.id,
                        tutorial_id = step.tutorial_id,
                        "Step without tutorial"
                    );
                    None
                }
            }
        })
        .collect())
}

/// Article + project, preserving the input order.
pub async fn load_article_details<C: ConnectionTrait>(
    db: &C,
    articles: Vec<article::Model>,
) -> Result<Vec<ArticleDetail>, DbErr> {
    let project_ids = unique_ids(articles.iter().map(|a| a.project_id));
    let projects = projects_by_id(db, &project_ids).await?;

    Ok(articles
        .into_iter()
        .filter_map(|article| {
            let Some(project) = projects.get(&article.project_id).cloned() else {
                warn!(
                    article_id = article.id,
                    project_id = article.project_id,
                    "Article without project"
                );
                return None;
            };
            Some(ArticleDetail { article, project })
        })
        .collect())
}
