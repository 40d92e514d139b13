//! Response bodies.
//!
//! Relations are only serialized when the endpoint loaded them, so a bare
//! write response carries no `project`/`steps` keys at all.

use chrono::{DateTime, FixedOffset};
use entity::{article, project, step, tutorial};
use serde::Serialize;
use serde_json::Value;

use crate::modules::knowledge_base::{
    ArticleDetail, ProjectTree, StepDetail, TutorialDetail, TutorialWithSteps,
};

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutorials: Option<Vec<TutorialResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<ArticleResponse>>,
}

#[derive(Debug, Serialize)]
pub struct TutorialResponse {
    pub id: i32,
    pub name: String,
    pub project_id: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Box<ProjectResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepResponse>>,
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub id: i32,
    pub title: Option<String>,
    pub order: Option<i32>,
    pub content: Option<Value>,
    pub tutorial_id: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<Box<TutorialResponse>>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i32,
    pub title: String,
    pub content: Option<Value>,
    pub project_id: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Box<ProjectResponse>>,
}

impl From<project::Model> for ProjectResponse {
    fn from(p: project::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
            updated_at: p.updated_at,
            tutorials: None,
            articles: None,
        }
    }
}

impl From<ProjectTree> for ProjectResponse {
    fn from(tree: ProjectTree) -> Self {
        Self {
            tutorials: Some(tree.tutorials.into_iter().map(Into::into).collect()),
            articles: Some(tree.articles.into_iter().map(Into::into).collect()),
            ..tree.project.into()
        }
    }
}

impl From<tutorial::Model> for TutorialResponse {
    fn from(t: tutorial::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            project_id: t.project_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
            project: None,
            steps: None,
        }
    }
}

impl From<TutorialWithSteps> for TutorialResponse {
    fn from(t: TutorialWithSteps) -> Self {
        Self {
            steps: Some(t.steps.into_iter().map(Into::into).collect()),
            ..t.tutorial.into()
        }
    }
}

impl From<TutorialDetail> for TutorialResponse {
    fn from(t: TutorialDetail) -> Self {
        Self {
            project: Some(Box::new(t.project.into())),
            steps: Some(t.steps.into_iter().map(Into::into).collect()),
            ..t.tutorial.into()
        }
    }
}

impl From<step::Model> for StepResponse {
    fn from(s: step::Model) -> Self {
        Self {
            id: s.id,
            title: s.title,
            order: s.order,
            content: s.content,
            tutorial_id: s.tutorial_id,
            created_at: s.created_at,
            updated_at: s.updated_at,
            tutorial: None,
        }
    }
}

impl From<StepDetail> for StepResponse {
    fn from(s: StepDetail) -> Self {
        let tutorial = TutorialResponse {
            project: Some(Box::new(s.project.into())),
            ..s.tutorial.into()
        };
        Self {
            tutorial: Some(Box::new(tutorial)),
            ..s.step.into()
        }
    }
}

impl From<article::Model> for ArticleResponse {
    fn from(a: article::Model) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            project_id: a.project_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
            project: None,
        }
    }
}

impl From<ArticleDetail> for ArticleResponse {
    fn from(a: ArticleDetail) -> Self {
        Self {
            project: Some(Box::new(a.project.into())),
            ..a.article.into()
        }
    }
}
