//! Composite read shapes and write inputs for the knowledge base services.

use entity::{article, project, step, tutorial};
use serde_json::Value as JsonValue;

/// A project with its tutorials (each carrying its steps) and its articles.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    pub project: project::Model,
    pub tutorials: Vec<TutorialWithSteps>,
    pub articles: Vec<article::Model>,
}

#[derive(Debug, Clone)]
pub struct TutorialWithSteps {
    pub tutorial: tutorial::Model,
    pub steps: Vec<step::Model>,
}

/// A tutorial with its parent project and its steps.
#[derive(Debug, Clone)]
pub struct TutorialDetail {
    pub tutorial: tutorial::Model,
    pub project: project::Model,
    pub steps: Vec<step::Model>,
}

/// A step with its tutorial and that tutorial's project.
#[derive(Debug, Clone)]
pub struct StepDetail {
    pub step: step::Model,
    pub tutorial: tutorial::Model,
    pub project: project::Model,
}

#[derive(Debug, Clone)]
pub struct ArticleDetail {
    pub article: article::Model,
    pub project: project::Model,
}

/// Fields of a step to insert. Missing fields are stored as NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewStep {
    pub title: Option<String>,
    pub order: Option<i32>,
    pub content: Option<JsonValue>,
}

/// Partial step update. Absent or blank fields leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct StepChanges {
    pub title: Option<String>,
    pub order: Option<i32>,
    pub content: Option<JsonValue>,
}

#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: String,
    pub content: Option<JsonValue>,
}

/// Partial article update. Absent or blank fields leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<JsonValue>,
}
