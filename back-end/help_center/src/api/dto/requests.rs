//! Request bodies. Every field is optional at the wire level; the services
//! decide what is required.

use serde::Deserialize;
use serde_json::Value;

use crate::modules::knowledge_base::{ArticleChanges, NewArticle, NewStep, StepChanges};

/// Body of project and tutorial create/update.
#[derive(Debug, Default, Deserialize)]
pub struct NamePayload {
    pub name: Option<String>,
}

/// Body of step create, update, and each element of steps-many.
#[derive(Debug, Default, Deserialize)]
pub struct StepPayload {
    pub title: Option<String>,
    pub order: Option<i32>,
    pub content: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticlePayload {
    pub title: Option<String>,
    pub content: Option<Value>,
}

impl From<StepPayload> for NewStep {
    fn from(p: StepPayload) -> Self {
        Self {
            title: p.title,
            order: p.order,
            content: p.content,
        }
    }
}

impl From<StepPayload> for StepChanges {
    fn from(p: StepPayload) -> Self {
        Self {
            title: p.title,
            order: p.order,
            content: p.content,
        }
    }
}

impl From<ArticlePayload> for NewArticle {
    fn from(p: ArticlePayload) -> Self {
        Self {
            title: p.title.unwrap_or_default(),
            content: p.content,
        }
    }
}

impl From<ArticlePayload> for ArticleChanges {
    fn from(p: ArticlePayload) -> Self {
        Self {
            title: p.title,
            content: p.content,
        }
    }
}
