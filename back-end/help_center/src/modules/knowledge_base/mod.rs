//! Help center knowledge base: projects, tutorials, articles and steps.
//!
//! Each entity kind has its own service holding a borrowed connection.
//! Relationship loading is explicit (see [`relations`]); nothing is fetched
//! lazily behind the caller's back.

mod articles;
mod error;
mod projects;
pub mod relations;
mod steps;
mod tutorials;
mod types;
pub mod validation;

pub use articles::ArticleService;
pub use error::ServiceError;
pub use projects::ProjectService;
pub use steps::StepService;
pub use tutorials::TutorialService;
pub use types::{
    ArticleChanges, ArticleDetail, NewArticle, NewStep, ProjectTree, StepChanges, StepDetail,
    TutorialDetail, TutorialWithSteps,
};
