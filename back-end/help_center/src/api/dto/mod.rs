mod error;
mod requests;
mod responses;

pub use error::ApiError;
pub use requests::{ArticlePayload, NamePayload, StepPayload};
pub use responses::{ArticleResponse, ProjectResponse, StepResponse, TutorialResponse};
