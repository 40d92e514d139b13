pub use super::article::Entity as Article;
pub use super::project::Entity as Project;
pub use super::step::Entity as Step;
pub use super::tutorial::Entity as Tutorial;
