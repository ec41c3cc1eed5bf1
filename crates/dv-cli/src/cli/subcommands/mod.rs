mod auth;
mod checks;
mod project;

pub use auth::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
pub use checks::ChecksCommands;
pub use project::{ProjectCommands, ProjectCreateArgs, ProjectUpdateArgs};
