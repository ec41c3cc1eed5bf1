pub mod admin;
pub mod auth;
pub mod checks;
pub mod dispatch;
pub mod project;
pub mod run;
pub mod schema;
pub mod shared;
pub mod shell;
