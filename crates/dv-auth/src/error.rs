use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `dvz auth login`")]
    NotAuthenticated,

    #[error("token expired, run `dvz auth login` again")]
    TokenExpired,

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),
}
