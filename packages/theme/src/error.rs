use thiserror::Error;

pub type ThemeResult<T> = Result<T, ThemeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    #[error("Token '{0}' has no value and no fallback")]
    UnresolvedToken(String),

    #[error("Token '{0}' refers back to itself")]
    CyclicToken(String),

    #[error("Unbalanced var() in '{0}'")]
    Malformed(String),
}
