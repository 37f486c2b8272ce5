use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    /// A required container object (`membership`, `profile`) is missing.
    #[error("Invalid member snapshot: missing {0}")]
    InvalidSnapshot(&'static str),
}
