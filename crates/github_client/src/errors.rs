//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading repository
//! configuration from the GitHub API through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Each variant provides specific context about what went wrong so callers can
/// decide whether a failure is fatal for a whole import run or only for a
/// single repository.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, RepositoryClient};
///
/// match client.get_repository("my-org", "my-repo").await {
///     Ok(repo) => println!("Default branch: {:?}", repo.default_branch),
///     Err(Error::NotFound) => eprintln!("Repository does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when the client cannot be built, for instance because
    /// the token is empty or the API base URL cannot be parsed.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the GitHub API returns a payload that cannot be
    /// parsed into the expected raw structure.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GraphQL endpoint reported one or more errors.
    #[error("GraphQL request failed: {0}")]
    GraphQl(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested resource does not exist or is not
    /// accessible with the current authentication.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// A REST request failed for any other reason.
    #[error("Request to '{route}' failed: {message}")]
    RequestFailed { route: String, message: String },
}
