//! Command execution helpers
//!
//! Wraps command bodies with timing and outcome logging.

use std::future::Future;
use std::time::Instant;

use convene_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command, logging its name, duration and outcome.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = execute_logged("meetings::list", || async {
///     list_meetings(&ctx).await
/// })
/// .await?;
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command_name, start.elapsed(), result.is_ok(), error_type);

    result
}
