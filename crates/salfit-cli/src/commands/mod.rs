//! Command implementations.

pub mod baseline;
pub mod evaluate;
pub mod fit;
pub mod reference;

pub use self::baseline::execute_baseline;
pub use self::evaluate::execute_evaluate;
pub use self::fit::execute_fit;
pub use self::reference::execute_reference;

use crate::error::Result;
use salfit_search::{RunBudget, SearchError, SearchMetrics};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Run `iterations` of `search` on a blocking thread, stopping early on Ctrl+C.
///
/// The search is handed back either way so the best result can be printed.
pub(crate) async fn run_interruptible<S, F>(search: S, iterations: usize, run: F) -> Result<S>
where
    S: Send + 'static,
    F: FnOnce(&mut S, RunBudget) -> std::result::Result<SearchMetrics, SearchError> + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let watcher = tokio::spawn(cancel_on_ctrl_c(Arc::clone(&cancel)));
    let result = run_blocking(search, RunBudget::iterations(iterations).with_cancel(cancel), run).await;
    watcher.abort();
    result
}

async fn run_blocking<S, F>(mut search: S, budget: RunBudget, run: F) -> Result<S>
where
    S: Send + 'static,
    F: FnOnce(&mut S, RunBudget) -> std::result::Result<SearchMetrics, SearchError> + Send + 'static,
{
    let (search, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = run(&mut search, budget);
        (search, outcome)
    })
    .await?;
    outcome?;
    Ok(search)
}

async fn cancel_on_ctrl_c(cancel: Arc<AtomicBool>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Interrupt received, stopping after the current iteration");
            cancel.store(true, Ordering::Relaxed);
        }
        Err(e) => tracing::warn!("Could not listen for Ctrl+C: {}", e),
    }
}
