use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Cancels `cancellation` on Ctrl-C. Returns once either happened, so the caller can abort it or
/// simply cancel the token when the timer is done.
pub async fn detect_interrupt(cancellation: CancellationToken) {
    select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => {
                debug!("Interrupt received, stopping timer");
                cancellation.cancel();
            }
            // Without a handler the timer can still run to completion.
            Err(e) => warn!("Can't listen for Ctrl-C {e:?}"),
        },
        _ = cancellation.cancelled() => (),
    };
}
