//! Top-level control loop: startup backfill, then live event streaming.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::command::HandlerCommand;
use crate::config::DispatchConfig;
use crate::error::{HookError, Result};
use crate::event::{LifecycleEvent, short_id};
use crate::inspect::inspect_payload;
use crate::runtime::RuntimeClient;
use crate::trigger::TriggerExecutor;

/// Bridges the runtime's lifecycle event feed to handler invocations.
///
/// Runs in two phases with no way back: a startup backfill that reports
/// every currently running container as an `exists` event, then a live
/// streaming phase that lasts until the feed closes. Event ingestion is
/// strictly ordered; handler completion is not, since every event is
/// handed to an independent task. There is no cap on in-flight handlers:
/// a burst of events produces an equal burst of concurrent child
/// processes.
pub struct Dispatcher<R> {
    runtime: Arc<R>,
    executor: Arc<TriggerExecutor>,
}

impl<R: RuntimeClient + 'static> Dispatcher<R> {
    /// Creates a dispatcher driving `runtime` with the given handler
    /// command and configuration.
    #[must_use]
    pub fn new(runtime: Arc<R>, command: HandlerCommand, config: DispatchConfig) -> Self {
        Self {
            runtime,
            executor: Arc::new(TriggerExecutor::new(command, config)),
        }
    }

    /// Runs the dispatcher until the event stream closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backfill cannot list containers, if the
    /// event feed cannot be subscribed, if the feed reports a transport
    /// error, or when the feed closes. Per-event handler and inspection
    /// failures are logged and never surface here.
    pub async fn run(&self) -> Result<()> {
        self.backfill().await?;
        self.stream_events().await
    }

    /// Reports every currently running container as an `exists` event.
    async fn backfill(&self) -> Result<()> {
        let containers = self.runtime.list_containers().await?;
        tracing::info!(count = containers.len(), "backfilling running containers");
        for id in containers {
            let _ = self.dispatch(LifecycleEvent::exists(id));
        }
        Ok(())
    }

    /// Drains the live event feed until it closes.
    async fn stream_events(&self) -> Result<()> {
        let mut events = self.runtime.subscribe_events().await?;
        tracing::info!("listening for container events");
        while let Some(event) = events.next().await {
            let _ = self.dispatch(event?);
        }
        Err(HookError::StreamClosed)
    }

    /// Hands one event to an independent task, so a slow or hanging
    /// handler never stalls ingestion of subsequent events.
    fn dispatch(&self, event: LifecycleEvent) -> JoinHandle<()> {
        let runtime = Arc::clone(&self.runtime);
        let executor = Arc::clone(&self.executor);
        tokio::spawn(async move {
            let payload = if event.skips_inspection() {
                None
            } else {
                Some(inspect_payload(runtime.as_ref(), &event.container_id).await)
            };
            match executor.run(&event.status, &event.container_id, payload).await {
                Ok(result) if !result.success() => {
                    tracing::error!(
                        id = short_id(&event.container_id),
                        event = %event.status,
                        exit_code = result.exit_code,
                        "handler exited with failure"
                    );
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::error!(
                        id = short_id(&event.container_id),
                        event = %event.status,
                        %error,
                        "handler execution failed"
                    );
                }
            }
        })
    }
}
