//! Runtime collaborator: the Docker API surface the dispatcher consumes,
//! and its bollard-backed production implementation.

use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{EventMessage, EventMessageTypeEnum};
use bollard::query_parameters::{EventsOptions, InspectContainerOptions, ListContainersOptions};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::event::LifecycleEvent;

/// Stream of lifecycle events delivered by the runtime. A transport
/// error surfaces as an `Err` item; the stream ending means the daemon
/// closed the feed.
pub type EventStream = BoxStream<'static, Result<LifecycleEvent>>;

/// Docker API surface consumed by the dispatch pipeline.
///
/// Implementors must be safe for concurrent use: inspection calls are
/// issued from independently scheduled dispatch tasks while the control
/// loop keeps reading the event feed.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Lists the IDs of all currently running containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be retrieved.
    async fn list_containers(&self) -> Result<Vec<String>>;

    /// Fetches the full descriptor of a container by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is unknown or the call fails.
    async fn inspect_container(&self, id: &str) -> Result<serde_json::Value>;

    /// Subscribes to the daemon's live event feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription cannot be established.
    async fn subscribe_events(&self) -> Result<EventStream>;
}

/// Production runtime client backed by the Docker daemon API.
///
/// The underlying client multiplexes concurrent requests internally, so
/// one instance serves the control loop and every dispatch task.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connects to the Docker daemon, honoring `DOCKER_HOST` and falling
    /// back to the platform's default local socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint configuration is invalid.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl RuntimeClient for DockerRuntime {
    async fn list_containers(&self) -> Result<Vec<String>> {
        let containers = self
            .docker
            .list_containers(None::<ListContainersOptions>)
            .await?;
        Ok(containers.into_iter().filter_map(|c| c.id).collect())
    }

    async fn inspect_container(&self, id: &str) -> Result<serde_json::Value> {
        let descriptor = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(serde_json::to_value(descriptor)?)
    }

    async fn subscribe_events(&self) -> Result<EventStream> {
        let events = self
            .docker
            .events(None::<EventsOptions>)
            .filter_map(|message| async move {
                match message {
                    Ok(message) => map_event(message).map(Ok),
                    Err(source) => Some(Err(source.into())),
                }
            });
        Ok(events.boxed())
    }
}

/// Maps a daemon event message to a dispatchable lifecycle event.
///
/// Only container- and image-scoped events are surfaced (image events
/// carry the `untag`/`delete` actions); records missing an action or an
/// actor ID are dropped.
fn map_event(message: EventMessage) -> Option<LifecycleEvent> {
    if !matches!(
        message.typ,
        Some(EventMessageTypeEnum::CONTAINER | EventMessageTypeEnum::IMAGE)
    ) {
        return None;
    }
    let status = message.action?;
    let container_id = message.actor?.id?;
    Some(LifecycleEvent::new(status, container_id))
}
