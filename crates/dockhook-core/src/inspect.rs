//! Fail-open container state inspection.

use crate::event::short_id;
use crate::runtime::RuntimeClient;

/// Fetches and serializes the descriptor of a container, yielding the
/// JSON bytes fed to the handler's stdin.
///
/// Inspection is fail-open: a fetch or serialization failure is logged
/// as a warning and degrades the payload to empty bytes, so the handler
/// invocation itself is never blocked or aborted.
pub async fn inspect_payload<R>(runtime: &R, id: &str) -> Vec<u8>
where
    R: RuntimeClient + ?Sized,
{
    let descriptor = match runtime.inspect_container(id).await {
        Ok(descriptor) => descriptor,
        Err(error) => {
            tracing::warn!(id = short_id(id), %error, "unable to inspect container");
            return Vec::new();
        }
    };
    match serde_json::to_vec(&descriptor) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(id = short_id(id), %error, "unable to serialize container state");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{HookError, Result};
    use crate::runtime::EventStream;

    struct CannedRuntime {
        descriptor: Option<serde_json::Value>,
    }

    #[async_trait]
    impl RuntimeClient for CannedRuntime {
        async fn list_containers(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn inspect_container(&self, _id: &str) -> Result<serde_json::Value> {
            self.descriptor.clone().ok_or(HookError::StreamClosed)
        }

        async fn subscribe_events(&self) -> Result<EventStream> {
            Err(HookError::StreamClosed)
        }
    }

    #[tokio::test]
    async fn successful_inspection_yields_descriptor_bytes() {
        let runtime = CannedRuntime {
            descriptor: Some(serde_json::json!({"Id": "c1", "State": {"Running": false}})),
        };
        let payload = inspect_payload(&runtime, "c1").await;
        assert_eq!(
            payload,
            br#"{"Id":"c1","State":{"Running":false}}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn failed_inspection_yields_empty_payload() {
        let runtime = CannedRuntime { descriptor: None };
        let payload = inspect_payload(&runtime, "c1").await;
        assert!(payload.is_empty());
    }
}
