use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes each domain event as one structured tracing record.
#[derive(Debug)]
pub struct LogPublisher {
    topic: String,
}

impl LogPublisher {
    pub(crate) fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let metadata = serde_json::to_string(&event.metadata)?;
        tracing::info!(
            topic = %self.topic,
            event_id = %event.event_id,
            name = %event.name,
            group = %event.group,
            key = %event.key,
            kind = ?event.kind,
            metadata = %metadata,
            data = %event.json_data,
            created_at = %event.created_at.to_rfc3339(),
            "domain event"
        );
        Ok(())
    }
}
