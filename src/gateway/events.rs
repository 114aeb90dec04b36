use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}

// DisabledPublisher drops every event.
#[derive(Debug, Default)]
pub struct DisabledPublisher;

#[async_trait]
impl EventPublisher for DisabledPublisher {
    async fn publish(&self, _event: &DomainEvent) -> Result<(), LibraryError> {
        Ok(())
    }
}
