use crate::gateway::events::{DisabledPublisher, EventPublisher};
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;

pub fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => {
            Box::new(LogPublisher::new("catalog-events"))
        }
        GatewayPublisherVia::Disabled => {
            Box::new(DisabledPublisher)
        }
    }
}
