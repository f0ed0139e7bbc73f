use lazy_static::lazy_static;
use tracing::error;
use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::gateway::queue::{ConnectAction, MessageQueue, PublisherMessageQueue};
use crate::gateway::sns::publisher::SNSPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client};

lazy_static! {
    // shared by every service built for the in-memory store
    static ref MEMORY_PUBLISHER: MemoryPublisher = MemoryPublisher::new();
}

pub async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            let mut publisher = SNSPublisher::new(client);
            for action in ConnectAction::all() {
                if let Err(err) = publisher.create_topic(action.action_id()).await {
                    error!("failed to create topic {}: {}", action.action_id(), err);
                }
            }
            Box::new(publisher)
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            Box::new(DDBPublisher::new(client, "events"))
        }
        GatewayPublisherVia::InMemory => {
            Box::new(memory_publisher())
        }
    }
}

pub fn memory_publisher() -> MemoryPublisher {
    MEMORY_PUBLISHER.clone()
}

pub async fn create_message_queue(via: GatewayPublisherVia) -> Box<dyn MessageQueue> {
    Box::new(PublisherMessageQueue::new(create_publisher(via).await))
}
