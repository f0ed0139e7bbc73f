use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::pool::PoolResult;
use crate::gateway::events::EventPublisher;

const CONNECT_GROUP: &str = "connect";

// ConnectAction names the message Connect has to process for a hold.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ConnectAction {
    // sends (or resends) the hold values; used for creation and for updates
    CreateHold,
    ReleaseHold,
}

impl ConnectAction {
    pub fn all() -> [ConnectAction; 2] {
        [ConnectAction::CreateHold, ConnectAction::ReleaseHold]
    }

    pub fn action_id(&self) -> &'static str {
        match self {
            ConnectAction::CreateHold => "create_hold",
            ConnectAction::ReleaseHold => "release_hold",
        }
    }
}

#[derive(Debug, Serialize)]
struct QueuedMessage<'a> {
    action_id: &'a str,
    object_id: &'a str,
}

// MessageQueue is the outbound message pool toward Connect.
#[async_trait]
pub trait MessageQueue: Sync + Send {
    async fn enqueue(&self, action: ConnectAction, object_id: &str) -> PoolResult<()>;
}

pub struct PublisherMessageQueue {
    publisher: Box<dyn EventPublisher>,
}

impl PublisherMessageQueue {
    pub fn new(publisher: Box<dyn EventPublisher>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl MessageQueue for PublisherMessageQueue {
    async fn enqueue(&self, action: ConnectAction, object_id: &str) -> PoolResult<()> {
        let message = QueuedMessage { action_id: action.action_id(), object_id };
        let metadata = HashMap::from([("action_id".to_string(), action.action_id().to_string())]);
        let event = match action {
            ConnectAction::CreateHold => DomainEvent::added(
                action.action_id(), CONNECT_GROUP, object_id, &metadata, &message)?,
            ConnectAction::ReleaseHold => DomainEvent::deleted(
                action.action_id(), CONNECT_GROUP, object_id, &metadata, &message)?,
        };
        self.publisher.publish(&event).await?;
        info!(action = action.action_id(), object_id, "enqueued connect message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::DomainEventType;
    use crate::gateway::memory::publisher::MemoryPublisher;
    use crate::gateway::queue::{ConnectAction, MessageQueue, PublisherMessageQueue};

    #[tokio::test]
    async fn test_should_enqueue_actions() {
        let publisher = MemoryPublisher::new();
        let queue = PublisherMessageQueue::new(Box::new(publisher.clone()));
        queue.enqueue(ConnectAction::CreateHold, "h1").await.expect("should enqueue");
        queue.enqueue(ConnectAction::ReleaseHold, "h1").await.expect("should enqueue");

        let events = publisher.events().await;
        assert_eq!(2, events.len());
        assert_eq!("create_hold", events[0].name.as_str());
        assert_eq!(DomainEventType::Added, events[0].kind);
        assert_eq!("release_hold", events[1].name.as_str());
        assert_eq!(DomainEventType::Deleted, events[1].kind);
        assert_eq!("h1", events[1].key.as_str());
        assert!(events[1].json_data.contains("\"object_id\":\"h1\""));
    }
}
