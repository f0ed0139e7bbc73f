use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::events::DomainEvent;
use crate::core::pool::PoolError;
use crate::gateway::events::EventPublisher;

// MemoryPublisher keeps every published message; clones share the same buffer so a
// caller can inspect what a service has sent.
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    pub async fn events_named(&self, name: &str) -> Vec<DomainEvent> {
        self.events.read().await.iter()
            .filter(|e| e.name == name).cloned().collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, PoolError> {
        Ok(format!("memory://{}", topic))
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, PoolError> {
        let events = self.events.read().await;
        let mut topics: Vec<String> = events.iter().map(|e| format!("memory://{}", e.name)).collect();
        topics.dedup();
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), PoolError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[tokio::test]
    async fn test_should_share_published_events() {
        let publisher = MemoryPublisher::new();
        let mut shared = publisher.clone();
        let event = DomainEvent::added("release_hold", "connect", "h1", &HashMap::new(), &"h1").expect("build event");
        shared.publish(&event).await.expect("should publish");
        assert_eq!(1, publisher.events().await.len());
        assert_eq!(1, publisher.events_named("release_hold").await.len());
        assert_eq!(0, publisher.events_named("create_hold").await.len());
        assert_eq!(vec!["memory://release_hold".to_string()], shared.get_topics().await.expect("should get topics"));
    }
}
