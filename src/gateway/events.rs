use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::pool::PoolError;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn create_topic(&mut self, topic: &str) -> Result<String, PoolError>;
    async fn get_topics(&mut self) -> Result<Vec<String>, PoolError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), PoolError>;
}
