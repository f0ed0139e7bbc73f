use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use tracing::{debug, info};
use crate::core::events::DomainEvent;
use crate::core::pool::PoolError;
use crate::gateway::events::EventPublisher;

// SNSPublisher sends each message to the topic named after its Connect action.
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    topics: HashMap<String, String>,
}

impl SNSPublisher {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            topics: HashMap::new(),
        }
    }
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, PoolError> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        self.topics.insert(topic.to_string(), arn.to_string());
        info!("Created topic with ARN: {}", arn);
        Ok(arn.to_string())
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, PoolError> {
        let mut topics = vec![];
        let resp = self.client.list_topics().send().await?;
        for topic in resp.topics().unwrap_or_default() {
            topics.push(topic.topic_arn().unwrap_or_default().to_string());
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), PoolError> {
        let topic = self.topics.get(event.name.as_str());
        if let Some(arn) = topic {
            let json = serde_json::to_string(event)?;
            self.client.publish().topic_arn(arn).message(json).send().await?;
            debug!(event_id = event.event_id.as_str(), topic = arn.as_str(), "published message");
            Ok(())
        } else {
            Err(PoolError::runtime(format!("topic is not found {}", event.name).as_str(), None))
        }
    }
}

impl From<SdkError<CreateTopicError>> for PoolError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        PoolError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for PoolError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        PoolError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for PoolError {
    fn from(err: SdkError<PublishError>) -> Self {
        PoolError::runtime(format!("{:?}", err).as_str(), None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::{factory, GatewayPublisherVia};

    // needs AWS credentials in the environment
    #[tokio::test]
    #[ignore]
    async fn test_should_publish_to_sns() {
        let data = HashMap::from([("object_id", "h1")]);
        let event = DomainEvent::added("create_hold", "connect", "h1", &HashMap::new(), &data).expect("build event");
        let mut publisher = factory::create_publisher(GatewayPublisherVia::Sns).await;
        let _ = publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(!topics.is_empty());
    }
}
