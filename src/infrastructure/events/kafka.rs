use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;

use crate::config::KafkaConfig;
use crate::error::BoxError;
use crate::service::EventPublisher;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka-backed [`EventPublisher`].
///
/// Sends are synchronous from the caller's point of view: the future
/// resolves once the broker acknowledges the message (`acks=all`) or the
/// send fails. The producer is safe to share across request tasks.
pub struct KafkaEventPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaEventPublisher {
    pub fn new(config: &KafkaConfig) -> Result<Self, KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", config.brokers.join(","))
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .create()?;

        tracing::info!(
            brokers = %config.brokers.join(","),
            topic = %config.topic,
            "kafka producer created"
        );

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish(&self, key: &str, payload: Vec<u8>) -> Result<(), BoxError> {
        let record = FutureRecord::to(&self.topic).key(key).payload(&payload);

        match self.producer.send(record, Timeout::After(SEND_TIMEOUT)).await {
            Ok((partition, offset)) => {
                tracing::debug!(
                    topic = %self.topic,
                    key = %key,
                    partition = partition,
                    offset = offset,
                    "event published"
                );
                Ok(())
            }
            Err((err, _message)) => Err(err.into()),
        }
    }
}
