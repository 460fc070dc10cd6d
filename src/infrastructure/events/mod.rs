// Event stream integrations.

pub mod kafka;

pub use kafka::KafkaEventPublisher;
