pub mod ddb;
pub mod events;
pub mod factory;
pub mod memory;
pub mod queue;
pub mod sns;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GatewayPublisherVia {
    Sns,
    LocalDynamoDB,
    InMemory,
}
