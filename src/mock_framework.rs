//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_delete`] to assert behavior.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::actor_framework::{Resource, ResourceClient, ResourceRequest, Response};
use crate::pipeline::Reply;

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it reads each request off the receiver and
/// answers through the request's responder, so success, failure and ordering
/// are all under the test's control.
pub fn create_mock_client<R: Resource>(
    buffer_size: usize,
) -> (ResourceClient<R>, mpsc::Receiver<ResourceRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<R: Resource>(
    receiver: &mut mpsc::Receiver<ResourceRequest<R>>,
) -> Option<(Value, Response<Reply<R>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { body, respond_to }) => Some((body, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Read request
pub async fn expect_read<R: Resource>(
    receiver: &mut mpsc::Receiver<ResourceRequest<R>>,
) -> Option<(String, Response<Reply<R>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Read { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<R: Resource>(
    receiver: &mut mpsc::Receiver<ResourceRequest<R>>,
) -> Option<(String, Response<Reply<R>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dish;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let read_task = tokio::spawn(async move { client.read("d1".to_string()).await });

        let (id, responder) = expect_read(&mut receiver).await.expect("Expected Read request");
        assert_eq!(id, "d1");
        let dish = Dish::new("d1", "Test", "A dish", 3, "test.png");
        responder.send(Ok(Reply::Found(dish.clone()))).unwrap();

        let result = read_task.await.unwrap();
        assert_eq!(result, Ok(Reply::Found(dish)));
    }
}
