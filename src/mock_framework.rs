//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

type Responder<R, T> = oneshot::Sender<Result<R, FrameworkError<<T as Entity>::Error>>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so the test plays the
/// store: it inspects each request and answers with success or failure.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Owner, T::CreateParams, Responder<T::Id, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { owner, params, respond_to }) => Some((owner, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Owner, T::Id, Responder<Option<T>, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { owner, id, respond_to }) => Some((owner, id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Owner, Responder<Vec<T>, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { owner, respond_to }) => Some((owner, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Owner, T::Id, Responder<(), T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { owner, id, respond_to }) => Some((owner, id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Owner, T::Id, T::Action, Responder<T::ActionResult, T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { owner, id, action, respond_to }) => Some((owner, id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use crate::clients::SettingsClient;
    use crate::domain::Settings;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Settings>(10);
        let client = SettingsClient::new(inner);

        let task = tokio::spawn(async move { client.get_settings("tenant_a".to_string()).await });

        let (owner, id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(owner, "tenant_a");
        assert_eq!(id, "settings_tenant_a");
        let mut values = BTreeMap::new();
        values.insert("language".to_string(), "tr".to_string());
        responder
            .send(Ok(Some(Settings { id, owner, values: values.clone() })))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(values));
    }
}
