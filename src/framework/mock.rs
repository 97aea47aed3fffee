//! # Mock Framework
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of by a running actor. Use it to unit-test client wrappers
//! (e.g. `OrderClient`) and to inject failures that are awkward to reproduce with a real actor.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, canned replies | Real store |
//! | **Determinism** | Full | Subject to scheduler |
//! | **Error injection** | `return_err` | Needs specific state |
//!
//! For lower-level control, [`create_mock_client`] returns a client plus the raw receiver, and
//! the `expect_*` helpers pull the next request off it so a test can answer by hand.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Tick {
        id: T::Id,
        response: Result<T::Tick, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order; a request that does not match the next expectation
/// (different kind or different id) panics the responder task, which surfaces in the caller
/// as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        assert_eq!(id, want, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        assert_eq!(id, want, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Tick { id, respond_to }, Some(Expectation::Tick { id: want, response })) => {
                        assert_eq!(id, want, "tick called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Create { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::List { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Action { id, response })
    }

    pub fn expect_tick(&mut self, id: T::Id) -> ExpectationBuilder<T, T::Tick> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Tick { id, response })
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    queue: Queue<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        queue: Queue<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            queue,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        push(&self.queue, (self.make)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.queue, (self.make)(Err(error)));
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Tick request.
pub async fn expect_tick<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<T::Tick, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Tick { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{SimulationClock, TickReport};
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        value: u32,
        limit: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        limit: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Reset,
    }

    #[derive(Debug, PartialEq)]
    struct Counted(u32, bool);

    impl TickReport for Counted {
        fn is_final(&self) -> bool {
            self.1
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Counter error")]
    struct CounterError;

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = u32;
        type Create = CounterCreate;
        type Action = CounterAction;
        type ActionResult = u32;
        type Tick = Counted;
        type Context = ();
        type Error = CounterError;

        fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                value: 0,
                limit: params.limit,
            })
        }

        async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, Self::Error> {
            match action {
                CounterAction::Reset => {
                    let old = self.value;
                    self.value = 0;
                    Ok(old)
                }
            }
        }

        fn on_tick(&mut self, _: &()) -> Counted {
            if self.value < self.limit {
                self.value += 1;
            }
            Counted(self.value, self.value == self.limit)
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_helpers() {
        let (client, mut receiver) = create_mock_client::<Counter>(10);

        let task = tokio::spawn(async move { client.tick(7).await });

        let (id, responder) = expect_tick(&mut receiver).await.expect("Expected Tick request");
        assert_eq!(id, 7);
        responder.send(Ok(Counted(3, false))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Counted(3, false));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Counter>::new();
        mock.expect_create().return_ok(1);
        mock.expect_action(1).return_ok(4);
        mock.expect_get(1).return_err(FrameworkError::ActorClosed);
        mock.expect_list().return_ok(vec![Counter { id: 1, value: 0, limit: 5 }]);

        let client = mock.client();
        assert_eq!(client.create(CounterCreate { limit: 5 }).await.unwrap(), 1);
        assert_eq!(client.perform_action(1, CounterAction::Reset).await.unwrap(), 4);
        assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
        assert_eq!(client.list().await.unwrap().len(), 1);

        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_stops_on_final_tick() {
        let (actor, client) = crate::framework::ResourceActor::<Counter>::new(10);
        let actor_handle = tokio::spawn(actor.run(()));

        let id = client.create(CounterCreate { limit: 3 }).await.unwrap();
        let mut clock = SimulationClock::new(client.clone(), Duration::from_secs(1)).unwrap();
        assert!(clock.track(id));
        assert!(!clock.track(id), "one timer per entity");

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!clock.is_tracking(&id));
        assert_eq!(client.get(id).await.unwrap().unwrap().value, 3);

        drop(clock);
        drop(client);
        actor_handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_clock_rejects_zero_period() {
        let (_actor, client) = crate::framework::ResourceActor::<Counter>::new(10);
        let result = SimulationClock::new(client, Duration::ZERO);
        assert!(matches!(result, Err(FrameworkError::InvalidPeriod(_))));
    }

    #[tokio::test]
    async fn test_actor_lists_every_entity() {
        let (actor, client) = crate::framework::ResourceActor::<Counter>::new(0);
        let actor_handle = tokio::spawn(actor.run(()));

        for limit in [1, 2, 3] {
            client.create(CounterCreate { limit }).await.unwrap();
        }
        let mut limits: Vec<u32> = client.list().await.unwrap().iter().map(|c| c.limit).collect();
        limits.sort();
        assert_eq!(limits, vec![1, 2, 3]);

        drop(client);
        actor_handle.await.unwrap();
    }
}
