//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of a running actor. It makes client wrappers, and entities whose hooks
//! call other actors, testable without spawning those actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | Fully scripted | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Requires specific state |
//!
//! ## Testing Strategies
//!
//! **Pattern 0: Client logic against a pure mock.**
//!
//! ```rust,ignore
//! let mut catalog = MockClient::<Product>::new();
//! catalog.expect_get(ProductId(1)).return_ok(Some(laptop));
//! let client = CatalogClient::new(catalog.client());
//! assert_eq!(client.product(ProductId(1)).await?.name, "Laptop");
//! catalog.verify();
//! ```
//!
//! **Pattern 1: One real actor, mocked dependencies.** Spawn the actor under test with
//! `run(context)` where the context holds clients built from mocks.
//!
//! **Pattern 2: Full system.** Start every actor and drive it through the typed clients; see the
//! `tests/` directory of the storefront crate.
//!
//! For step-by-step control, [`create_mock_client`] returns the client plus the raw request
//! receiver, and the `expect_*` helpers pull the next request off it so the test can answer it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use crate::session::{SessionClient, SessionRequest, SessionState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the scripted answer.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    /// The scripted items are passed through the request's filter before being returned, so a
    /// mock can hold a whole catalog and still answer narrow queries correctly.
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectation queue poisoned")
        .push_back(expectation);
}

fn check_id<Id: PartialEq + std::fmt::Debug>(expected: &Id, actual: &Id) {
    assert_eq!(expected, actual, "mock received a request for an unexpected id");
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order; a request that does not match the next expectation
/// panics inside the mock task, which the caller observes as `FrameworkError::ActorDropped`.
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
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { filter, respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let filtered = response.map(|items| {
                            items
                                .into_iter()
                                .filter(|item| filter.matches(item))
                                .collect()
                        });
                        let _ = respond_to.send(filtered);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id(&want, &id);
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

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(&self.expectations, Expectation::Get { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Get { id: self.id, response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.expectations, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Create { response: Err(error) });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    /// Answers with those of `items` that pass the request's filter.
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.expectations, Expectation::List { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::List { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        push(&self.expectations, Expectation::Update { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Update { id: self.id, response: Err(error) });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        push(&self.expectations, Expectation::Delete { id: self.id, response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Delete { id: self.id, response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.expectations, Expectation::Action { id: self.id, response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Action { id: self.id, response: Err(error) });
    }
}

// =============================================================================
// STEP-BY-STEP HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Creates a session client and the receiver its commands arrive on.
pub fn create_mock_session<S: SessionState>(
    buffer_size: usize,
) -> (SessionClient<S>, mpsc::Receiver<SessionRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SessionClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next session command.
pub async fn expect_command<S: SessionState>(
    receiver: &mut mpsc::Receiver<SessionRequest<S>>,
) -> Option<(S::Command, Responder<S::Reply>)> {
    receiver
        .recv()
        .await
        .map(|request| (request.command, request.respond_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Sku {
        id: u32,
        code: String,
    }

    #[derive(Debug)]
    struct SkuCreate {
        code: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("sku error")]
    struct SkuError;

    #[async_trait]
    impl ActorEntity for Sku {
        type Id = u32;
        type Create = SkuCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = SkuError;

        fn from_create_params(id: u32, params: SkuCreate) -> Result<Self, SkuError> {
            Ok(Self { id, code: params.code })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), SkuError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SkuError> {
            Ok(())
        }
    }

    fn sku(id: u32, code: &str) -> Sku {
        Sku { id, code: code.into() }
    }

    #[tokio::test]
    async fn step_by_step_create() {
        let (client, mut receiver) = create_mock_client::<Sku>(10);

        let create_task = tokio::spawn(async move {
            client.create(SkuCreate { code: "LAP-1".into() }).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.code, "LAP-1");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn list_expectation_applies_request_filter() {
        let mut mock = MockClient::<Sku>::new();
        mock.expect_list().return_ok(vec![sku(1, "LAP-1"), sku(2, "PHN-1"), sku(3, "LAP-2")]);
        mock.expect_get(2).return_ok(Some(sku(2, "PHN-1")));

        let client = mock.client();
        let laptops = client
            .list(Filter::new(|s: &Sku| s.code.starts_with("LAP")))
            .await
            .unwrap();
        assert_eq!(laptops, vec![sku(1, "LAP-1"), sku(3, "LAP-2")]);

        let fetched = client.get(2).await.unwrap();
        assert_eq!(fetched, Some(sku(2, "PHN-1")));
        mock.verify();
    }

    #[tokio::test]
    async fn scripted_errors_reach_the_caller() {
        let mut mock = MockClient::<Sku>::new();
        mock.expect_delete(4).return_err(FrameworkError::NotFound("4".into()));

        let result = mock.client().delete(4).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "4"));
        assert_eq!(mock.remaining(), 0);
    }
}
