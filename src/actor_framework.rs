use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::payload::PipelineRequest;
use crate::pipeline::{Env, Operation, Pipeline, Reply};
use crate::store::{Keyed, Store};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A record type managed by a [`ResourceActor`].
///
/// Each resource names its pipelines; the actor only picks the pipeline for the
/// incoming operation and runs it against the store it owns.
pub trait Resource: Keyed + Clone + Debug + Serialize + Send + Sync + 'static {
    /// Used in error messages and log fields ("Dish", "Order").
    const NAME: &'static str;

    /// Staged-fields context a pipeline run starts from.
    type Stage: From<PipelineRequest> + Send + 'static;

    /// `None` when the resource does not support the operation.
    fn pipeline(operation: Operation) -> Option<&'static Pipeline<Self::Stage, Self>>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<R: Resource> {
    List {
        respond_to: Response<Reply<R>>,
    },
    Create {
        body: Value,
        respond_to: Response<Reply<R>>,
    },
    Read {
        id: String,
        respond_to: Response<Reply<R>>,
    },
    Update {
        id: String,
        body: Value,
        respond_to: Response<Reply<R>>,
    },
    Delete {
        id: String,
        respond_to: Response<Reply<R>>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one collection. Messages are handled one at a time, so every pipeline
/// run (lookup through mutation) is a critical section for that collection.
pub struct ResourceActor<R: Resource> {
    receiver: mpsc::Receiver<ResourceRequest<R>>,
    store: Store<R>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl<R: Resource> ResourceActor<R> {
    pub fn new(
        buffer_size: usize,
        store: Store<R>,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, ResourceClient<R>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self), fields(resource = R::NAME))]
    pub async fn run(mut self) {
        info!(records = self.store.len(), "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let result = self.execute(Operation::List, PipelineRequest::default());
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Create { body, respond_to } => {
                    let result = self.execute(Operation::Create, PipelineRequest::with_body(body));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Read { id, respond_to } => {
                    let result = self.execute(Operation::Read, PipelineRequest::with_route_id(id));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { id, body, respond_to } => {
                    let result = self.execute(Operation::Update, PipelineRequest::new(Some(id), body));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.execute(Operation::Delete, PipelineRequest::with_route_id(id));
                    let _ = respond_to.send(result);
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        info!("Actor stopped");
    }

    #[instrument(fields(resource = R::NAME, %operation, route_id = ?request.route_id), skip(self, request))]
    fn execute(&mut self, operation: Operation, request: PipelineRequest) -> Result<Reply<R>, ApiError> {
        debug!("Processing request");
        let pipeline = R::pipeline(operation).ok_or_else(|| {
            ApiError::MethodNotAllowed(format!("{} does not support {}", R::NAME, operation))
        })?;

        let mut env = Env::new(&mut self.store, &*self.next_id_fn);
        let result = pipeline.run(R::Stage::from(request), &mut env);
        match &result {
            Ok(reply) => debug!(status = reply.status(), "Request completed"),
            Err(e) => debug!(status = e.status(), error = %e, "Request rejected"),
        }
        result
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<R: Resource> {
    sender: mpsc::Sender<ResourceRequest<R>>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<R>>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> ResourceRequest<R>,
    ) -> Result<T, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::ActorCommunication("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::ActorCommunication("Actor dropped".to_string()))?
    }

    pub async fn list(&self) -> Result<Reply<R>, ApiError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn create(&self, body: Value) -> Result<Reply<R>, ApiError> {
        self.request(|respond_to| ResourceRequest::Create { body, respond_to }).await
    }

    pub async fn read(&self, id: String) -> Result<Reply<R>, ApiError> {
        self.request(|respond_to| ResourceRequest::Read { id, respond_to }).await
    }

    pub async fn update(&self, id: String, body: Value) -> Result<Reply<R>, ApiError> {
        self.request(|respond_to| ResourceRequest::Update { id, body, respond_to }).await
    }

    pub async fn delete(&self, id: String) -> Result<Reply<R>, ApiError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, ApiError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dish, Order};
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn counter(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_resource_actor_runs_pipelines() {
        let (actor, client) = ResourceActor::<Dish>::new(10, Store::new(), counter("dish"));
        tokio::spawn(actor.run());

        // 1. Create
        let reply = client
            .create(json!({ "data": {
                "name": "Dolcelatte and chickpea spaghetti",
                "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
                "price": 19,
                "image_url": "https://example.com/spaghetti.jpg",
            } }))
            .await
            .unwrap();
        assert_eq!(reply.status(), 201);
        let dish = reply.into_record().unwrap();
        assert_eq!(dish.id, "dish_1");

        // 2. Rejected create leaves the store untouched
        let err = client.create(json!({ "data": { "name": "Only a name" } })).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(client.count().await.unwrap(), 1);

        // 3. Unsupported operation
        let err = client.delete(dish.id.clone()).await.unwrap_err();
        assert_eq!(err, ApiError::MethodNotAllowed("Dish does not support delete".into()));

        // 4. Read back
        let read = client.read(dish.id.clone()).await.unwrap();
        assert_eq!(read, Reply::Found(dish));
    }

    #[tokio::test]
    async fn test_actor_stops_when_clients_drop() {
        let (actor, client) = ResourceActor::<Order>::new(4, Store::new(), counter("order"));
        let handle = tokio::spawn(actor.run());

        assert_eq!(client.list().await.unwrap(), Reply::Listed(vec![]));
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_actor_reports_communication_error() {
        let (actor, client) = ResourceActor::<Order>::new(4, Store::new(), counter("order"));
        drop(actor);

        let err = client.list().await.unwrap_err();
        assert_eq!(err, ApiError::ActorCommunication("Actor closed".into()));
        assert_eq!(err.status(), 500);
    }
}
