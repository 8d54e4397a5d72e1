use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any tenant-owned entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type Owner: Eq + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Domain error raised by the hooks below
    type Error: Clone + Send + Sync + Debug + Display + 'static;

    fn id(&self) -> &Self::Id;

    /// Tenant the entity belongs to. Requests from any other tenant never see it.
    fn owner(&self) -> &Self::Owner;

    /// Construct the full Entity from the ID, owner and params
    fn from_create(id: Self::Id, owner: Self::Owner, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors surfaced by the generic store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    /// Missing, or owned by another tenant.
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Domain(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        owner: T::Owner,
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        owner: T::Owner,
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        owner: T::Owner,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        owner: T::Owner,
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        owner: T::Owner,
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        owner: T::Owner,
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Patches the row under `id`, or creates it from `params` when absent.
    /// Both paths run inside one message, so concurrent upserts never race.
    Upsert {
        owner: T::Owner,
        id: T::Id,
        params: T::CreateParams,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Ids in creation order; `List` answers in this order.
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { owner, params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(owner, params));
                }
                ResourceRequest::Get { owner, id, respond_to } => {
                    let item = self.owned(&owner, &id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { owner, respond_to } => {
                    let items = self
                        .insertion_order
                        .iter()
                        .filter_map(|id| self.store.get(id))
                        .filter(|item| item.owner() == &owner)
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { owner, id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(owner, id, patch));
                }
                ResourceRequest::Delete { owner, id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(owner, id));
                }
                ResourceRequest::Action { owner, id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(owner, id, action));
                }
                ResourceRequest::Upsert { owner, id, params, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_upsert(owner, id, params, patch));
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn owned(&self, owner: &T::Owner, id: &T::Id) -> Option<&T> {
        self.store.get(id).filter(|item| item.owner() == owner)
    }

    fn owned_mut(&mut self, owner: &T::Owner, id: &T::Id) -> Result<&mut T, FrameworkError<T::Error>> {
        match self.store.get_mut(id) {
            Some(item) if item.owner() == owner => Ok(item),
            _ => {
                debug!(%id, %owner, "Item not found for owner");
                Err(FrameworkError::NotFound(id.to_string()))
            }
        }
    }

    fn handle_create(&mut self, owner: T::Owner, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let item = self.insert_new(id, owner, params)?;
        Ok(item.id().clone())
    }

    fn insert_new(&mut self, id: T::Id, owner: T::Owner, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let mut item = T::from_create(id, owner, params).map_err(FrameworkError::Domain)?;
        item.on_create().map_err(FrameworkError::Domain)?;
        let id = item.id().clone();
        debug!(%id, "Item created");
        self.insertion_order.push(id.clone());
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn handle_upsert(&mut self, owner: T::Owner, id: T::Id, params: T::CreateParams, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        if self.store.contains_key(&id) {
            self.handle_update(owner, id, patch)
        } else {
            self.insert_new(id, owner, params)
        }
    }

    // Hooks run against a copy so a failing hook leaves the stored row untouched.
    fn handle_update(&mut self, owner: T::Owner, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self.owned_mut(&owner, &id)?;
        let mut candidate = item.clone();
        candidate.on_update(patch).map_err(FrameworkError::Domain)?;
        *item = candidate.clone();
        Ok(candidate)
    }

    fn handle_delete(&mut self, owner: T::Owner, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self.owned_mut(&owner, &id)?;
        item.on_delete().map_err(FrameworkError::Domain)?;
        self.store.remove(&id);
        self.insertion_order.retain(|existing| existing != &id);
        debug!(%id, "Item deleted");
        Ok(())
    }

    fn handle_action(&mut self, owner: T::Owner, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let item = self.owned_mut(&owner, &id)?;
        let mut candidate = item.clone();
        match candidate.handle_action(action) {
            Ok(result) => {
                *item = candidate;
                Ok(result)
            }
            Err(e) => {
                warn!(%id, error = %e, "Action rejected");
                Err(FrameworkError::Domain(e))
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would demand `T: Clone` bounds on every associated type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, owner: T::Owner, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { owner, params, respond_to }).await
    }

    pub async fn get(&self, owner: T::Owner, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { owner, id, respond_to }).await
    }

    pub async fn list(&self, owner: T::Owner) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { owner, respond_to }).await
    }

    pub async fn update(&self, owner: T::Owner, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { owner, id, patch, respond_to }).await
    }

    pub async fn delete(&self, owner: T::Owner, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { owner, id, respond_to }).await
    }

    pub async fn perform_action(&self, owner: T::Owner, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { owner, id, action, respond_to }).await
    }

    pub async fn upsert(&self, owner: T::Owner, id: T::Id, params: T::CreateParams, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Upsert { owner, id, params, patch, respond_to }).await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
