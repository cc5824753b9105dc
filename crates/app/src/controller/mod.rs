//! CRUD Controllers
//!
//! A [`CrudController`] owns the cached list, the form draft, the edit target
//! and the error slot for one resource screen. It talks to the server through
//! a [`RemoteCollection`] and re-synchronizes its cache after every
//! successful mutation according to the resource's [`Resync`] policy.
//!
//! Every operation takes `&mut self`, so a second action cannot start on the
//! same controller while one is still awaiting the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use stockroom::{
    ids::TypedId,
    products::Products,
    resource::{Resource, Resync},
    users::Users,
};

use crate::remote::{RemoteCollection, RemoteError};

mod errors;
mod products;

pub use errors::{CrudError, DomainError, Operation};

/// Controller for the product screen.
pub type ProductsController = CrudController<Products>;

/// Controller for the user screen.
pub type UsersController = CrudController<Users>;

/// Where the screen's form currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in progress; a submit creates unless an edit target is kept
    /// from a failed update.
    #[default]
    Idle,

    /// An entity has been loaded into the draft.
    Editing,

    /// A request is awaiting the server.
    Submitting,
}

/// At most one human-readable error per screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot(Option<String>);

impl ErrorSlot {
    /// Current message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Replace the current message.
    pub fn set(&mut self, message: impl Into<String>) {
        self.0 = Some(message.into());
    }

    /// Remove the current message.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

enum Change<R: Resource> {
    Created(R::Entity),
    Updated(R::Entity),
    Deleted(TypedId<R::Entity>),
}

/// State and actions of one CRUD screen.
pub struct CrudController<R: Resource> {
    client: Arc<dyn RemoteCollection<R>>,
    items: Vec<R::Entity>,
    draft: R::Draft,
    edit_target: Option<TypedId<R::Entity>>,
    error: ErrorSlot,
    phase: Phase,
    published: watch::Sender<Vec<R::Entity>>,
}

impl<R: Resource> CrudController<R> {
    /// Create a controller with an empty cache.
    #[must_use]
    pub fn new(client: Arc<dyn RemoteCollection<R>>) -> Self {
        let (published, _) = watch::channel(Vec::new());

        Self {
            client,
            items: Vec::new(),
            draft: R::Draft::default(),
            edit_target: None,
            error: ErrorSlot::default(),
            phase: Phase::Idle,
            published,
        }
    }

    /// Cached entities, as of the last successful round trip.
    #[must_use]
    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    /// Cached entity with the given identifier.
    #[must_use]
    pub fn find(&self, id: &TypedId<R::Entity>) -> Option<&R::Entity> {
        self.items.iter().find(|entity| R::id(entity) == id)
    }

    /// Current form draft.
    #[must_use]
    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    /// Mutable access to the form draft, for field input.
    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    /// Identifier the next submit will update, if any.
    #[must_use]
    pub fn edit_target(&self) -> Option<&TypedId<R::Entity>> {
        self.edit_target.as_ref()
    }

    /// Current error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// Current phase of the form.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Watch the cached list; every re-synchronization publishes a new value.
    ///
    /// Receivers may be dropped at any time.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<R::Entity>> {
        self.published.subscribe()
    }

    /// Replace the cache with the server's current list.
    ///
    /// # Errors
    ///
    /// Returns a [`CrudError::Remote`] when the listing fails; the cache is
    /// left as it was.
    pub async fn refresh(&mut self) -> Result<(), CrudError> {
        self.error.clear();

        self.reload().await
    }

    /// Load a cached entity into the draft and make it the edit target.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotLoaded`] when the identifier is not cached.
    pub fn edit(&mut self, id: &TypedId<R::Entity>) -> Result<(), CrudError> {
        let Some(entity) = self.find(id) else {
            return Err(self.fail(CrudError::from(DomainError::NotLoaded {
                resource: R::SINGULAR,
                id: id.to_string(),
            })));
        };

        let draft = R::edit_draft(entity);

        self.draft = draft;
        self.edit_target = Some(id.clone());
        self.error.clear();
        self.phase = Phase::Editing;

        Ok(())
    }

    /// Abandon any edit and start a blank draft; the next submit creates.
    pub fn start_new(&mut self) {
        self.draft = R::Draft::default();
        self.edit_target = None;
        self.phase = Phase::Idle;
    }

    /// Submit the draft: update the edit target if there is one, otherwise
    /// create.
    ///
    /// On success the draft, edit target and error are cleared and the cache
    /// is re-synchronized. On failure the draft and edit target are kept.
    ///
    /// # Errors
    ///
    /// Returns a [`CrudError::Validation`] (no request is made) or a
    /// [`CrudError::Remote`].
    pub async fn submit(&mut self) -> Result<(), CrudError> {
        self.error.clear();

        let payload = match R::validate(&self.draft) {
            Ok(payload) => payload,
            Err(source) => {
                self.phase = Phase::Idle;

                return Err(self.fail(CrudError::Validation {
                    resource: R::SINGULAR,
                    source,
                }));
            }
        };

        self.phase = Phase::Submitting;

        let (operation, result) = match self.edit_target.clone() {
            Some(id) => (
                Operation::Update,
                self.client.update(id, payload).await.map(Change::Updated),
            ),
            None => (
                Operation::Create,
                self.client.create(payload).await.map(Change::Created),
            ),
        };

        self.phase = Phase::Idle;

        let change = result.map_err(|source| self.remote_failure(operation, source))?;

        self.draft = R::Draft::default();
        self.edit_target = None;

        self.resync(change).await
    }

    /// Delete an entity. There is no confirmation step.
    ///
    /// # Errors
    ///
    /// Returns a [`CrudError::Remote`]; the cache is left unchanged.
    pub async fn delete(&mut self, id: &TypedId<R::Entity>) -> Result<(), CrudError> {
        self.error.clear();
        self.phase = Phase::Submitting;

        let result = self.client.delete(id.clone()).await;

        self.phase = Phase::Idle;

        result.map_err(|source| self.remote_failure(Operation::Delete, source))?;

        if self.edit_target.as_ref() == Some(id) {
            self.start_new();
        }

        self.resync(Change::Deleted(id.clone())).await
    }

    async fn reload(&mut self) -> Result<(), CrudError> {
        match self.client.list().await {
            Ok(items) => {
                self.replace_items(items);

                Ok(())
            }
            Err(source) => Err(self.fail(CrudError::Remote {
                operation: Operation::Fetch,
                resource: R::PLURAL,
                source,
            })),
        }
    }

    async fn resync(&mut self, change: Change<R>) -> Result<(), CrudError> {
        match &change {
            Change::Created(entity) => info!(id = %R::id(entity), "created {}", R::SINGULAR),
            Change::Updated(entity) => info!(id = %R::id(entity), "updated {}", R::SINGULAR),
            Change::Deleted(id) => info!(id = %id, "deleted {}", R::SINGULAR),
        }

        match R::RESYNC {
            Resync::Refetch => self.reload().await,
            Resync::Patch => {
                self.patch(change);

                Ok(())
            }
        }
    }

    fn patch(&mut self, change: Change<R>) {
        let mut items = std::mem::take(&mut self.items);

        match change {
            Change::Created(entity) => items.push(entity),
            Change::Updated(entity) => {
                let position = items.iter().position(|item| R::id(item) == R::id(&entity));

                match position.and_then(|index| items.get_mut(index)) {
                    Some(item) => *item = entity,
                    None => items.push(entity),
                }
            }
            Change::Deleted(id) => items.retain(|item| *R::id(item) != id),
        }

        self.replace_items(items);
    }

    fn replace_items(&mut self, items: Vec<R::Entity>) {
        self.items = items;
        self.published.send_replace(self.items.clone());
    }

    fn remote_failure(&mut self, operation: Operation, source: RemoteError) -> CrudError {
        self.fail(CrudError::Remote {
            operation,
            resource: R::SINGULAR,
            source,
        })
    }

    fn fail(&mut self, error: CrudError) -> CrudError {
        warn!(resource = R::PATH, "{error}");

        self.error.set(error.to_string());

        error
    }
}

impl<R: Resource> std::fmt::Debug for CrudController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudController")
            .field("resource", &R::PATH)
            .field("items", &self.items)
            .field("draft", &self.draft)
            .field("edit_target", &self.edit_target)
            .field("error", &self.error)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use stockroom::{
        price::Price,
        products::{Product, ProductDraft, ProductId, ProductPayload},
        users::{User, UserId},
    };

    use crate::{
        remote::MockRemoteCollection,
        test::fixtures::{listing, product, user},
    };

    use super::*;

    fn not_found() -> RemoteError {
        RemoteError::Server {
            status: StatusCode::NOT_FOUND,
            message: "Product not found".to_string(),
        }
    }

    fn lamp_draft() -> ProductDraft {
        ProductDraft {
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: "12.5".to_string(),
            quantity: "4".to_string(),
        }
    }

    #[tokio::test]
    async fn refresh_replaces_cache() -> TestResult {
        let items = vec![product(1, "Lamp", 4), product(2, "Desk", 0)];
        let remote = listing::<Products>(vec![items.clone()]);

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;

        assert_eq!(controller.items(), items.as_slice());
        assert_eq!(controller.phase(), Phase::Idle);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_failure_sets_error_and_keeps_cache() -> TestResult {
        let mut remote = MockRemoteCollection::<Users>::new();
        let mut seq = mockall::Sequence::new();

        remote
            .expect_list()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![user(1, "alice")]));

        remote
            .expect_list()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| {
                Err(RemoteError::RouteNotFound {
                    message: "Cannot GET /api/users".to_string(),
                })
            });

        let mut controller = UsersController::new(Arc::new(remote));

        controller.refresh().await?;

        let result = controller.refresh().await;

        assert!(result.is_err(), "second listing should fail");
        assert_eq!(
            controller.error(),
            Some("Failed to fetch users: API route not found: Cannot GET /api/users")
        );
        assert_eq!(controller.items(), &[user(1, "alice")]);

        Ok(())
    }

    #[tokio::test]
    async fn create_then_list_matches_draft() -> TestResult {
        let created = Product {
            id: ProductId::from(9),
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: Price::Text("12.5".to_string()),
            quantity: 4,
        };

        let mut remote = listing::<Products>(vec![vec![], vec![created.clone()]]);

        remote.expect_update().never();
        remote
            .expect_create()
            .once()
            .withf(|payload: &ProductPayload| {
                payload.name == "Lamp" && payload.quantity == 4 && payload.price.display() == "12.50"
            })
            .return_once(move |_| Ok(created));

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;

        *controller.draft_mut() = lamp_draft();

        controller.submit().await?;

        let listed = controller.items().first().ok_or("created product missing")?;

        assert_eq!(listed.name, "Lamp");
        assert_eq!(listed.description, "Desk lamp");
        assert_eq!(listed.price.display(), "12.50");
        assert_eq!(listed.quantity, 4);
        assert_eq!(controller.draft(), &ProductDraft::default());
        assert_eq!(controller.edit_target(), None);
        assert_eq!(controller.error(), None);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_draft_makes_no_request() -> TestResult {
        let mut remote = listing::<Products>(vec![]);

        remote.expect_create().never();
        remote.expect_update().never();

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.draft_mut().name = "Lamp".to_string();

        let result = controller.submit().await;

        assert!(
            matches!(result, Err(CrudError::Validation { .. })),
            "expected a validation error, got {result:?}"
        );
        assert_eq!(controller.draft().name, "Lamp");
        assert!(controller.error().is_some(), "error slot should be set");

        Ok(())
    }

    #[tokio::test]
    async fn delete_of_missing_entity_keeps_cache() -> TestResult {
        let items = vec![product(1, "Lamp", 4)];
        let mut remote = listing::<Products>(vec![items.clone()]);

        remote
            .expect_delete()
            .once()
            .withf(|id| *id == ProductId::from(2))
            .return_once(|_| Err(not_found()));

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;

        let result = controller.delete(&ProductId::from(2)).await;

        let status = result
            .as_ref()
            .err()
            .and_then(CrudError::remote)
            .and_then(RemoteError::status);

        assert_eq!(status, Some(StatusCode::NOT_FOUND));
        assert_eq!(controller.items(), items.as_slice());
        assert_eq!(
            controller.error(),
            Some("Failed to delete product: server responded 404 Not Found: Product not found")
        );

        Ok(())
    }

    #[tokio::test]
    async fn edit_then_start_new_creates() -> TestResult {
        let lamp = product(1, "Lamp", 4);
        let created = product(2, "Desk", 1);
        let refreshed = vec![lamp.clone(), created.clone()];

        let mut remote = listing::<Products>(vec![vec![lamp], refreshed]);

        remote.expect_update().never();
        remote
            .expect_create()
            .once()
            .return_once(move |_| Ok(created));

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;
        controller.edit(&ProductId::from(1))?;

        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.draft().name, "Lamp");

        controller.start_new();

        assert_eq!(controller.edit_target(), None);
        assert_eq!(controller.draft(), &ProductDraft::default());

        *controller.draft_mut() = lamp_draft();

        controller.submit().await?;

        assert_eq!(controller.items().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn failed_update_keeps_draft_and_target() -> TestResult {
        let mut remote = listing::<Products>(vec![vec![product(1, "Lamp", 4)]]);

        remote.expect_create().never();
        remote
            .expect_update()
            .once()
            .withf(|id, payload| *id == ProductId::from(1) && payload.name == "Floor lamp")
            .return_once(|_, _| Err(not_found()));

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;
        controller.edit(&ProductId::from(1))?;
        controller.draft_mut().name = "Floor lamp".to_string();

        let result = controller.submit().await;

        assert!(result.is_err(), "update should fail");
        assert_eq!(controller.draft().name, "Floor lamp");
        assert_eq!(controller.edit_target(), Some(&ProductId::from(1)));
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(
            controller.error(),
            Some("Failed to update product: server responded 404 Not Found: Product not found")
        );

        Ok(())
    }

    #[tokio::test]
    async fn edit_of_unknown_entity_is_rejected() -> TestResult {
        let remote = listing::<Products>(vec![vec![product(1, "Lamp", 4)]]);

        let mut controller = ProductsController::new(Arc::new(remote));

        controller.refresh().await?;

        let result = controller.edit(&ProductId::from(7));

        assert!(
            matches!(
                result,
                Err(CrudError::Domain(DomainError::NotLoaded { .. }))
            ),
            "expected NotLoaded, got {result:?}"
        );
        assert_eq!(controller.edit_target(), None);

        Ok(())
    }

    #[tokio::test]
    async fn users_are_patched_in_place() -> TestResult {
        let mut remote = listing::<Users>(vec![vec![user(1, "alice"), user(2, "bob")]]);

        remote
            .expect_create()
            .once()
            .withf(|credentials| credentials.username == "carol" && credentials.password == "pw")
            .return_once(|_| Ok(user(3, "carol")));

        remote
            .expect_update()
            .once()
            .withf(|id, credentials| *id == UserId::from(1) && credentials.username == "alicia")
            .return_once(|_, _| Ok(user(1, "alicia")));

        remote
            .expect_delete()
            .once()
            .withf(|id| *id == UserId::from(2))
            .return_once(|_| Ok(()));

        let mut controller = UsersController::new(Arc::new(remote));

        controller.refresh().await?;

        controller.draft_mut().username = "carol".to_string();
        controller.draft_mut().password = "pw".to_string();
        controller.submit().await?;

        controller.edit(&UserId::from(1))?;

        assert_eq!(controller.draft().password, "");

        controller.draft_mut().username = "alicia".to_string();
        controller.draft_mut().password = "secret".to_string();
        controller.submit().await?;

        controller.delete(&UserId::from(2)).await?;

        let names: Vec<&str> = controller
            .items()
            .iter()
            .map(|user: &User| user.username.as_str())
            .collect();

        assert_eq!(names, ["alicia", "carol"]);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_edit_target_abandons_edit() -> TestResult {
        let mut remote = listing::<Users>(vec![vec![user(1, "alice")]]);

        remote.expect_delete().once().return_once(|_| Ok(()));

        let mut controller = UsersController::new(Arc::new(remote));

        controller.refresh().await?;
        controller.edit(&UserId::from(1))?;
        controller.delete(&UserId::from(1)).await?;

        assert_eq!(controller.edit_target(), None);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.items().is_empty(), "user should be removed");

        Ok(())
    }

    #[tokio::test]
    async fn subscribers_see_every_resync() -> TestResult {
        let mut remote = listing::<Products>(vec![vec![product(1, "Lamp", 4)], vec![], vec![]]);

        remote.expect_delete().once().return_once(|_| Ok(()));

        let mut controller = ProductsController::new(Arc::new(remote));
        let mut viewer = controller.subscribe();

        controller.refresh().await?;

        assert!(viewer.has_changed()?, "refresh should publish");
        assert_eq!(viewer.borrow_and_update().len(), 1);

        controller.delete(&ProductId::from(1)).await?;

        assert!(viewer.has_changed()?, "delete should publish");
        assert!(viewer.borrow_and_update().is_empty(), "list should be empty");

        drop(viewer);

        controller.refresh().await?;

        Ok(())
    }
}
