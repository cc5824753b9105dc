//! App Context

use std::sync::Arc;

use reqwest::Client;

use stockroom::{products::Products, users::Users};

use crate::{
    controller::{ProductsController, UsersController},
    remote::{ApiBase, HttpCollection, RemoteCollection},
    session::{AuthApi, HttpAuthApi, SessionGate, SessionStore},
};

/// Remote services shared by every screen.
#[derive(Clone)]
pub struct AppContext {
    /// `/products` collection
    pub products: Arc<dyn RemoteCollection<Products>>,

    /// `/users` collection
    pub users: Arc<dyn RemoteCollection<Users>>,

    /// Login and signup endpoints
    pub auth: Arc<dyn AuthApi>,
}

impl AppContext {
    /// Build HTTP clients for every resource below `base`, sharing one
    /// connection pool.
    #[must_use]
    pub fn from_api_base(base: &ApiBase) -> Self {
        let http = Client::new();

        Self {
            products: Arc::new(HttpCollection::<Products>::new(http.clone(), base.clone())),
            users: Arc::new(HttpCollection::<Users>::new(http.clone(), base.clone())),
            auth: Arc::new(HttpAuthApi::new(http, base.clone())),
        }
    }

    /// Controller for the product screen.
    #[must_use]
    pub fn products_controller(&self) -> ProductsController {
        ProductsController::new(Arc::clone(&self.products))
    }

    /// Controller for the user screen.
    #[must_use]
    pub fn users_controller(&self) -> UsersController {
        UsersController::new(Arc::clone(&self.users))
    }

    /// Gate over the given session store.
    #[must_use]
    pub fn session_gate(&self, store: Box<dyn SessionStore>) -> SessionGate {
        SessionGate::new(Arc::clone(&self.auth), store)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
