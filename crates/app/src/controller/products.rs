//! Product-only actions.

use stockroom::products::{Product, ProductId, Products};

use super::{Change, CrudController, CrudError, DomainError, Operation, Phase};

impl CrudController<Products> {
    /// Sell one unit of a cached product.
    ///
    /// Out-of-stock and unknown products are rejected without contacting the
    /// server. Otherwise the product is written back with its quantity
    /// reduced by one and the list is re-fetched.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfStock`] or a [`CrudError::Remote`].
    pub async fn sell(&mut self, id: &ProductId) -> Result<(), CrudError> {
        self.error.clear();

        let Some(payload) = self.find(id).and_then(Product::sell_one) else {
            return Err(self.fail(CrudError::from(DomainError::OutOfStock)));
        };

        self.phase = Phase::Submitting;

        let result = self.client.update(id.clone(), payload).await;

        self.phase = Phase::Idle;

        let sold = result.map_err(|source| self.remote_failure(Operation::Sell, source))?;

        self.resync(Change::Updated(sold)).await
    }
}
