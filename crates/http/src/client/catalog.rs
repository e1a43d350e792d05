//! Product and category API client methods

use reqwest::Method;

use super::VolantClient;
use super::error::ClientError;
use crate::types::{
    Category, NewCategory, NewProduct, Product, ProductFilter, ProductPage, ProductUpdate,
};

impl VolantClient {
    /// List products, filtered and paginated
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<ProductPage, ClientError> {
        let mut req = self.request(Method::GET, "/products");

        if let Some(category) = &filter.category {
            req = req.query("category", category);
        }
        if let Some(search) = &filter.search {
            req = req.query("search", search);
        }
        if let Some(page) = filter.page {
            req = req.query("page", page);
        }
        if let Some(per_page) = filter.per_page {
            req = req.query("perPage", per_page);
        }

        self.execute_data(req).await
    }

    /// Fetch a single product
    pub async fn get_product(&self, id: i64) -> Result<Product, ClientError> {
        let req = self.request(Method::GET, &format!("/products/{id}"));
        self.execute_data(req).await
    }

    /// Create a product
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let req = self.request(Method::POST, "/products").json(product)?;
        self.execute_data(req).await
    }

    /// Update a product; unset fields are left unchanged
    pub async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Product, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/products/{id}"))
            .json(update)?;
        self.execute_data(req).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/products/{id}"));
        self.execute_unit(req).await
    }

    /// List all categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let req = self.request(Method::GET, "/categories");
        self.execute_data(req).await
    }

    /// Create a category
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ClientError> {
        let req = self.request(Method::POST, "/categories").json(category)?;
        self.execute_data(req).await
    }

    /// Delete a category
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/categories/{id}"));
        self.execute_unit(req).await
    }
}
