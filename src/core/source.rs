use async_trait::async_trait;

use crate::{
    api::alpha_ess::{self, ApiError},
    core::{Category, Payload},
};

/// Where the schedulers get their data from.
#[async_trait]
pub trait Source: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Payload, ApiError>;
}

#[async_trait]
impl Source for alpha_ess::Api {
    async fn fetch(&self, category: Category) -> Result<Payload, ApiError> {
        self.get(category.endpoint(), &[]).await
    }
}
