//! App Store metadata collaborator: app profiles and similar-app lists.

pub mod client;
pub mod error;
pub mod similar;
pub mod types;

use async_trait::async_trait;

use asolens_core::{AppProfile, SimilarApp};

pub use client::ItunesCatalog;
pub use error::CatalogError;

/// Source of store metadata for the analysis pipeline.
#[async_trait]
pub trait StoreCatalog: Send + Sync {
    /// Fetches the profile for one app.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the store has no app with `id`,
    /// or another [`CatalogError`] variant on network or decoding failure.
    async fn fetch_app(&self, id: u64) -> Result<AppProfile, CatalogError>;

    /// Fetches the store's similar-apps list for `id`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network or decoding failure.
    async fn fetch_similar(&self, id: u64) -> Result<Vec<SimilarApp>, CatalogError>;
}
