//! Keyword generation over interchangeable generative-AI backends.
//!
//! [`KeywordProvider`] is the uniform contract; [`GeminiProvider`] and
//! [`ClaudeProvider`] adapt it to each backend's tool-calling API. The
//! [`ProviderSelector`] decides which backend to use and with what settings,
//! and [`KeywordGenerator`] ties the two together for the analysis pipeline.

pub mod claude;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod images;
pub mod media;
pub mod prompt;
pub mod provider;
pub mod selector;

pub use claude::ClaudeProvider;
pub use config::ProviderConfig;
pub use error::{GenerationError, ImageFetchError, ProviderError};
pub use gemini::GeminiProvider;
pub use generator::{GenerateKeywords, GenerationRequest, KeywordGenerator};
pub use images::{EncodedImage, FetchedImage, HttpImageFetcher, ImageFetcher};
pub use media::{classify_media_type, MediaType};
pub use provider::KeywordProvider;
pub use selector::{ProviderOverrides, ProviderSelector, ProviderSettings, ProviderStatus};
