pub mod binder;
pub mod cycle;
pub mod fetcher;
pub mod locator;
pub mod merger;
pub mod pipeline;

pub use crate::domain::model::{CachedFile, MergedOutput, PublicationCycle, ResolvedDocument, Route};
pub use crate::domain::ports::{ConfigProvider, DocumentCache, Pipeline};
pub use crate::utils::error::Result;
