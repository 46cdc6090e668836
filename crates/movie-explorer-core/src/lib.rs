pub mod auth;
pub mod catalog;
pub mod category;
pub mod collections;
pub mod details;
pub mod discover;
pub mod history;
pub mod paging;
pub mod query;
pub mod scope;
pub mod search;
pub mod storage;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthError, Authenticator, MockAuthenticator, ProfileUpdate};
pub use catalog::{CatalogFetcher, CatalogSnapshot};
pub use category::CategoryLister;
pub use collections::{CollectionKind, CollectionsStore};
pub use details::{DetailsError, MovieDetailsLoader, MovieView};
pub use discover::{DiscoverOrchestrator, DiscoverState};
pub use history::SearchHistoryStore;
pub use paging::{FetchOutcome, PageCursor};
pub use query::{parse_advanced, ParsedQuery, SearchRequest};
pub use scope::{ScopedView, ViewScope};
pub use search::{SearchOrchestrator, SearchState};
pub use storage::{LocalStorage, StorageError};
pub use theme::ThemeStore;
