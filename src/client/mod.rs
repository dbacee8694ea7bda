//! Frontend data layer: an HTTP client for the API plus the state holders the
//! search and favorites pages are built from.

pub mod api;
pub mod cache;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod search;
pub mod toggle;
pub mod view;

mod macros;

pub use api::{MovieApi, MovieBackend};
pub use cache::{QueryCache, QueryKey};
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use favorites::Favorites;
pub use search::MovieSearch;
pub use toggle::{ToggleFavorite, ToggleOutcome};
