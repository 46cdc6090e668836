pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::ApiError;
pub use tmdb::TmdbClient;
pub use traits::MovieSource;
