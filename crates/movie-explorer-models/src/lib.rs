pub mod movie;
pub mod credits;
pub mod video;
pub mod collection;
pub mod discover;
pub mod history;
pub mod theme;
pub mod user;
pub mod format;

pub use movie::{CollectionRef, Genre, GenreList, Movie, MovieDetails, MoviesPage, ProductionCompany};
pub use credits::{CastMember, Credits, CrewMember};
pub use video::{pick_trailer, Video, VideoList};
pub use collection::CollectionDetails;
pub use discover::{DiscoverOptions, MovieCategory, SortBy, TimeWindow};
pub use history::SearchHistoryItem;
pub use theme::ThemeMode;
pub use user::User;
