pub mod error;
pub mod loading;
pub mod star_rating;

pub use star_rating::StarRating;
