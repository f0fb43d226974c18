pub mod card;
pub mod details;
pub mod filter;
pub mod item;
pub mod list;
