pub mod map;
pub mod restaurant;
