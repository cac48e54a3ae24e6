mod config;
mod repository;
mod result;
mod velocity;

pub use config::Config;
pub use repository::Repository;
pub use result::{Result, VelocityError};
pub use velocity::{merge_all, Point, SortedVelocity, State, VelocityEntry, VelocityMap};
