pub mod markdown;
pub mod slack;
