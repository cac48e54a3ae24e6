mod velocity;

pub use velocity::{MilestoneFilter, VelocityCollector};
