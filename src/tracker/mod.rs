pub mod github;
mod model;

use crate::model::{Repository, Result, State};

pub use model::{Issue, Label, Milestone, MilestoneState};

/// Read-only queries the velocity computation needs from an issue tracker.
pub trait IssueTracker {
    async fn milestones(&self, repo: &Repository, state: MilestoneState) -> Result<Vec<Milestone>>;

    async fn milestone(&self, repo: &Repository, number: u64) -> Result<Milestone>;

    async fn issues(&self, repo: &Repository, state: State, label: &Label) -> Result<Vec<Issue>>;

    /// Fails with `LabelNotFound` when the repository has no such label.
    async fn label(&self, repo: &Repository, name: &str) -> Result<Label>;
}
