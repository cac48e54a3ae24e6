use crate::model::{Point, Repository, Result, State, VelocityEntry, VelocityError, VelocityMap};
use crate::tracker::{IssueTracker, Milestone, MilestoneState};
use tracing::debug;

pub type FetchProgress<'a> = Box<dyn FnMut(&str) + 'a>;

/// Which milestones a velocity run covers.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum MilestoneFilter {
    #[default]
    AllOpen,
    Title(String),
}

pub trait VelocityCollector {
    async fn collect_velocity<'a, T: IssueTracker>(
        &self,
        tracker: &T,
        filter: &MilestoneFilter,
        cb: FetchProgress<'a>,
    ) -> Result<VelocityMap>;
}

impl VelocityCollector for Repository {
    async fn collect_velocity<'a, T: IssueTracker>(
        &self,
        tracker: &T,
        filter: &MilestoneFilter,
        mut cb: FetchProgress<'a>,
    ) -> Result<VelocityMap> {
        cb("Fetch milestones ...");
        let milestones = select_milestones(tracker, self, filter).await?;
        for milestone in &milestones {
            debug!(
                repo = %self,
                title = %milestone.title,
                state = %milestone.state,
                due_on = ?milestone.due_on,
                "selected milestone"
            );
        }
        let mut velocity = milestones
            .into_iter()
            .map(|milestone| (milestone.title, VelocityEntry::default()))
            .collect::<VelocityMap>();

        for state in State::ALL {
            for point in Point::ALL {
                let name = point.label();
                cb(&format!("Fetch {state} `{name}` issues ..."));
                let label = tracker.label(self, &name).await?;
                let issues = tracker.issues(self, state, &label).await?;
                for issue in &issues {
                    let Some(milestone) = &issue.milestone else {
                        debug!(
                            repo = %self,
                            issue = issue.number,
                            title = %issue.title,
                            labels = issue.labels.len(),
                            "no milestone"
                        );
                        continue;
                    };
                    if let Some(entry) = velocity.get_mut(&milestone.title) {
                        entry.add(state, point.value());
                    }
                }
            }
        }
        Ok(velocity)
    }
}

async fn select_milestones<T: IssueTracker>(
    tracker: &T,
    repo: &Repository,
    filter: &MilestoneFilter,
) -> Result<Vec<Milestone>> {
    match filter {
        MilestoneFilter::AllOpen => tracker.milestones(repo, MilestoneState::Open).await,
        MilestoneFilter::Title(title) => {
            let number = milestone_number(tracker, repo, title).await?;
            Ok(vec![tracker.milestone(repo, number).await?])
        }
    }
}

async fn milestone_number<T: IssueTracker>(
    tracker: &T,
    repo: &Repository,
    title: &str,
) -> Result<u64> {
    tracker
        .milestones(repo, MilestoneState::All)
        .await?
        .into_iter()
        .find(|milestone| milestone.title == title)
        .map(|milestone| milestone.number)
        .ok_or_else(|| VelocityError::MilestoneNotFound {
            repo: repo.to_string(),
            title: title.to_string(),
        })
}
