use crate::model::{SortedVelocity, VelocityEntry, VelocityMap};
use itertools::Itertools;

pub const PROGRESS_WIDTH: usize = 20;
const FILLED: char = '#';
const EMPTY: char = '−';

/// Orders milestones by title.
pub fn sorted_velocity(velocity: VelocityMap) -> SortedVelocity {
    velocity
        .into_iter()
        .sorted_by(|(t1, _), (t2, _)| t1.cmp(t2))
        .collect()
}

pub trait SlackMessage {
    fn message(&self, team_id: &str) -> String;
}

impl SlackMessage for SortedVelocity {
    fn message(&self, team_id: &str) -> String {
        let mut message = format!("<!subteam^{team_id}> Here are the current story points!\n");
        for (title, entry) in self {
            message.push_str(&format!(
                "\n*{title}*\n{}% [{}] {}/{}\n",
                entry.percent(),
                entry.progress_bar(),
                entry.closed,
                entry.sum,
            ));
        }
        message
    }
}

pub trait Progress {
    /// Closed share of the total, 0 for an empty milestone.
    fn ratio(&self) -> f64;
    fn percent(&self) -> u64;
    fn progress_bar(&self) -> String;
}

// Rounding is half-to-even, so 12.5% shows as 12%.
impl Progress for VelocityEntry {
    fn ratio(&self) -> f64 {
        if self.sum == 0 {
            0.0
        } else {
            self.closed as f64 / self.sum as f64
        }
    }

    fn percent(&self) -> u64 {
        (self.ratio() * 100.0).round_ties_even() as u64
    }

    fn progress_bar(&self) -> String {
        let filled = ((self.ratio() * PROGRESS_WIDTH as f64).round_ties_even() as usize)
            .min(PROGRESS_WIDTH);
        let mut bar = String::with_capacity(PROGRESS_WIDTH * EMPTY.len_utf8());
        bar.extend(std::iter::repeat(FILLED).take(filled));
        bar.extend(std::iter::repeat(EMPTY).take(PROGRESS_WIDTH - filled));
        bar
    }
}
