use chrono::{DateTime, Utc};
use serde::Deserialize;

/// State filter accepted when listing milestones.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MilestoneState {
    Open,
    All,
}

impl MilestoneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneState::Open => "open",
            MilestoneState::All => "all",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserializes_api_issue() {
        let json = r#"{
            "number": 7,
            "title": "Add login",
            "state": "closed",
            "milestone": {
                "number": 2,
                "title": "Sprint 2",
                "state": "open",
                "due_on": "2024-05-31T07:00:00Z"
            },
            "labels": [{"id": 1, "name": "Point-3", "color": "ededed"}]
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();

        let milestone = issue.milestone.unwrap();
        assert_eq!(milestone.title, "Sprint 2");
        assert_eq!(
            milestone.due_on,
            Some(Utc.with_ymd_and_hms(2024, 5, 31, 7, 0, 0).unwrap())
        );
        assert_eq!(issue.number, 7);
        assert_eq!(issue.labels, vec![Label { name: "Point-3".into() }]);
    }

    #[test]
    fn null_milestone_and_due_date() {
        let json = r#"{"number": 1, "title": "t", "milestone": null}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.milestone.is_none());
        assert!(issue.labels.is_empty());

        let json = r#"{"number": 3, "title": "Backlog", "state": "open", "due_on": null}"#;
        let milestone: Milestone = serde_json::from_str(json).unwrap();
        assert!(milestone.due_on.is_none());
    }
}
