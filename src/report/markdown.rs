use crate::model::{Result, SortedVelocity, VelocityEntry, VelocityError};
use crate::report::slack::Progress;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fs;
use std::path::Path;

pub trait MarkdownReport {
    fn report_render(&self, team_id: &str) -> Result<String>;

    fn report_create(&self, team_id: &str, path: &Path) -> Result<()> {
        fs::write(path, self.report_render(team_id)?)?;
        Ok(())
    }
}

impl MarkdownReport for SortedVelocity {
    fn report_render(&self, team_id: &str) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1("Velocity");
        doc.header2(format!("Team {team_id}"));
        if self.is_empty() {
            doc.paragraph("No milestones to report.".to_string());
        } else {
            doc.add_velocity(self)?;
        }
        Ok(doc.render())
    }
}

trait MarkdownExt {
    fn add_velocity(&mut self, velocity: &SortedVelocity) -> Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_velocity(&mut self, velocity: &SortedVelocity) -> Result<()> {
        let header = ["Milestone", "Open", "Closed", "Sum", "Progress"]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let alignment = if i == 0 { None } else { Some(HeadingAlignment::Center) };
                Heading::new(s.to_string(), alignment)
            })
            .collect::<Vec<_>>();

        let table = velocity
            .iter()
            .map(|(title, entry)| row(title, entry))
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(table);
        md_table.with_headings(header);

        let rendered = md_table
            .as_markdown()
            .map_err(|e| VelocityError::Report(format!("{e:?}")))?;
        self.paragraph(rendered);
        Ok(())
    }
}

fn row(title: &str, entry: &VelocityEntry) -> Vec<String> {
    vec![
        format!("**{title}**"),
        entry.open.to_string(),
        entry.closed.to_string(),
        entry.sum.to_string(),
        format!("{}% ({}/{})", entry.percent(), entry.closed, entry.sum),
    ]
}
