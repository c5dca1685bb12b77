//! Command handlers: run a core operation, format it, render it.

use anyhow::{anyhow, Context, Result};
use log::debug;
use waypoint_core::{
    params::{Id, ListMilestones},
    CreateResult, DeleteResult, Milestones, Scheduler, Timelines, UpdateResult,
};

use crate::{
    args::{MilestoneCommands, ShowTimelineArgs, TimelineCommands},
    renderer::TerminalRenderer,
};

/// Ties a scheduler to a renderer for one CLI invocation.
pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer) -> Self {
        Self {
            scheduler,
            renderer,
        }
    }

    pub async fn handle_timeline_command(&self, command: TimelineCommands) -> Result<()> {
        match command {
            TimelineCommands::Create(args) => {
                let timeline = self
                    .scheduler
                    .create_timeline(&args.into())
                    .await
                    .context("Failed to create timeline")?;
                self.renderer
                    .render(&CreateResult::new(timeline).to_string())
            }
            TimelineCommands::Show(args) => self.show_timeline(args).await,
            TimelineCommands::List(args) => {
                let timelines = self
                    .scheduler
                    .list_timelines(&args.into())
                    .await
                    .context("Failed to list timelines")?;
                self.renderer.render(&Timelines(timelines).to_string())
            }
            TimelineCommands::Delete(args) => {
                let timeline = self
                    .scheduler
                    .delete_timeline(&args.into())
                    .await
                    .context("Failed to delete timeline")?;
                self.renderer
                    .render(&DeleteResult::new(timeline).to_string())
            }
            TimelineCommands::Progress(args) => {
                let progress = self
                    .scheduler
                    .timeline_progress(&args.into())
                    .await
                    .context("Failed to compute progress")?;
                self.renderer.render(&progress.to_string())
            }
        }
    }

    async fn show_timeline(&self, args: ShowTimelineArgs) -> Result<()> {
        let id = Id { id: args.id };
        let timeline = self
            .scheduler
            .get_timeline(&id)
            .await
            .context("Failed to load timeline")?
            .ok_or_else(|| anyhow!("Timeline with ID {} not found", args.id))?;
        let milestones = self
            .scheduler
            .list_milestones(&ListMilestones {
                timeline_id: timeline.id,
                include_hidden: args.all,
                include_deleted: false,
            })
            .await
            .context("Failed to list milestones")?;
        let progress = self
            .scheduler
            .timeline_progress(&id)
            .await
            .context("Failed to compute progress")?;

        debug!(
            "Showing timeline {} with {} milestone(s)",
            timeline.id,
            milestones.len()
        );
        let output = format!("{timeline}\n{progress}\n## Milestones\n\n{}", Milestones(milestones));
        self.renderer.render(&output)
    }

    pub async fn handle_milestone_command(&self, command: MilestoneCommands) -> Result<()> {
        match command {
            MilestoneCommands::Add(args) => {
                let milestone = self
                    .scheduler
                    .create_milestone(&args.into())
                    .await
                    .context("Failed to add milestone")?;
                self.renderer
                    .render(&CreateResult::new(milestone).to_string())
            }
            MilestoneCommands::Update(args) => {
                let change = self
                    .scheduler
                    .update_milestone(&args.into())
                    .await
                    .context("Failed to update milestone")?;
                self.renderer
                    .render(&UpdateResult::from(change).to_string())
            }
            MilestoneCommands::Show(args) => {
                let id = args.id;
                let milestone = self
                    .scheduler
                    .get_milestone(&args.into())
                    .await
                    .context("Failed to load milestone")?
                    .ok_or_else(|| anyhow!("Milestone with ID {id} not found"))?;
                self.renderer.render(&milestone.to_string())
            }
            MilestoneCommands::List(args) => {
                let milestones = self
                    .scheduler
                    .list_milestones(&args.into())
                    .await
                    .context("Failed to list milestones")?;
                self.renderer.render(&Milestones(milestones).to_string())
            }
            MilestoneCommands::Delete(args) => {
                let milestone = self
                    .scheduler
                    .delete_milestone(args.timeline_id, &Id { id: args.id })
                    .await
                    .context("Failed to delete milestone")?;
                self.renderer
                    .render(&DeleteResult::new(milestone).to_string())
            }
        }
    }
}
