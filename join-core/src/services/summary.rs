//! Dashboard figures for the summary page

use chrono::NaiveDate;

use crate::domain::{Priority, Status, Task};

/// Counts shown on the summary page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub todo: usize,
    pub in_progress: usize,
    pub await_feedback: usize,
    pub done: usize,
    pub urgent: usize,
    /// Earliest due date among urgent tasks that are not done
    pub upcoming_deadline: Option<NaiveDate>,
}

impl Summary {
    pub fn compute(tasks: &[Task]) -> Self {
        let mut summary = Summary::default();
        for task in tasks {
            match task.status {
                Status::Todo => summary.todo += 1,
                Status::InProgress => summary.in_progress += 1,
                Status::AwaitFeedback => summary.await_feedback += 1,
                Status::Done => summary.done += 1,
            }
            if task.priority == Priority::Urgent {
                summary.urgent += 1;
                if task.status != Status::Done {
                    summary.upcoming_deadline = Some(match summary.upcoming_deadline {
                        Some(current) => current.min(task.date),
                        None => task.date,
                    });
                }
            }
        }
        summary
    }

    pub fn on_board(&self) -> usize {
        self.todo + self.in_progress + self.await_feedback + self.done
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::AwaitFeedback => self.await_feedback,
            Status::Done => self.done,
        }
    }
}

/// Greeting for the local hour of day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}
