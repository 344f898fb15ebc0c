use chrono::NaiveDate;

use super::task::{Assignee, Priority, Status, Task, TaskId};

/// People the create-task sheet can assign to, with their seed ids.
pub const TEAM: [(u64, &str); 4] = [
    (1, "John Doe"),
    (2, "Jane Smith"),
    (3, "Mike Johnson"),
    (4, "Sarah Wilson"),
];

fn member(id: u64) -> Assignee {
    let name = TEAM
        .iter()
        .find(|(member_id, _)| *member_id == id)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown");
    Assignee::new(id, name)
}

fn task(
    id: u64,
    title: &str,
    description: &str,
    priority: Priority,
    status: Status,
    due_day: u32,
    assignees: &[u64],
) -> Option<Task> {
    Some(Task {
        id: TaskId(id),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status,
        due_date: NaiveDate::from_ymd_opt(2025, 7, due_day)?,
        assignees: assignees.iter().copied().map(member).collect(),
    })
}

/// Demo board: three to do, four in progress, none under review, two done.
pub fn tasks() -> Vec<Task> {
    use Priority::*;
    use Status::*;

    [
        task(1, "Prepare a detailed feedback for a user survey",
            "Create a 5-question survey to gather insights from beta users.",
            Low, Todo, 12, &[1, 2]),
        task(2, "Design a settings page",
            "Create the layout and UI components for the new settings screen.",
            Medium, Todo, 9, &[3]),
        task(3, "Plan and schedule next month's social media calendar",
            "Draft next month's posts and assign content to the team.",
            Low, Todo, 12, &[1, 2]),
        task(4, "Improve search functionality",
            "Enhance relevance of results and add filters for better UX.",
            High, InProgress, 8, &[4]),
        task(5, "Optimize the page speed for the website",
            "Minimize JS bundles and compress images across the site.",
            Low, InProgress, 9, &[2, 3]),
        task(6, "Build pricing page",
            "Design and develop the new pricing page with updated tiers.",
            Medium, InProgress, 7, &[1, 4]),
        task(7, "Test onboarding emails",
            "QA the full welcome email series in staging environment.",
            Low, InProgress, 8, &[4]),
        task(8, "Fix 404 redirects",
            "All broken links now redirect to a custom error page.",
            Low, Completed, 5, &[3]),
        task(9, "Finalize the animation illustrations",
            "Deliver the animation assets in .gif and .json formats.",
            High, Completed, 6, &[2]),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_nine_tasks_with_unique_ids() {
        let tasks = tasks();
        assert_eq!(tasks.len(), 9);
        let mut ids: Vec<u64> = tasks.iter().map(|t| t.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 9);
        assert_eq!(tasks[0].assignees[1].initials, "JS");
    }
}
