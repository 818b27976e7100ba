use crate::analysis::BoardSnapshot;
use crate::kanban::{Project, Status, User};
use crate::prompt::BASE_PERSONA;

/// Build the productivity-report prompt.
pub fn productivity_prompt(snapshot: &BoardSnapshot) -> String {
    let goal = format!(
        r#"**Goal:** Prepare a productivity report for {scope}.
- Assess the pace of work (the ratio of "In progress" to "Done" tasks).
- Highlight the key completed tasks.
- Determine whether there are signs of slowdown or blockage in the team's work.
- Give recommendations for raising productivity."#,
        scope = scope_phrase(snapshot)
    );
    compose(&goal, snapshot)
}

/// Build the risk-analysis prompt.
pub fn risks_prompt(snapshot: &BoardSnapshot) -> String {
    let goal = format!(
        r#"**Goal:** Run a risk analysis for {scope}.
- Identify bottlenecks (statuses with an abnormally large number of tasks).
- Find the tasks that have stayed in progress the longest and may be at risk of slipping.
- Point out potential risks based on the distribution and priorities of tasks.
- Suggest concrete steps to minimize the risks."#,
        scope = scope_phrase(snapshot)
    );
    compose(&goal, snapshot)
}

/// Build the executive-summary prompt.
pub fn summary_prompt(snapshot: &BoardSnapshot) -> String {
    let goal = format!(
        r#"**Goal:** Prepare a brief executive summary of the state of {scope}.
- Give the exact number of tasks in each status.
- Calculate the percentage of completed tasks out of the total.
- Highlight 1-3 key tasks that need immediate attention.
- State an overall verdict on the current project status (for example, "on track", "needs attention", or "at risk")."#,
        scope = scope_phrase(snapshot)
    );
    compose(&goal, snapshot)
}

fn compose(goal: &str, snapshot: &BoardSnapshot) -> String {
    format!(
        "{BASE_PERSONA}\n\n{goal}\n\n{data}",
        data = format_board_data(&snapshot.users, &snapshot.projects)
    )
}

fn scope_phrase(snapshot: &BoardSnapshot) -> String {
    match (snapshot.single_project, snapshot.projects.first()) {
        (true, Some(project)) => format!("the \"{}\" project", project.title),
        _ => "all projects".to_string(),
    }
}

/// Render the data section shared by every project-level prompt: all users,
/// then every project with its tasks grouped under workflow statuses sorted
/// ascending by `order`. Pure function of its inputs; the analysis kind never
/// changes what this produces.
pub fn format_board_data(users: &[User], projects: &[Project]) -> String {
    let mut out = String::from("### Analytics data\n\n**Users:**\n");
    for user in users {
        out.push_str(&format!(
            "- {} (Role: {})\n",
            user.email,
            user.role.as_deref().unwrap_or("user")
        ));
    }

    out.push_str("\n**Projects and tasks:**\n");
    for project in projects {
        out.push_str(&format!("\n---\n**Project: \"{}\"**\n", project.title));

        let statuses = project.statuses();
        if statuses.is_empty() {
            out.push_str("- *No workflow statuses are configured for this project.*\n");
            continue;
        }
        if project.tasks.is_empty() {
            out.push_str("- *No tasks*\n");
            continue;
        }

        let mut ordered: Vec<&Status> = statuses.iter().collect();
        ordered.sort_by_key(|s| s.order);

        for status in ordered {
            out.push_str(&format!("\n*Status: {}*\n", status.name));
            let mut empty = true;
            // Tasks whose status id matches nothing are dropped here on purpose.
            for task in project.tasks.iter().filter(|t| t.status_id == Some(status.id)) {
                out.push_str(&format!(
                    "  - **Task:** {} (Priority: {}, ID: {})\n",
                    task.title, task.priority, task.id
                ));
                empty = false;
            }
            if empty {
                out.push_str("- *Empty*\n");
            }
        }
    }
    out
}
