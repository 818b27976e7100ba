use crate::kanban::TaskDetails;
use crate::prompt::BASE_PERSONA;

/// Build the decomposition prompt for a single task.
pub fn decompose_prompt(task: &TaskDetails) -> String {
    format!(
        "{BASE_PERSONA}\n\n\
         **Task:** Break the following complex task down into smaller, concrete, \
         actionable subtasks. For each subtask, suggest a complexity estimate \
         (Low, Medium, High). Present the result as a bulleted list.\n\n\
         **Original task:** \"{title}\"\n\
         **Description:** \"{description}\".",
        title = task.title,
        description = task.description,
    )
}

/// Build the assignee-recommendation prompt. Callers must ensure `members` is
/// non-empty; the dispatcher answers the empty case without the model.
pub fn distribute_prompt(task: &TaskDetails, members: &[String]) -> String {
    format!(
        "{BASE_PERSONA}\n\n\
         **Task:** Analyze the task and the list of project members. Recommend \
         the most suitable assignee (or several) for this task. Justify your \
         choice based on the members' presumed strengths and the nature of the \
         task. State your confidence in the recommendation (as a percentage).\n\n\
         **Task:** \"{title}\"\n\
         **Description:** \"{description}\"\n\
         **Project members:** {members}.",
        title = task.title,
        description = task.description,
        members = members.join(", "),
    )
}
