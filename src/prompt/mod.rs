//! Prompt construction for every analysis kind.
//!
//! Builders are plain functions from validated request data to the final
//! prompt string, so they can be unit-tested without the HTTP layer or the
//! model client. Every prompt is persona + instructions (+ data section for
//! the project-level kinds), concatenated in that order.

mod board;
mod task;

pub use board::format_board_data;

use crate::analysis::Analysis;

/// Persona header shared by every prompt sent to the model. Sets the tone and
/// the response format; the per-kind goal text follows it.
pub const BASE_PERSONA: &str = "You are 'Kanban-AI', a lead AI assistant for project \
management. Your job is to provide clear, structured, and actionable analytical \
reports and recommendations. Always respond in English in Markdown format, using \
headers, lists, and text emphasis for readability.";

/// Build the prompt for a validated analysis. Pure: identical input yields
/// byte-identical output.
pub fn build_prompt(analysis: &Analysis) -> String {
    match analysis {
        Analysis::Decompose { task } => task::decompose_prompt(task),
        Analysis::Distribute { task, members } => task::distribute_prompt(task, members),
        Analysis::Productivity(snapshot) => board::productivity_prompt(snapshot),
        Analysis::Risks(snapshot) => board::risks_prompt(snapshot),
        Analysis::Summary(snapshot) => board::summary_prompt(snapshot),
    }
}
