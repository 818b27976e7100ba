//! Request validation, classification, and dispatch.

mod error;
mod request;

pub use error::AnalysisError;
pub use request::{Analysis, AnalysisRequest, BoardSnapshot};

use tracing::info;

use crate::gemini::GeminiClient;
use crate::prompt;

/// Fixed reply for a distribute request whose member list is empty. This is a
/// deliberate success-shaped outcome, not an error: there is nothing to
/// analyze, and the model is never called.
pub const EMPTY_MEMBERS_NOTICE: &str =
    "Cannot give a recommendation: the project member list is empty.";

/// Handle one analysis request end to end: validate, build the prompt, invoke
/// the model once, and hand back its report. The only path that skips the
/// model is the empty-member-list notice.
pub async fn run_analysis(
    req: AnalysisRequest,
    client: &GeminiClient,
) -> Result<String, AnalysisError> {
    let analysis = Analysis::classify(req)?;

    if let Analysis::Distribute { members, .. } = &analysis
        && members.is_empty()
    {
        info!("distribute requested with no project members, skipping model call");
        return Ok(EMPTY_MEMBERS_NOTICE.to_string());
    }

    let prompt = prompt::build_prompt(&analysis);
    info!(
        kind = analysis.kind(),
        prompt_len = prompt.len(),
        "dispatching analysis to model"
    );
    client.generate(&prompt).await
}
