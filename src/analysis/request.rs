use serde::Deserialize;

use crate::analysis::AnalysisError;
use crate::kanban::{Project, TaskDetails, User};

/// Raw JSON body of an analyze call. Every field except `analysisType` is
/// optional at this stage; which ones must actually be present depends on the
/// analysis kind and is checked by [`Analysis::classify`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub analysis_type: String,
    #[serde(default)]
    pub context: Option<RequestScope>,
    #[serde(default)]
    pub task: Option<TaskDetails>,
    #[serde(default)]
    pub project_members: Option<Vec<String>>,
    #[serde(default)]
    pub all_users: Option<Vec<User>>,
    #[serde(default)]
    pub all_projects: Option<Vec<Project>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestScope {
    #[serde(rename = "singleProject")]
    SingleProject,
    #[serde(rename = "allProjects")]
    AllProjects,
}

/// A validated analysis request. Each variant carries exactly the data its
/// kind needs, so the prompt builders never see half-populated payloads.
#[derive(Debug, Clone)]
pub enum Analysis {
    Decompose { task: TaskDetails },
    Distribute { task: TaskDetails, members: Vec<String> },
    Productivity(BoardSnapshot),
    Risks(BoardSnapshot),
    Summary(BoardSnapshot),
}

/// Users and projects for a project-level analysis, plus whether the request
/// targets exactly one project (affects goal phrasing only).
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub single_project: bool,
}

impl Analysis {
    /// Validate a raw request and classify it into one of the five kinds.
    pub fn classify(req: AnalysisRequest) -> Result<Self, AnalysisError> {
        let AnalysisRequest {
            analysis_type,
            context,
            task,
            project_members,
            all_users,
            all_projects,
        } = req;

        match analysis_type.as_str() {
            "decompose" => {
                let task = task.ok_or(AnalysisError::MissingTaskData)?;
                Ok(Analysis::Decompose { task })
            }
            "distribute" => {
                let task = task.ok_or(AnalysisError::MissingTaskData)?;
                // An absent member list is treated like an empty one; the
                // dispatcher turns both into the soft notice reply.
                let members = project_members.unwrap_or_default();
                Ok(Analysis::Distribute { task, members })
            }
            "productivity" | "risks" | "summary" => {
                let users = all_users
                    .filter(|u| !u.is_empty())
                    .ok_or(AnalysisError::MissingAggregateData)?;
                let projects = all_projects
                    .filter(|p| !p.is_empty())
                    .ok_or(AnalysisError::MissingAggregateData)?;
                let single_project =
                    context == Some(RequestScope::SingleProject) && projects.len() == 1;
                let snapshot = BoardSnapshot {
                    users,
                    projects,
                    single_project,
                };
                Ok(match analysis_type.as_str() {
                    "productivity" => Analysis::Productivity(snapshot),
                    "risks" => Analysis::Risks(snapshot),
                    _ => Analysis::Summary(snapshot),
                })
            }
            other => Err(AnalysisError::UnknownAnalysisKind(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Analysis::Decompose { .. } => "decompose",
            Analysis::Distribute { .. } => "distribute",
            Analysis::Productivity(_) => "productivity",
            Analysis::Risks(_) => "risks",
            Analysis::Summary(_) => "summary",
        }
    }
}
