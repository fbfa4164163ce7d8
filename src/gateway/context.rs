use crate::core::error::ProjchatError;
use crate::workspace::{Activity, Lookup, Project, Snapshot, User};
use chrono::NaiveDate;
use serde::Serialize;

// Prompt-side projections. Each struct lists exactly the fields the model
// may see; anything the caller attaches beyond these never reaches the
// prompt, which also keeps prompt size linear in entity count.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectContext<'a> {
    id: &'a str,
    name: &'a str,
    project_code: &'a str,
    status: &'a str,
    description: &'a str,
    progress: f64,
    manager: &'a str,
    customer: &'a str,
}

impl<'a> From<&'a Project> for ProjectContext<'a> {
    fn from(p: &'a Project) -> Self {
        Self {
            id: &p.id,
            name: &p.name,
            project_code: &p.project_code,
            status: &p.status,
            description: &p.description,
            progress: p.progress,
            manager: &p.manager,
            customer: &p.customer,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityContext<'a> {
    id: &'a str,
    title: &'a str,
    status: &'a str,
    project_id: &'a str,
    team_id: &'a str,
    due_date: Option<NaiveDate>,
    payment_status: &'a str,
    payment_amount: Option<f64>,
}

impl<'a> From<&'a Activity> for ActivityContext<'a> {
    fn from(a: &'a Activity) -> Self {
        Self {
            id: &a.id,
            title: &a.title,
            status: &a.status,
            project_id: &a.project_id,
            team_id: &a.team_id,
            due_date: a.due_date,
            payment_status: &a.payment_status,
            payment_amount: a.payment_amount,
        }
    }
}

#[derive(Serialize)]
struct NamedContext<'a> {
    id: &'a str,
    name: &'a str,
}

impl<'a> From<&'a User> for NamedContext<'a> {
    fn from(u: &'a User) -> Self {
        Self {
            id: &u.id,
            name: &u.name,
        }
    }
}

impl<'a> From<&'a Lookup> for NamedContext<'a> {
    fn from(l: &'a Lookup) -> Self {
        Self {
            id: &l.id,
            name: &l.name,
        }
    }
}

/// Render the snapshot as labeled JSON blocks for inclusion in a prompt.
pub fn format_context(snapshot: &Snapshot<'_>) -> Result<String, ProjchatError> {
    let projects: Vec<ProjectContext> = snapshot.projects.iter().map(Into::into).collect();
    let activities: Vec<ActivityContext> = snapshot.activities.iter().map(Into::into).collect();
    let users: Vec<NamedContext> = snapshot.users.iter().map(Into::into).collect();
    let teams: Vec<NamedContext> = snapshot.teams.iter().map(Into::into).collect();

    Ok(format!(
        "PROJECTS:\n{}\n\nACTIVITIES:\n{}\n\nUSERS:\n{}\n\nTEAMS:\n{}",
        serde_json::to_string(&projects)?,
        serde_json::to_string(&activities)?,
        serde_json::to_string(&users)?,
        serde_json::to_string(&teams)?,
    ))
}
