use crate::core::error::ProjchatError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display language of the chat session. Only the welcome and generic error
/// strings depend on it; replies follow the language of the query itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    En,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ar" | "arabic" => Some(Language::Ar),
            "en" | "english" => Some(Language::En),
            _ => None,
        }
    }

    pub fn welcome_message(&self) -> &'static str {
        match self {
            Language::Ar => {
                "مرحباً! أنا مساعدك الذكي لإدارة المشاريع. اسألني عن مشاريعك أو أنشطتك أو فريقك."
            }
            Language::En => {
                "Hello! I'm your project assistant. Ask me anything about your projects, activities or team."
            }
        }
    }

    pub fn generic_error(&self) -> &'static str {
        match self {
            Language::Ar => "عذراً، حدث خطأ أثناء معالجة طلبك. يرجى المحاولة مرة أخرى.",
            Language::En => "Sorry, something went wrong while processing your request. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub customer: String,
    /// Not part of the prompt projection.
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub payment_amount: Option<f64>,
    /// Not part of the prompt projection.
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Not part of the prompt projection.
    #[serde(default)]
    pub email: Option<String>,
}

/// Generic id/name record, used for teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub id: String,
    pub name: String,
}

/// Read-only view over caller-owned entity collections, passed to the
/// gateway on every request. The gateway never mutates or persists it and
/// does not validate cross-references; a dangling project/team id degrades
/// the model answer rather than raising an error.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub projects: &'a [Project],
    pub activities: &'a [Activity],
    pub users: &'a [User],
    pub teams: &'a [Lookup],
}

/// Owned entity collections, as loaded from a workspace JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub teams: Vec<Lookup>,
}

impl Workspace {
    pub fn load(path: &Path) -> Result<Self, ProjchatError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ProjchatError::Input(format!(
                "Failed to read workspace file {}: {}",
                path.display(),
                e
            ))
        })?;
        let workspace = serde_json::from_str(&contents)?;
        Ok(workspace)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            projects: &self.projects,
            activities: &self.activities,
            users: &self.users,
            teams: &self.teams,
        }
    }

    pub fn project_name(&self, id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    pub fn activity_title(&self, id: &str) -> Option<&str> {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_lookup_is_case_insensitive() {
        assert_eq!(Language::from_str("AR"), Some(Language::Ar));
        assert_eq!(Language::from_str("english"), Some(Language::En));
        assert_eq!(Language::from_str("fr"), None);
    }

    #[test]
    fn welcome_and_error_strings_differ_per_language() {
        assert_ne!(
            Language::Ar.welcome_message(),
            Language::En.welcome_message()
        );
        assert_ne!(Language::Ar.generic_error(), Language::En.generic_error());
    }

    #[test]
    fn workspace_parses_partial_documents() {
        let workspace: Workspace = serde_json::from_str(
            r#"{"projects":[{"id":"p1","name":"Bridge","projectCode":"BR-01"}]}"#,
        )
        .unwrap();
        assert_eq!(workspace.projects.len(), 1);
        assert!(workspace.activities.is_empty());
        assert_eq!(workspace.project_name("p1"), Some("Bridge"));
        assert_eq!(workspace.project_name("p2"), None);
    }
}
