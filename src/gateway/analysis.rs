use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

/// Intent classes the model is asked to choose from. Wire names are the
/// SCREAMING_SNAKE_CASE strings in the response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Projects,
    Activities,
    Summary,
    Kpis,
    Error,
}

/// Reference to a workspace entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
}

/// Structured classification of a query. Exactly one payload per kind;
/// callers branch on the variant, there is no out-of-band failure path.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Projects(Vec<EntityRef>),
    Activities(Vec<EntityRef>),
    Summary(String),
    Kpis(Vec<Kpi>),
    Error(String),
}

/// Wire shape of the model's structured reply. The schema does not enforce
/// payload exclusivity, so every payload field is optional here and the
/// conversion below decides which one to trust.
#[derive(Debug, Deserialize)]
pub struct AnalysisPayload {
    #[serde(rename = "resultType")]
    result_type: ResultKind,
    #[serde(default, deserialize_with = "one_or_many")]
    projects: Option<Vec<EntityRef>>,
    #[serde(default, deserialize_with = "one_or_many")]
    activities: Option<Vec<EntityRef>>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    kpis: Option<Vec<Kpi>>,
    #[serde(default)]
    error: Option<String>,
}

impl AnalysisPayload {
    /// Only the field matching `resultType` is trusted; anything else the
    /// model populated alongside it is discarded. A missing matching field
    /// degrades to an empty payload instead of failing the decode.
    pub fn into_analysis(self) -> Analysis {
        match self.result_type {
            ResultKind::Projects => Analysis::Projects(self.projects.unwrap_or_default()),
            ResultKind::Activities => Analysis::Activities(self.activities.unwrap_or_default()),
            ResultKind::Summary => Analysis::Summary(self.summary.unwrap_or_default()),
            ResultKind::Kpis => Analysis::Kpis(self.kpis.unwrap_or_default()),
            ResultKind::Error => Analysis::Error(
                self.error
                    .unwrap_or_else(|| "The query could not be analyzed".to_string()),
            ),
        }
    }
}

/// The backend occasionally returns a bare object where the schema asked
/// for an array; wrap it into a one-element list instead of rejecting it.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<Repr<T>>::deserialize(deserializer)? {
        None => None,
        Some(Repr::Many(items)) => Some(items),
        Some(Repr::One(item)) => Some(vec![item]),
    })
}

/// Response schema sent with every structured-analysis request, in the
/// Gemini `responseSchema` dialect.
pub fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "resultType": {
                "type": "STRING",
                "enum": ["PROJECTS", "ACTIVITIES", "SUMMARY", "KPIS", "ERROR"]
            },
            "projects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": { "id": { "type": "STRING" } },
                    "required": ["id"]
                }
            },
            "activities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": { "id": { "type": "STRING" } },
                    "required": ["id"]
                }
            },
            "summary": { "type": "STRING" },
            "kpis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "value": { "type": "STRING" }
                    },
                    "required": ["title", "value"]
                }
            },
            "error": { "type": "STRING" }
        },
        "required": ["resultType"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> Analysis {
        serde_json::from_str::<AnalysisPayload>(raw)
            .unwrap()
            .into_analysis()
    }

    #[test]
    fn single_object_is_wrapped_into_a_list() {
        let analysis = decode(r#"{"resultType":"ACTIVITIES","activities":{"id":"a1"}}"#);
        assert_eq!(
            analysis,
            Analysis::Activities(vec![EntityRef { id: "a1".into() }])
        );
    }

    #[test]
    fn well_formed_list_passes_through_unchanged() {
        let analysis =
            decode(r#"{"resultType":"ACTIVITIES","activities":[{"id":"a1"},{"id":"a2"}]}"#);
        assert_eq!(
            analysis,
            Analysis::Activities(vec![
                EntityRef { id: "a1".into() },
                EntityRef { id: "a2".into() },
            ])
        );
    }

    #[test]
    fn projects_are_normalized_the_same_way() {
        let analysis = decode(r#"{"resultType":"PROJECTS","projects":{"id":"p9"}}"#);
        assert_eq!(
            analysis,
            Analysis::Projects(vec![EntityRef { id: "p9".into() }])
        );
    }

    #[test]
    fn only_the_field_matching_the_result_type_is_trusted() {
        let analysis = decode(
            r#"{"resultType":"SUMMARY","summary":"two projects on track","kpis":[{"title":"x","value":"1"}]}"#,
        );
        assert_eq!(analysis, Analysis::Summary("two projects on track".into()));
    }

    #[test]
    fn missing_matching_payload_degrades_to_empty() {
        assert_eq!(decode(r#"{"resultType":"PROJECTS"}"#), Analysis::Projects(vec![]));
        assert_eq!(decode(r#"{"resultType":"SUMMARY"}"#), Analysis::Summary(String::new()));
    }

    #[test]
    fn error_kind_without_message_gets_a_fallback() {
        match decode(r#"{"resultType":"ERROR"}"#) {
            Analysis::Error(message) => assert!(!message.is_empty()),
            other => panic!("expected error analysis, got {:?}", other),
        }
    }

    #[test]
    fn unknown_result_type_is_a_decode_error() {
        assert!(serde_json::from_str::<AnalysisPayload>(r#"{"resultType":"WEATHER"}"#).is_err());
    }

    #[test]
    fn kpis_decode_as_title_value_pairs() {
        let analysis = decode(
            r#"{"resultType":"KPIS","kpis":[{"title":"Open activities","value":"12"}]}"#,
        );
        assert_eq!(
            analysis,
            Analysis::Kpis(vec![Kpi {
                title: "Open activities".into(),
                value: "12".into()
            }])
        );
    }
}
