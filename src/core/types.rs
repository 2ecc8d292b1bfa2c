use serde::{Deserialize, Serialize};

/// Whether a navigation target lives on the analyzed site or elsewhere.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    #[default]
    Internal,
    ThirdParty,
}

impl LinkType {
    /// Returns a human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            LinkType::Internal => "internal",
            LinkType::ThirdParty => "third-party",
        }
    }
}

/// One navigation menu entry recovered from the model's reply.
///
/// All fields default so that sparse or partially malformed model output
/// still decodes. No further per-field validation happens downstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct NavigationLink {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: LinkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One web-search citation the model used to ground its answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// The sole output contract of the analyzer.
///
/// Containers are always present (possibly empty) and `summary` is always
/// non-empty, whatever the underlying service reply looked like.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub links: Vec<NavigationLink>,
    pub summary: String,
    pub grounding_sources: Vec<GroundingSource>,
    pub scripts_and_stylesheets: Vec<String>,
}

/// Lifecycle of one analysis request, owned by the caller.
/// The core only resolves or fails; the caller maps that onto these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Completed,
    Error,
}

impl AnalysisStatus {
    /// Returns a human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisStatus::Idle => "idle",
            AnalysisStatus::Analyzing => "analyzing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_serialization() {
        let internal = serde_json::to_string(&LinkType::Internal).unwrap();
        assert_eq!(internal, "\"internal\"");

        let third_party = serde_json::to_string(&LinkType::ThirdParty).unwrap();
        assert_eq!(third_party, "\"third-party\"");
    }

    #[test]
    fn test_navigation_link_decodes_model_shape() {
        let json = r#"{
            "name": "Docs",
            "url": "https://example.com/docs",
            "type": "third-party",
            "description": "Documentation portal"
        }"#;
        let link: NavigationLink = serde_json::from_str(json).unwrap();

        assert_eq!(link.name, "Docs");
        assert_eq!(link.kind, LinkType::ThirdParty);
        assert_eq!(link.description.as_deref(), Some("Documentation portal"));
    }

    #[test]
    fn test_navigation_link_defaults_missing_fields() {
        let link: NavigationLink = serde_json::from_str(r#"{"name": "Home"}"#).unwrap();

        assert_eq!(link.name, "Home");
        assert_eq!(link.url, "");
        assert_eq!(link.kind, LinkType::Internal);
        assert!(link.description.is_none());
    }

    #[test]
    fn test_analysis_result_uses_camel_case_keys() {
        let result = AnalysisResult {
            links: vec![],
            summary: "s".to_string(),
            grounding_sources: vec![],
            scripts_and_stylesheets: vec!["https://cdn.tailwindcss.com".to_string()],
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""groundingSources":[]"#));
        assert!(json.contains(r#""scriptsAndStylesheets":["https://cdn.tailwindcss.com"]"#));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AnalysisStatus::Idle.label(), "idle");
        assert_eq!(AnalysisStatus::Analyzing.label(), "analyzing");
        assert_eq!(AnalysisStatus::Completed.label(), "completed");
        assert_eq!(AnalysisStatus::Error.label(), "error");
    }

    #[test]
    fn test_status_defaults_to_idle() {
        assert_eq!(AnalysisStatus::default(), AnalysisStatus::Idle);
    }
}
