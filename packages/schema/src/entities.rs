//! Sub-entities owned by blocks.
//!
//! Entities with an `id` (articles, quick hits, prompts, safety updates,
//! institutional items) get fresh identifiers whenever their parent block is
//! duplicated. The rest are plain values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvidenceLevel {
    High,
    #[default]
    Moderate,
    Low,
    #[serde(rename = "Expert Opinion")]
    ExpertOpinion,
    #[serde(rename = "")]
    Unrated,
}

impl EvidenceLevel {
    /// Display label, `None` when unrated
    pub fn label(self) -> Option<&'static str> {
        match self {
            EvidenceLevel::High => Some("High"),
            EvidenceLevel::Moderate => Some("Moderate"),
            EvidenceLevel::Low => Some("Low"),
            EvidenceLevel::ExpertOpinion => Some("Expert Opinion"),
            EvidenceLevel::Unrated => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub image_url: String,
    pub pub_date: String,
    pub summary: String,
    pub clinical_context: String,
    pub my_take: String,
    pub evidence_level: EvidenceLevel,
    pub tags: Vec<String>,
}

impl Article {
    /// Placeholder article as seeded by block defaults
    pub fn placeholder(id: String, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            source: "Source / Journal".to_string(),
            url: String::new(),
            image_url: String::new(),
            pub_date: String::new(),
            summary: "Brief summary of the study.".to_string(),
            clinical_context: "Clinical context and implications for practice.".to_string(),
            my_take: "Your clinical voice here.".to_string(),
            evidence_level: EvidenceLevel::Moderate,
            tags: Vec::new(),
        }
    }

    /// Empty article appended by the editor
    pub fn blank(id: String) -> Self {
        Self {
            id,
            title: "New Article".to_string(),
            source: String::new(),
            url: String::new(),
            image_url: String::new(),
            pub_date: String::new(),
            summary: String::new(),
            clinical_context: String::new(),
            my_take: String::new(),
            evidence_level: EvidenceLevel::Unrated,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickHit {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
}

impl QuickHit {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            title: "New hit".to_string(),
            url: String::new(),
            source: String::new(),
            summary: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbarStep {
    pub letter: String,
    pub name: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalPrompt {
    pub id: String,
    pub category: String,
    pub title: String,
    pub prompt: String,
    pub use_case: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyCategory {
    #[serde(rename = "FDA")]
    Fda,
    Policy,
    Incident,
    Guideline,
    Alert,
    Research,
}

impl SafetyCategory {
    pub fn label(self) -> &'static str {
        match self {
            SafetyCategory::Fda => "FDA",
            SafetyCategory::Policy => "Policy",
            SafetyCategory::Incident => "Incident",
            SafetyCategory::Guideline => "Guideline",
            SafetyCategory::Alert => "Alert",
            SafetyCategory::Research => "Research",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Informational,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Informational => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyUpdate {
    pub id: String,
    pub date: String,
    pub category: SafetyCategory,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub pub_date: String,
    pub summary: String,
    pub image_url: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSocial {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

/// A feed item snapshot stored on an `rss-sidebar` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    pub title: String,
    pub url: String,
    pub source: String,
    pub pub_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&EvidenceLevel::ExpertOpinion).unwrap(),
            "\"Expert Opinion\""
        );
        let unrated: EvidenceLevel = serde_json::from_str("\"\"").unwrap();
        assert_eq!(unrated, EvidenceLevel::Unrated);
        assert_eq!(unrated.label(), None);
    }

    #[test]
    fn test_safety_category_wire_names() {
        assert_eq!(serde_json::to_string(&SafetyCategory::Fda).unwrap(), "\"FDA\"");
        let sev: Severity = serde_json::from_str("\"informational\"").unwrap();
        assert_eq!(sev, Severity::Informational);
    }

    #[test]
    fn test_article_camel_case() {
        let article = Article::placeholder("a-1".into(), "Title");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["clinicalContext"], "Clinical context and implications for practice.");
        assert_eq!(json["evidenceLevel"], "Moderate");
        assert!(json.get("imageUrl").is_some());
    }
}
