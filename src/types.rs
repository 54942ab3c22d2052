use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language code -> content bundle, as persisted under the `translations` document.
pub type Translations = BTreeMap<String, WebsiteData>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteData {
    pub logo_url: String,
    pub ai_readiness_url: String,
    pub projects_heading: String,
    pub projects_intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights_intro: Option<String>,
    pub mission: MissionContent,
    pub services: Vec<Service>,
    pub projects: Vec<Project>,
    pub insights: Vec<Insight>,
    pub about: AboutContent,
    #[serde(default)]
    pub partners: Vec<Partner>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MissionContent {
    pub heading: String,
    pub subheading: String,
    pub pillars: Vec<Pillar>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Pillar {
    pub title: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub title: String,
    pub main_title: String,
    pub description: String,
    pub result_label: String,
    pub result_value: String,
    pub scope_title: String,
    pub scope_items: Vec<String>,
    pub cta_text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightKind {
    Checklist,
    Report,
    Whitepaper,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub description: String,
    /// URL or inline `data:` URI.
    pub download_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub ceo_name: String,
    pub ceo_title: String,
    pub bio: String,
    pub beliefs: Vec<String>,
    pub cv_items: Vec<CareerEntry>,
    #[serde(default)]
    pub education_items: Vec<EducationEntry>,
    #[serde(default)]
    pub lecturing_items: Vec<LecturingEntry>,
    pub image_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub year: String,
    pub role: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub year: String,
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LecturingEntry {
    pub year: String,
    pub role: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Partner {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Subscriber {
    pub email: String,
    /// ISO-8601 UTC timestamp of the signup.
    pub date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SubscriberList {
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insight_kind_serializes_as_type() {
        let insight = Insight {
            id: "i1".into(),
            title: "AI Readiness Checklist".into(),
            kind: InsightKind::Checklist,
            description: "20 points".into(),
            download_url: "#".into(),
        };
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["type"], "Checklist");
        assert_eq!(value["downloadUrl"], "#");
    }

    #[test]
    fn test_about_without_optional_timelines() {
        let about: AboutContent = serde_json::from_value(json!({
            "ceoName": "A",
            "ceoTitle": "Founder",
            "bio": "",
            "beliefs": [],
            "cvItems": [{ "year": "2020", "role": "Partner", "company": "RDCL" }],
            "imageUrl": ""
        }))
        .unwrap();
        assert!(about.education_items.is_empty());
        assert!(about.lecturing_items.is_empty());
        assert_eq!(about.cv_items[0].logo_url, None);
    }

    #[test]
    fn test_unknown_insight_kind_rejected() {
        let result = serde_json::from_value::<InsightKind>(json!("Podcast"));
        assert!(result.is_err());
    }
}
