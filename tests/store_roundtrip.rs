use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use rdcl_site::{
    core::{
        content::ContentService,
        data::{CachedStore, ContentStore, LocalStore, MemoryStore},
    },
    types::{
        AboutContent, CareerEntry, Insight, InsightKind, MissionContent, Partner, Pillar, Project,
        Service, Translations, WebsiteData,
    },
};

fn service(id: &str, title: &str) -> Service {
    Service {
        id: id.to_string(),
        icon: "engineering".to_string(),
        image_url: None,
        title: title.to_string(),
        main_title: format!("{} main", title),
        description: format!("What {} delivers", title),
        result_label: "Result".to_string(),
        result_value: "100% Focus".to_string(),
        scope_title: "Scope".to_string(),
        scope_items: vec!["Workshops".to_string(), "Roadmaps".to_string()],
        cta_text: "Talk to us".to_string(),
    }
}

fn project(id: &str, pdf_url: Option<&str>) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {}", id),
        category: "Strategic AI".to_string(),
        image: "https://example.com/project.jpg".to_string(),
        description: "Reporting automation".to_string(),
        pdf_url: pdf_url.map(str::to_string),
    }
}

fn bundle() -> Translations {
    let data = WebsiteData {
        logo_url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        ai_readiness_url: "https://example.com/check".to_string(),
        projects_heading: "Selected Projects".to_string(),
        projects_intro: "Evidence of transformation.".to_string(),
        insights_heading: Some("Insights".to_string()),
        insights_intro: None,
        mission: MissionContent {
            heading: "Human intuition, machine intelligence.".to_string(),
            subheading: "We architect the future of work.".to_string(),
            pillars: vec![
                Pillar {
                    title: "Empathy First".to_string(),
                    text: "People before process.".to_string(),
                },
                Pillar {
                    title: "Radical Clarity".to_string(),
                    text: "Explainable systems.".to_string(),
                },
                Pillar {
                    title: "Ethical Integration".to_string(),
                    text: "Technology with a conscience.".to_string(),
                },
            ],
        },
        services: vec![
            service("1", "The Centaur Model"),
            service("2", "Mindset Shift"),
            service("3", "Authentic Reach"),
        ],
        projects: vec![
            project("p1", None),
            project("p2", Some("data:application/pdf;base64,JVBERi0=")),
        ],
        insights: vec![
            Insight {
                id: "i1".to_string(),
                title: "AI Readiness Checklist".to_string(),
                kind: InsightKind::Checklist,
                description: "A 20-point diagnostic.".to_string(),
                download_url: "#".to_string(),
            },
            Insight {
                id: "i2".to_string(),
                title: "State of Human-AI Interaction".to_string(),
                kind: InsightKind::Report,
                description: "Annual research.".to_string(),
                download_url: "https://example.com/report.pdf".to_string(),
            },
        ],
        about: AboutContent {
            ceo_name: "Dr. Elena Vance".to_string(),
            ceo_title: "Founder".to_string(),
            bio: "Two decades at the intersection of AI and people.".to_string(),
            beliefs: vec!["AI should amplify people.".to_string()],
            cv_items: vec![CareerEntry {
                year: "2020 - Present".to_string(),
                role: "Founder".to_string(),
                company: "RDCL".to_string(),
                logo_url: None,
            }],
            education_items: Vec::new(),
            lecturing_items: Vec::new(),
            image_url: "https://example.com/ceo.jpg".to_string(),
        },
        partners: vec![Partner {
            name: "OPENAI".to_string(),
            url: Some("https://openai.com".to_string()),
        }],
    };
    let mut translations = Translations::new();
    translations.insert("en".to_string(), data);
    translations
}

async fn assert_roundtrip(store: &dyn ContentStore) {
    let translations = bundle();
    store.save(&translations).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(translations));
}

#[actix_web::test]
async fn test_memory_store_roundtrip() {
    assert_roundtrip(&MemoryStore::new()).await;
}

#[actix_web::test]
async fn test_local_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    assert_roundtrip(&LocalStore::new(dir.path(), "rdcl")).await;
}

#[actix_web::test]
async fn test_published_content_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let timeout = Duration::from_secs(15);

    let first = ContentService::new(Arc::new(LocalStore::new(dir.path(), "rdcl")), timeout);
    first.publish(bundle()).await.unwrap();
    first.add_subscriber("ada@example.com").await.unwrap();

    let second = ContentService::new(Arc::new(LocalStore::new(dir.path(), "rdcl")), timeout);
    second.load().await;
    assert_eq!(second.translations(), bundle());
    assert_eq!(second.subscribers().await[0].email, "ada@example.com");
}

#[actix_web::test]
async fn test_cached_store_serves_last_seen_content() {
    let dir = tempfile::tempdir().unwrap();
    let primary = Arc::new(MemoryStore::new());
    let store = CachedStore::new(primary.clone(), Arc::new(LocalStore::new(dir.path(), "cache")));

    store.save(&bundle()).await.unwrap();
    primary.set_fail_reads(true);
    assert_eq!(store.load().await.unwrap(), Some(bundle()));
}
