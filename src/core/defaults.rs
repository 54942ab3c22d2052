//! Built-in content bundles served whenever the store has nothing for a language.

use crate::core::language::Language;
use crate::types::{
    AboutContent, CareerEntry, EducationEntry, Insight, InsightKind, LecturingEntry,
    MissionContent, Partner, Pillar, Project, Service, Translations, WebsiteData,
};

const LOGO_URL: &str = "/logo.png";
const AI_READINESS_URL: &str = "https://example.com/ai-check";
const CEO_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1560250097-0b93528c311a?auto=format&fit=crop&q=80&w=600";

const PROJECT_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1576086213369-97a306dca664?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1551288049-bbbda536639a?auto=format&fit=crop&q=80&w=800",
];

const INSIGHTS_HEADING: &str = "Frameworks & Praxiswissen";
const INSIGHTS_INTRO: &str = "Kuratierte Checklisten, relevante Reports und wegweisende Artikel zu globalen KI-Themen – ergänzt durch Ansichten führender KI-Vordenker. Alles mit Fokus auf Praxis, Klarheit und menschenzentrierte Umsetzung.";

/// The built-in bundle for `language`.
pub fn default_bundle(language: Language) -> WebsiteData {
    match language {
        Language::En => english(),
        Language::De => german(),
    }
}

/// What the site shows before anything was ever published.
pub fn default_translations() -> Translations {
    let mut translations = Translations::new();
    translations.insert(Language::En.code().to_string(), english());
    translations
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn pillar(title: &str, text: &str) -> Pillar {
    Pillar {
        title: title.to_string(),
        text: text.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    icon: &str,
    title: &str,
    main_title: &str,
    description: &str,
    result_value: &str,
    scope_title: &str,
    scope_items: &[&str],
    cta_text: &str,
) -> Service {
    Service {
        id: id.to_string(),
        icon: icon.to_string(),
        image_url: None,
        title: title.to_string(),
        main_title: main_title.to_string(),
        description: description.to_string(),
        result_label: "ZIEL".to_string(),
        result_value: result_value.to_string(),
        scope_title: scope_title.to_string(),
        scope_items: strings(scope_items),
        cta_text: cta_text.to_string(),
    }
}

fn project(id: &str, title: &str, category: &str, image: &str, description: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        image: image.to_string(),
        description: description.to_string(),
        pdf_url: None,
    }
}

fn insight(id: &str, title: &str, kind: InsightKind, description: &str) -> Insight {
    Insight {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        description: description.to_string(),
        download_url: "#".to_string(),
    }
}

fn career(year: &str, role: &str, company: &str) -> CareerEntry {
    CareerEntry {
        year: year.to_string(),
        role: role.to_string(),
        company: company.to_string(),
        logo_url: None,
    }
}

fn education(year: &str, degree: &str, institution: &str) -> EducationEntry {
    EducationEntry {
        year: year.to_string(),
        degree: degree.to_string(),
        institution: institution.to_string(),
        logo_url: None,
    }
}

fn lecturing(year: &str, role: &str, institution: &str) -> LecturingEntry {
    LecturingEntry {
        year: year.to_string(),
        role: role.to_string(),
        institution: institution.to_string(),
        logo_url: None,
    }
}

fn partners(first: (&str, &str)) -> Vec<Partner> {
    [
        first,
        ("SPOTIFY", "https://spotify.com"),
        ("NOTION", "https://notion.so"),
        ("SCALE", "https://scale.com"),
        ("JASPER", "https://jasper.ai"),
    ]
    .into_iter()
    .map(|(name, url)| Partner {
        name: name.to_string(),
        url: Some(url.to_string()),
    })
    .collect()
}

fn english() -> WebsiteData {
    WebsiteData {
        logo_url: LOGO_URL.to_string(),
        ai_readiness_url: AI_READINESS_URL.to_string(),
        projects_heading: "Selected Projects and Keynotes".to_string(),
        projects_intro: "Evidence of transformation in the age of intelligence. Our portfolio reflects our commitment to human-centric AI integration, demonstrating how technical precision meets visionary leadership to solve complex organizational challenges.".to_string(),
        insights_heading: Some(INSIGHTS_HEADING.to_string()),
        insights_intro: Some(INSIGHTS_INTRO.to_string()),
        mission: MissionContent {
            heading: "Bridging the gap between human intuition and machine intelligence.".to_string(),
            subheading: "At RDCL, we don't just implement technology; we architect the future of work. Our mission is to ensure that as AI scales, human value amplifies rather than diminishes.".to_string(),
            pillars: vec![
                pillar("Empathy First", "Every automated workflow must enhance the lives of those it serves. We measure success by the time we buy back for your people."),
                pillar("Radical Clarity", "We demystify the complex. Our frameworks turn AI anxiety into strategic advantage through transparent and explainable systems."),
                pillar("Ethical Integration", "Technology with a conscience. We ensure your AI adoption aligns with global standards and your specific corporate values."),
            ],
        },
        services: vec![
            service(
                "1",
                "engineering",
                "The Centaur Model",
                "Prozesse & Automatisierung",
                "We integrate AI deep into your core operational processes. We follow the \"Centaur\" approach: the human holds the reins and gives the strategic direction, while the AI takes over the burden of repetitive tasks. We build customized systems that do not replace, but strengthen.",
                "0% Admin. 100% Focus.",
                "Scope of Services",
                &[
                    "Analysis of existing workflows for automation potential",
                    "Integration into existing software (ERP, CRM, Slack)",
                    "Development of custom LLM wrappers for data privacy compliance",
                    "Intelligent document processing & data extraction",
                ],
                "Request More Details",
            ),
            service(
                "2",
                "lightbulb",
                "Mindset Shift",
                "Kultur & Kompetenz",
                "Technology is worthless without the people who operate it. Our workshops and keynotes are designed to reduce fears and awaken pragmatic curiosity. We transform your workforce's skepticism into productive drive and establish a culture of lifelong learning.",
                "A team that leverages AI.",
                "Scope of Services",
                &[
                    "Interactive workshops for Prompt Engineering",
                    "Identification of \"AI Champions\" within the company",
                    "C-Level Strategy Sessions on the AI Roadmap",
                    "Development of internal AI guidelines",
                ],
                "Book Workshop",
            ),
            service(
                "3",
                "campaign",
                "Authentic Reach",
                "Kommunikation & Skalierung",
                "Marketing communication that scales through AI but resonates through human empathy. We train models to your specific \"Brand Voice\" so you can produce content that doesn't sound like a robot. More output, with the same or higher emotional quality.",
                "Visibility without loss of identity.",
                "Scope of Services",
                &[
                    "Fine-tuning of models to your Brand Voice",
                    "Scalable personalization for outreach",
                    "Automated content repurposing workflows",
                    "SEO optimization through assisted content creation",
                ],
                "Start Potential Analysis",
            ),
        ],
        projects: vec![
            project("p1", "Global Pharma Transformation", "Strategic AI", PROJECT_IMAGES[0], "Automated 70% of regulatory reporting workflows while maintaining 100% human oversight."),
            project("p2", "NextGen Creative Studio", "Creative Ops", PROJECT_IMAGES[1], "Implemented custom diffusion models for rapid storyboarding, reducing production time by 40%."),
            project("p3", "Fintech Advisory Layer", "Client Services", PROJECT_IMAGES[2], "Developed an AI-enhanced concierge service for high-net-worth individuals."),
        ],
        insights: vec![
            insight("i1", "AI Readiness Checklist", InsightKind::Checklist, "A 20-point diagnostic to evaluate if your organization is ready for human-centric automation."),
            insight("i2", "2024 State of Human-AI Interaction", InsightKind::Report, "Our annual research report on how elite teams are leveraging LLMs as strategic partners."),
        ],
        about: AboutContent {
            ceo_name: "Alexander Fürer".to_string(),
            ceo_title: "Founder".to_string(),
            bio: "Alex is a thinking pioneer and AI visionary. He believes that the true power of technology is not to replace humans, but to amplify our most unique qualities: empathy, creativity, and leadership.".to_string(),
            beliefs: strings(&[
                "Technology must serve the human experience.",
                "Radical simplicity is the highest form of sophistication.",
                "Automation should buy time for imagination.",
            ]),
            cv_items: vec![
                career("2020 - Present", "Managing Partner", "RDCL Human Centered AI"),
                career("2015 - 2020", "Head of Innovation", "Leading Swiss Consulting"),
                career("2010 - 2015", "Sr. Strategy Consultant", "Deloitte Digital"),
            ],
            education_items: vec![
                education("2019", "PhD in Business Innovation", "University of St. Gallen"),
                education("2012", "Design Thinking Professional", "Stanford University"),
            ],
            lecturing_items: vec![
                lecturing("2023 - Present", "Guest Lecturer AI Ethics", "ETH Zurich"),
                lecturing("2021 - Present", "Executive Education Lead", "University of St. Gallen"),
            ],
            image_url: CEO_IMAGE_URL.to_string(),
        },
        partners: partners(("ORACLE", "https://oracle.com")),
    }
}

fn german() -> WebsiteData {
    WebsiteData {
        logo_url: LOGO_URL.to_string(),
        ai_readiness_url: AI_READINESS_URL.to_string(),
        projects_heading: "Ausgewählte Projekte & Keynotes".to_string(),
        projects_intro: "Evidenz für Transformation im Zeitalter der Intelligenz. Unser Portfolio zeigt unser Engagement für menschenzentrierte KI-Integration – technische Präzision trifft visionäre Führung.".to_string(),
        insights_heading: Some(INSIGHTS_HEADING.to_string()),
        insights_intro: Some(INSIGHTS_INTRO.to_string()),
        mission: MissionContent {
            heading: "Die Brücke zwischen menschlicher Intuition und maschineller Intelligenz.".to_string(),
            subheading: "Bei RDCL geht es nicht um KI um der KI willen. Wir setzen Systeme auf, die Arbeit einfacher machen – und Menschen stärker. Wenn KI skaliert, soll der menschliche Wert nicht kleiner werden, sondern sichtbarer.".to_string(),
            pillars: vec![
                pillar("Empathie zuerst", "Jeder automatisierte Workflow muss das Leben derer verbessern, denen er dient. Wir messen Erfolg an der Zeit, die wir für Ihre Mitarbeiter zurückgewinnen."),
                pillar("Radikale Klarheit", "Wir entmystifizieren das Komplexe. Unsere Frameworks verwandeln KI-Angst in strategischen Vorteil durch transparente und erklärbare Systeme."),
                pillar("Ethische Integration", "Technologie mit Gewissen. Wir stellen sicher, dass Ihre KI-Adoption globalen Standards und Ihren spezifischen Unternehmenswerten entspricht."),
            ],
        },
        services: vec![
            service(
                "1",
                "engineering",
                "Das Zentaur-Modell",
                "Prozesse & Automatisierung",
                "Wir integrieren KI tief in Ihre operativen Kernprozesse. Wir folgen dem \"Zentaur\"-Ansatz: Der Mensch hält die Zügel und gibt die strategische Richtung vor, während die KI die Last repetitiver Aufgaben übernimmt. Wir bauen massgeschneiderte Systeme, die nicht ersetzen, sondern stärken.",
                "0% Admin. 100% Fokus.",
                "Leistungsumfang",
                &[
                    "Analyse bestehender Workflows auf Automatisierungspotenzial",
                    "Integration in bestehende Software (ERP, CRM, Slack)",
                    "Entwicklung von Custom LLM Wrappern für Datenschutz-Compliance",
                    "Intelligente Dokumentenverarbeitung & Datenextraktion",
                ],
                "Details anfragen",
            ),
            service(
                "2",
                "lightbulb",
                "Mindset Shift",
                "Kultur & Kompetenz",
                "Technologie ist wertlos ohne die Menschen, die sie bedienen. Unsere Workshops und Keynotes sind darauf ausgelegt, Ängste abzubauen und pragmatische Neugier zu wecken. Wir verwandeln die Skepsis Ihrer Belegschaft in produktiven Antrieb und etablieren eine Kultur des lebenslangen Lernens.",
                "Ein Team, das KI nutzt.",
                "Leistungsumfang",
                &[
                    "Interaktive Workshops für Prompt Engineering",
                    "Identifikation von \"AI Champions\" im Unternehmen",
                    "C-Level Strategie-Sessions zur AI Roadmap",
                    "Entwicklung interner KI-Richtlinien",
                ],
                "Workshop buchen",
            ),
            service(
                "3",
                "campaign",
                "Authentic Reach",
                "Kommunikation & Skalierung",
                "Marketing-Kommunikation, die durch KI skaliert, aber durch menschliche Empathie überzeugt. Wir trainieren Modelle auf Ihre spezifische \"Brand Voice\", damit Sie Content produzieren können, der nicht nach Roboter klingt. Mehr Output, bei gleicher oder höherer emotionaler Qualität.",
                "Sichtbarkeit ohne Identitätsverlust.",
                "Leistungsumfang",
                &[
                    "Fine-Tuning von Modellen auf Ihre Brand Voice",
                    "Skalierbare Personalisierung für Outreach",
                    "Automatisierte Content-Repurposing-Workflows",
                    "SEO-Optimierung durch assistierte Content-Erstellung",
                ],
                "Potenzialanalyse starten",
            ),
        ],
        projects: vec![
            project("p1", "Globale Pharma-Transformation", "Strategische KI", PROJECT_IMAGES[0], "70% der regulatorischen Reporting-Workflows automatisiert bei 100% menschlicher Kontrolle."),
            project("p2", "NextGen Creative Studio", "Creative Ops", PROJECT_IMAGES[1], "Custom Diffusion-Modelle für schnelles Storyboarding implementiert – 40% weniger Produktionszeit."),
            project("p3", "Fintech Advisory Layer", "Kundenservice", PROJECT_IMAGES[2], "KI-gestützter Concierge-Service für vermögende Privatkunden entwickelt."),
        ],
        insights: vec![
            insight("i1", "AI Readiness Checklist", InsightKind::Checklist, "Eine 20-Punkte-Diagnose zur Bewertung, ob Ihre Organisation bereit für menschenzentrierte Automatisierung ist."),
            insight("i2", "2024 State of Human-AI Interaction", InsightKind::Report, "Unser jährlicher Forschungsbericht darüber, wie Elite-Teams LLMs als strategische Partner einsetzen."),
        ],
        about: AboutContent {
            ceo_name: "Alexander Fürer".to_string(),
            ceo_title: "Gründer".to_string(),
            bio: "Alex ist ein Design Thinking Pionier und KI-Visionär. Er glaubt, dass die wahre Kraft der Technologie nicht darin liegt, Menschen zu ersetzen, sondern unsere einzigartigsten Qualitäten zu verstärken: Empathie, Kreativität und Führung.".to_string(),
            beliefs: strings(&[
                "Technologie muss dem menschlichen Erlebnis dienen.",
                "Radikale Einfachheit ist die höchste Form der Raffinesse.",
                "Automatisierung sollte Zeit für Imagination freikaufen.",
            ]),
            cv_items: vec![
                career("2020 - Heute", "Managing Partner", "RDCL Human Centered AI"),
                career("2015 - 2020", "Head of Innovation", "Leading Swiss Consulting"),
                career("2010 - 2015", "Sr. Strategy Consultant", "Deloitte Digital"),
            ],
            education_items: vec![
                education("2019", "PhD in Business Innovation", "Universität St. Gallen"),
                education("2012", "Design Thinking Professional", "Stanford University"),
            ],
            lecturing_items: vec![
                lecturing("2023 - Heute", "Gastdozent AI Ethics", "ETH Zürich"),
                lecturing("2021 - Heute", "Executive Education Lead", "Universität St. Gallen"),
            ],
            image_url: CEO_IMAGE_URL.to_string(),
        },
        partners: partners(("ORACLE", "https://oracle.com")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_translations_only_carry_english() {
        let translations = default_translations();
        assert_eq!(translations.len(), 1);
        assert_eq!(translations["en"], default_bundle(Language::En));
    }

    #[test]
    fn test_bundles_share_structure() {
        let en = default_bundle(Language::En);
        let de = default_bundle(Language::De);
        assert_eq!(en.services.len(), de.services.len());
        assert_eq!(en.mission.pillars.len(), 3);
        assert_ne!(en.about.ceo_title, de.about.ceo_title);
    }
}
