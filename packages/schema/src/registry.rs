//! # Block Schema Registry
//!
//! The catalog of block variants: their wire tags, human labels and the
//! default factory for each one. Every factory returns a fully populated
//! block, so downstream code never deals with missing fields.

use crate::block::*;
use crate::entities::*;
use crate::error::{SchemaError, SchemaResult};
use crate::ids::IdSource;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant of a [`Block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Header,
    Ticker,
    SectionDivider,
    ArticleGrid,
    Spotlight,
    EthicsSplit,
    Image,
    Text,
    HtmlEmbed,
    PromptMasterclass,
    SbarPrompt,
    PromptTemplate,
    SafetyReminders,
    ClinicalPromptTemplates,
    TermOfMonth,
    AiCaseFile,
    QuickHits,
    Humor,
    Spacer,
    Footer,
    AiSafety,
    InstitutionalSpotlight,
    RssSidebar,
}

impl BlockType {
    /// Every variant, in palette order
    pub const ALL: [BlockType; 23] = [
        BlockType::Header,
        BlockType::Ticker,
        BlockType::SectionDivider,
        BlockType::ArticleGrid,
        BlockType::Spotlight,
        BlockType::EthicsSplit,
        BlockType::Image,
        BlockType::Text,
        BlockType::HtmlEmbed,
        BlockType::PromptMasterclass,
        BlockType::SbarPrompt,
        BlockType::PromptTemplate,
        BlockType::SafetyReminders,
        BlockType::ClinicalPromptTemplates,
        BlockType::TermOfMonth,
        BlockType::AiCaseFile,
        BlockType::QuickHits,
        BlockType::Humor,
        BlockType::Spacer,
        BlockType::Footer,
        BlockType::AiSafety,
        BlockType::InstitutionalSpotlight,
        BlockType::RssSidebar,
    ];

    /// Wire tag (`type` field value)
    pub fn tag(self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Ticker => "ticker",
            BlockType::SectionDivider => "section-divider",
            BlockType::ArticleGrid => "article-grid",
            BlockType::Spotlight => "spotlight",
            BlockType::EthicsSplit => "ethics-split",
            BlockType::Image => "image",
            BlockType::Text => "text",
            BlockType::HtmlEmbed => "html-embed",
            BlockType::PromptMasterclass => "prompt-masterclass",
            BlockType::SbarPrompt => "sbar-prompt",
            BlockType::PromptTemplate => "prompt-template",
            BlockType::SafetyReminders => "safety-reminders",
            BlockType::ClinicalPromptTemplates => "clinical-prompt-templates",
            BlockType::TermOfMonth => "term-of-month",
            BlockType::AiCaseFile => "ai-case-file",
            BlockType::QuickHits => "quick-hits",
            BlockType::Humor => "humor",
            BlockType::Spacer => "spacer",
            BlockType::Footer => "footer",
            BlockType::AiSafety => "ai-safety",
            BlockType::InstitutionalSpotlight => "institutional-spotlight",
            BlockType::RssSidebar => "rss-sidebar",
        }
    }

    /// Human label for palettes and placeholders
    pub fn label(self) -> &'static str {
        match self {
            BlockType::Header => "Header / Masthead",
            BlockType::Ticker => "Scrolling News Ticker",
            BlockType::SectionDivider => "Section Divider",
            BlockType::ArticleGrid => "Article Grid",
            BlockType::Spotlight => "Spotlight Article",
            BlockType::EthicsSplit => "Ethics & Governance",
            BlockType::Image => "Image Block",
            BlockType::Text => "Rich Text Block",
            BlockType::HtmlEmbed => "HTML Embed",
            BlockType::PromptMasterclass => "Prompt Masterclass",
            BlockType::SbarPrompt => "SBAR-P Framework",
            BlockType::PromptTemplate => "Prompt Template",
            BlockType::SafetyReminders => "Safety Reminders",
            BlockType::ClinicalPromptTemplates => "Clinical Prompt Templates",
            BlockType::TermOfMonth => "AI Term of the Month",
            BlockType::AiCaseFile => "AI Case File / History",
            BlockType::QuickHits => "Quick Hits",
            BlockType::Humor => "Humor Break",
            BlockType::Spacer => "Spacer",
            BlockType::Footer => "Footer",
            BlockType::AiSafety => "AI Safety Monitor",
            BlockType::InstitutionalSpotlight => "Institutional AI Spotlight",
            BlockType::RssSidebar => "RSS Feed Panel",
        }
    }

    /// Build the default instance of this variant.
    ///
    /// The block and its nested entities draw identifiers from `ids`; `now`
    /// seeds date fields so the result is reproducible.
    pub fn create(self, ids: &mut dyn IdSource, now: DateTime<Utc>) -> Block {
        let id = ids.next_id();
        let today = now.format("%Y-%m-%d").to_string();

        match self {
            BlockType::Header => Block::Header(HeaderBlock {
                id,
                title: "The Clinical AI Pulse".to_string(),
                subtitle: "Artificial Intelligence in Clinical Practice".to_string(),
                issue_number: "Issue 001".to_string(),
                issue_date: now.format("%B %-d, %Y").to_string(),
                tagline: "Edited by the Clinical AI Working Group".to_string(),
                logo_url: String::new(),
                logo_data_url: String::new(),
                background_style: HeaderBackground::Gradient,
                accent_color: "#009CDE".to_string(),
            }),

            BlockType::Ticker => Block::Ticker(TickerBlock {
                id,
                source_mode: TickerSource::Manual,
                items: strings(&[
                    "AI CT screening reaches 94% sensitivity across 47 trials",
                    "Regulators authorize a record number of AI medical devices",
                    "RCT: ambient AI scribes reduce clinician burnout at 6 months",
                ]),
                links: Vec::new(),
                use_links: false,
                rss_urls: Vec::new(),
                rss_max_items: 20,
                speed: TickerSpeed::Medium,
                background_color: "#003087".to_string(),
                text_color: "#ffffff".to_string(),
            }),

            BlockType::SectionDivider => Block::SectionDivider(SectionDividerBlock {
                id,
                label: "TOP CLINICAL AI NEWS".to_string(),
                style: DividerStyle::Gradient,
                number: 1,
                description: String::new(),
            }),

            BlockType::ArticleGrid => Block::ArticleGrid(ArticleGridBlock {
                id,
                section_title: "This Week in Clinical AI".to_string(),
                columns: 2,
                layout: ArticleLayout::Card,
                articles: vec![
                    Article::placeholder(ids.next_id(), "AI Seizure Detection: CNN vs LSTM"),
                    Article::placeholder(ids.next_id(), "Foundation Models in Radiology"),
                ],
            }),

            BlockType::Spotlight => Block::Spotlight(SpotlightBlock {
                id,
                article: Article::placeholder(ids.next_id(), "Spotlight: Paper of the Month"),
                accent_color: "#009CDE".to_string(),
                layout: SpotlightLayout::LeftImage,
            }),

            BlockType::EthicsSplit => Block::EthicsSplit(EthicsSplitBlock {
                id,
                heading: "AI Governance & Ethics Update".to_string(),
                subheading: "What it means for clinical practice".to_string(),
                left_title: "The Concern".to_string(),
                left_content: "Describe the ethical or governance concern here.".to_string(),
                right_title: "Clinical Perspective".to_string(),
                right_content: "Your clinical perspective and recommended approach.".to_string(),
                clinical_perspective: String::new(),
                url: String::new(),
                source: String::new(),
            }),

            BlockType::Image => Block::Image(ImageBlock {
                id,
                url: String::new(),
                data_url: String::new(),
                alt: String::new(),
                caption: String::new(),
                link_url: String::new(),
                width: ImageWidth::Full,
                alignment: Alignment::Center,
                border_radius: 12,
            }),

            BlockType::Text => Block::Text(TextBlock {
                id,
                html: "<p>Click to edit this text block. You can write <strong>bold</strong>, \
                       <em>italic</em>, and include <a href=\"#\">links</a>.</p>"
                    .to_string(),
                alignment: Alignment::Left,
                max_width: TextWidth::Reading,
            }),

            BlockType::HtmlEmbed => Block::HtmlEmbed(HtmlEmbedBlock {
                id,
                html: "<div style=\"padding:20px;border:1px dashed #ccc;border-radius:8px;\
                       text-align:center;color:#888\">Custom HTML content</div>"
                    .to_string(),
                label: "Custom HTML".to_string(),
            }),

            BlockType::PromptMasterclass => Block::PromptMasterclass(PromptMasterclassBlock {
                id,
                heading: "Prompt Like a Rockstar".to_string(),
                step: "Step 1: The Baseline".to_string(),
                framework: "Context → Task → Constraints".to_string(),
                bad_prompt: "\"Explain MS.\"".to_string(),
                good_prompt: "Act as a neurology attending. In 120-160 words, explain MS \
                              pathophysiology focusing on demyelination and immune mechanisms. \
                              Exclude treatment and epidemiology. If uncertain, say so."
                    .to_string(),
                explanation: "Better prompts save time and reduce hallucinations. Persona + \
                              task verb + negative constraints + uncertainty disclosure."
                    .to_string(),
            }),

            BlockType::SbarPrompt => Block::SbarPrompt(SbarPromptBlock {
                id,
                heading: "SBAR-P Clinical AI Prompting Framework".to_string(),
                steps: vec![
                    sbar("S", "SITUATION", "State the clinical context clearly.",
                        "58-year-old admitted with acute decompensated heart failure."),
                    sbar("B", "BACKGROUND", "Provide relevant history, medications and investigations.",
                        "PMH: CKD stage 3, type 2 diabetes. Current Cr 2.1 (baseline 1.6)."),
                    sbar("A", "ASK", "Be explicit about exactly what you want.",
                        "List the top 5 causes of worsening renal function and the workup for each."),
                    sbar("R", "ROLE", "Assign a clinical persona to anchor the reasoning style.",
                        "Respond as a nephrology consultant preparing a consultation note."),
                    sbar("P", "PARAMETERS", "Set guardrails: evidence base, uncertainty, limits.",
                        "Use current guidelines. Flag uncertainty. Do not fabricate lab values."),
                ],
                template_prompt: "Act as a [SPECIALTY] consultant reviewing this case.\n\n\
                                  Patient: [AGE] [SEX] presenting with [CHIEF COMPLAINT].\n\
                                  Key findings: [VITALS, EXAM, LABS/IMAGING]\n\n\
                                  Task: [SPECIFIC ASK]\nConstraints: cite guidelines, flag uncertainty."
                    .to_string(),
                safety_tips: strings(&[
                    "Always verify AI-generated clinical reasoning against primary sources.",
                    "Never submit patient-identifiable information to consumer AI tools.",
                    "AI supports clinical judgment; final decisions remain with the clinician.",
                ]),
            }),

            BlockType::PromptTemplate => Block::PromptTemplate(PromptTemplateBlock {
                id,
                heading: "Prompt Template".to_string(),
                prompt: "Act as a [ROLE]. Given [CONTEXT], produce [OUTPUT] in [FORMAT]. \
                         State any uncertainty explicitly."
                    .to_string(),
            }),

            BlockType::SafetyReminders => Block::SafetyReminders(SafetyRemindersBlock {
                id,
                heading: "Safety Reminders".to_string(),
                items: strings(&[
                    "Verify every AI output against a primary source before acting on it.",
                    "Use only institutionally approved tools for patient data.",
                ]),
            }),

            BlockType::ClinicalPromptTemplates => {
                Block::ClinicalPromptTemplates(ClinicalPromptTemplatesBlock {
                    id,
                    heading: "Clinical Prompt Templates".to_string(),
                    description: "Ready-to-use templates for common clinical AI scenarios."
                        .to_string(),
                    templates: vec![
                        ClinicalPrompt {
                            id: ids.next_id(),
                            category: "Differential Diagnosis".to_string(),
                            title: "Generate Differential Diagnosis".to_string(),
                            prompt: "Act as an attending. My patient is a [AGE] [SEX] presenting \
                                     with [SYMPTOM]. Generate a prioritized differential (top 5)."
                                .to_string(),
                            use_case: "Clinical reasoning support for complex presentations"
                                .to_string(),
                        },
                        ClinicalPrompt {
                            id: ids.next_id(),
                            category: "Patient Education".to_string(),
                            title: "Patient Education Letter".to_string(),
                            prompt: "Write a patient education letter for [DIAGNOSIS] at a \
                                     6th-grade reading level."
                                .to_string(),
                            use_case: "Generate patient-readable health information".to_string(),
                        },
                    ],
                })
            }

            BlockType::TermOfMonth => Block::TermOfMonth(TermOfMonthBlock {
                id,
                term: "Foundation Model".to_string(),
                definition: "A large-scale model trained on broad data that serves as a reusable \
                             base adaptable to many downstream tasks."
                    .to_string(),
                relevance: "Shifts clinical AI from narrow single-disease algorithms to systems \
                            that generalize across conditions."
                    .to_string(),
                clinical_application: "One imaging model can screen for several emergencies \
                                       from a single inference."
                    .to_string(),
                related_terms: strings(&["Transfer Learning", "Fine-tuning", "Multimodal AI"]),
            }),

            BlockType::AiCaseFile => Block::AiCaseFile(AiCaseFileBlock {
                id,
                year: "1950".to_string(),
                title: "The Turing Test".to_string(),
                content: "Alan Turing proposed the Imitation Game as a practical test for \
                          machine intelligence."
                    .to_string(),
                significance: "It established the behavioral benchmark that still drives debate \
                               about machine cognition."
                    .to_string(),
                image_url: String::new(),
                image_data_url: String::new(),
                source_url: "https://doi.org/10.1093/mind/LIX.236.433".to_string(),
                source_label: "Turing, 1950, Mind".to_string(),
            }),

            BlockType::QuickHits => Block::QuickHits(QuickHitsBlock {
                id,
                heading: "Quick Hits".to_string(),
                hits: (0..2)
                    .map(|_| QuickHit {
                        id: ids.next_id(),
                        title: "Add article title here".to_string(),
                        url: String::new(),
                        source: "Journal".to_string(),
                        summary: "1-2 line summary.".to_string(),
                    })
                    .collect(),
            }),

            BlockType::Humor => Block::Humor(HumorBlock {
                id,
                heading: "Humor Break".to_string(),
                content: "My dictation software transcribed \"patient denies diplopia\" as \
                          \"patient denies diplomacy\". I could not entirely rule it out."
                    .to_string(),
                attribution: "Submitted anonymously".to_string(),
                emoji_decor: "🧠".to_string(),
                image_url: String::new(),
                image_data_url: String::new(),
                source_url: String::new(),
                image_height: None,
                image_fit: Some(ImageFit::Contain),
            }),

            BlockType::Spacer => Block::Spacer(SpacerBlock {
                id,
                height: 32,
                show_line: false,
                line_style: LineStyle::Solid,
            }),

            BlockType::Footer => Block::Footer(FooterBlock {
                id,
                institution: "Your Institution".to_string(),
                department: "Department of Medicine".to_string(),
                editors: "The Clinical AI Working Group".to_string(),
                unsubscribe_url: "#unsubscribe".to_string(),
                subscribe_url: "#subscribe".to_string(),
                website_url: String::new(),
                contact_email: String::new(),
                copyright_year: now.year().to_string(),
                disclaimer: "This newsletter is for educational purposes only and does not \
                             constitute medical advice."
                    .to_string(),
                socials: vec![
                    FooterSocial {
                        platform: "Twitter/X".to_string(),
                        url: "#".to_string(),
                        icon: "twitter".to_string(),
                    },
                    FooterSocial {
                        platform: "LinkedIn".to_string(),
                        url: "#".to_string(),
                        icon: "linkedin".to_string(),
                    },
                ],
                show_socials: true,
                next_issue_date: String::new(),
                next_issue_teaser: String::new(),
            }),

            BlockType::AiSafety => Block::AiSafety(AiSafetyBlock {
                id,
                heading: "AI Safety Monitor".to_string(),
                subheading: "Regulatory updates, incidents, and clinical safety alerts".to_string(),
                show_last_updated: true,
                updates: vec![
                    SafetyUpdate {
                        id: ids.next_id(),
                        date: today.clone(),
                        category: SafetyCategory::Fda,
                        title: "Guidance on AI-Enabled Medical Devices".to_string(),
                        summary: "Post-market surveillance expectations for adaptive algorithms."
                            .to_string(),
                        url: String::new(),
                        severity: Severity::High,
                    },
                    SafetyUpdate {
                        id: ids.next_id(),
                        date: today,
                        category: SafetyCategory::Alert,
                        title: "Hallucination Risk: AI Drug Dosing Tools".to_string(),
                        summary: "Case reports of incorrect dosing advice from consumer chatbots."
                            .to_string(),
                        url: String::new(),
                        severity: Severity::Critical,
                    },
                ],
            }),

            BlockType::InstitutionalSpotlight => {
                Block::InstitutionalSpotlight(InstitutionalSpotlightBlock {
                    id,
                    heading: "Institutional AI Spotlight".to_string(),
                    subheading: "Latest AI innovation from across the health system".to_string(),
                    auto_fetch: false,
                    last_fetched: String::new(),
                    max_items: 6,
                    items: vec![InstitutionalItem {
                        id: ids.next_id(),
                        title: "Add an institutional AI news item".to_string(),
                        url: String::new(),
                        pub_date: now.to_rfc3339(),
                        summary: "Summary of the AI initiative or news item.".to_string(),
                        image_url: String::new(),
                        category: "Innovation".to_string(),
                    }],
                })
            }

            BlockType::RssSidebar => Block::RssSidebar(RssSidebarBlock {
                id,
                heading: "In the Feed This Week".to_string(),
                feed_urls: strings(&[
                    "https://pubmed.ncbi.nlm.nih.gov/rss/search/1/?term=artificial+intelligence&sort=date",
                ]),
                items: Vec::new(),
                max_items: 8,
                last_fetched: String::new(),
                position: SidebarPosition::Inline,
                refresh_on_view: false,
                enable_scroll: None,
            }),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == s)
            .ok_or_else(|| SchemaError::UnknownBlockType(s.to_string()))
    }
}

/// Construct a default block from an external tag.
pub fn create_block(tag: &str, ids: &mut dyn IdSource, now: DateTime<Utc>) -> SchemaResult<Block> {
    let block_type: BlockType = tag.parse()?;
    Ok(block_type.create(ids, now))
}

/// All wire tags, for validating external input
pub fn block_tags() -> Vec<&'static str> {
    BlockType::ALL.iter().map(|t| t.tag()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sbar(letter: &str, name: &str, description: &str, example: &str) -> SbarStep {
    SbarStep {
        letter: letter.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        example: example.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_every_tag_round_trips_through_from_str() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.tag().parse::<BlockType>().unwrap(), block_type);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let mut ids = SequentialIds::new("b");
        let err = create_block("carousel", &mut ids, now()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownBlockType(ref t) if t == "carousel"));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_factories_produce_matching_variant() {
        let mut ids = SequentialIds::new("b");
        for block_type in BlockType::ALL {
            let block = block_type.create(&mut ids, now());
            assert_eq!(block.block_type(), block_type);
        }
    }

    #[test]
    fn test_factory_output_serializes_tag_matching_registry() {
        let mut ids = SequentialIds::new("b");
        for block_type in BlockType::ALL {
            let json = serde_json::to_value(block_type.create(&mut ids, now())).unwrap();
            assert_eq!(json["type"], block_type.tag());
        }
    }

    #[test]
    fn test_date_fields_follow_clock() {
        let mut ids = SequentialIds::new("b");
        match BlockType::Header.create(&mut ids, now()) {
            Block::Header(h) => assert_eq!(h.issue_date, "March 1, 2025"),
            other => panic!("unexpected block {:?}", other.block_type()),
        }
        match BlockType::Footer.create(&mut ids, now()) {
            Block::Footer(f) => assert_eq!(f.copyright_year, "2025"),
            other => panic!("unexpected block {:?}", other.block_type()),
        }
    }

    #[test]
    fn test_block_tags_lists_all_variants() {
        let tags = block_tags();
        assert_eq!(tags.len(), 23);
        assert!(tags.contains(&"institutional-spotlight"));
    }
}
