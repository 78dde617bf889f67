//! The closed set of block variants.
//!
//! On the wire every block is a flat JSON object whose `type` field carries the
//! kebab-case variant tag, and whose remaining keys are the camelCase fields of
//! the variant struct.

use crate::entities::*;
use crate::ids::IdSource;
use crate::registry::BlockType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderBackground {
    Gradient,
    Solid,
    Mesh,
    Wave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickerSource {
    Manual,
    Rss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickerSpeed {
    Slow,
    Medium,
    Fast,
}

impl TickerSpeed {
    /// Seconds per marquee loop
    pub fn loop_seconds(self) -> u32 {
        match self {
            TickerSpeed::Slow => 60,
            TickerSpeed::Medium => 40,
            TickerSpeed::Fast => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DividerStyle {
    Gradient,
    Line,
    Bold,
    Numbered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleLayout {
    Card,
    Editorial,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpotlightLayout {
    LeftImage,
    RightImage,
    TopImage,
    NoImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageWidth {
    Full,
    Wide,
    Medium,
    Small,
}

impl ImageWidth {
    /// Width as a percentage of the content column
    pub fn percent(self) -> u32 {
        match self {
            ImageWidth::Full => 100,
            ImageWidth::Wide => 85,
            ImageWidth::Medium => 65,
            ImageWidth::Small => 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextWidth {
    Full,
    Reading,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarPosition {
    Inline,
    SidebarRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub issue_number: String,
    pub issue_date: String,
    pub tagline: String,
    pub logo_url: String,
    pub logo_data_url: String,
    pub background_style: HeaderBackground,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerBlock {
    pub id: String,
    pub source_mode: TickerSource,
    pub items: Vec<String>,
    pub links: Vec<TickerLink>,
    pub use_links: bool,
    pub rss_urls: Vec<String>,
    pub rss_max_items: u32,
    pub speed: TickerSpeed,
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDividerBlock {
    pub id: String,
    pub label: String,
    pub style: DividerStyle,
    pub number: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleGridBlock {
    pub id: String,
    pub section_title: String,
    /// 1, 2 or 3
    pub columns: u8,
    pub layout: ArticleLayout,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightBlock {
    pub id: String,
    pub article: Article,
    pub accent_color: String,
    pub layout: SpotlightLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicsSplitBlock {
    pub id: String,
    pub heading: String,
    pub subheading: String,
    pub left_title: String,
    pub left_content: String,
    pub right_title: String,
    pub right_content: String,
    pub clinical_perspective: String,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: String,
    pub url: String,
    pub data_url: String,
    pub alt: String,
    pub caption: String,
    pub link_url: String,
    pub width: ImageWidth,
    pub alignment: Alignment,
    pub border_radius: u32,
}

/// Rich text produced by the bundled editor; `html` is trusted markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: String,
    pub html: String,
    pub alignment: Alignment,
    pub max_width: TextWidth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlEmbedBlock {
    pub id: String,
    pub html: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptMasterclassBlock {
    pub id: String,
    pub heading: String,
    pub step: String,
    pub framework: String,
    pub bad_prompt: String,
    pub good_prompt: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbarPromptBlock {
    pub id: String,
    pub heading: String,
    pub steps: Vec<SbarStep>,
    pub template_prompt: String,
    pub safety_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplateBlock {
    pub id: String,
    pub heading: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRemindersBlock {
    pub id: String,
    pub heading: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalPromptTemplatesBlock {
    pub id: String,
    pub heading: String,
    pub description: String,
    pub templates: Vec<ClinicalPrompt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermOfMonthBlock {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub relevance: String,
    pub clinical_application: String,
    pub related_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiCaseFileBlock {
    pub id: String,
    pub year: String,
    pub title: String,
    pub content: String,
    pub significance: String,
    pub image_url: String,
    pub image_data_url: String,
    pub source_url: String,
    pub source_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickHitsBlock {
    pub id: String,
    pub heading: String,
    pub hits: Vec<QuickHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumorBlock {
    pub id: String,
    pub heading: String,
    pub content: String,
    pub attribution: String,
    pub emoji_decor: String,
    pub image_url: String,
    pub image_data_url: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fit: Option<ImageFit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerBlock {
    pub id: String,
    pub height: u32,
    pub show_line: bool,
    pub line_style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBlock {
    pub id: String,
    pub institution: String,
    pub department: String,
    pub editors: String,
    pub unsubscribe_url: String,
    pub subscribe_url: String,
    pub website_url: String,
    pub contact_email: String,
    pub copyright_year: String,
    pub disclaimer: String,
    pub socials: Vec<FooterSocial>,
    pub show_socials: bool,
    pub next_issue_date: String,
    pub next_issue_teaser: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSafetyBlock {
    pub id: String,
    pub heading: String,
    pub subheading: String,
    pub updates: Vec<SafetyUpdate>,
    pub show_last_updated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalSpotlightBlock {
    pub id: String,
    pub heading: String,
    pub subheading: String,
    pub items: Vec<InstitutionalItem>,
    pub auto_fetch: bool,
    pub last_fetched: String,
    pub max_items: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssSidebarBlock {
    pub id: String,
    pub heading: String,
    pub feed_urls: Vec<String>,
    pub items: Vec<SidebarItem>,
    pub max_items: u32,
    pub last_fetched: String,
    pub position: SidebarPosition,
    pub refresh_on_view: bool,
    /// Fixed-height scroll area when true, full list when false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_scroll: Option<bool>,
}

/// One typed unit of newsletter content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Header(HeaderBlock),
    Ticker(TickerBlock),
    SectionDivider(SectionDividerBlock),
    ArticleGrid(ArticleGridBlock),
    Spotlight(SpotlightBlock),
    EthicsSplit(EthicsSplitBlock),
    Image(ImageBlock),
    Text(TextBlock),
    HtmlEmbed(HtmlEmbedBlock),
    PromptMasterclass(PromptMasterclassBlock),
    SbarPrompt(SbarPromptBlock),
    PromptTemplate(PromptTemplateBlock),
    SafetyReminders(SafetyRemindersBlock),
    ClinicalPromptTemplates(ClinicalPromptTemplatesBlock),
    TermOfMonth(TermOfMonthBlock),
    AiCaseFile(AiCaseFileBlock),
    QuickHits(QuickHitsBlock),
    Humor(HumorBlock),
    Spacer(SpacerBlock),
    Footer(FooterBlock),
    AiSafety(AiSafetyBlock),
    InstitutionalSpotlight(InstitutionalSpotlightBlock),
    RssSidebar(RssSidebarBlock),
}

macro_rules! each_variant {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Block::Header($inner) => $body,
            Block::Ticker($inner) => $body,
            Block::SectionDivider($inner) => $body,
            Block::ArticleGrid($inner) => $body,
            Block::Spotlight($inner) => $body,
            Block::EthicsSplit($inner) => $body,
            Block::Image($inner) => $body,
            Block::Text($inner) => $body,
            Block::HtmlEmbed($inner) => $body,
            Block::PromptMasterclass($inner) => $body,
            Block::SbarPrompt($inner) => $body,
            Block::PromptTemplate($inner) => $body,
            Block::SafetyReminders($inner) => $body,
            Block::ClinicalPromptTemplates($inner) => $body,
            Block::TermOfMonth($inner) => $body,
            Block::AiCaseFile($inner) => $body,
            Block::QuickHits($inner) => $body,
            Block::Humor($inner) => $body,
            Block::Spacer($inner) => $body,
            Block::Footer($inner) => $body,
            Block::AiSafety($inner) => $body,
            Block::InstitutionalSpotlight($inner) => $body,
            Block::RssSidebar($inner) => $body,
        }
    };
}

impl Block {
    pub fn id(&self) -> &str {
        each_variant!(self, b => &b.id)
    }

    pub fn set_id(&mut self, id: String) {
        each_variant!(self, b => b.id = id)
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Header(_) => BlockType::Header,
            Block::Ticker(_) => BlockType::Ticker,
            Block::SectionDivider(_) => BlockType::SectionDivider,
            Block::ArticleGrid(_) => BlockType::ArticleGrid,
            Block::Spotlight(_) => BlockType::Spotlight,
            Block::EthicsSplit(_) => BlockType::EthicsSplit,
            Block::Image(_) => BlockType::Image,
            Block::Text(_) => BlockType::Text,
            Block::HtmlEmbed(_) => BlockType::HtmlEmbed,
            Block::PromptMasterclass(_) => BlockType::PromptMasterclass,
            Block::SbarPrompt(_) => BlockType::SbarPrompt,
            Block::PromptTemplate(_) => BlockType::PromptTemplate,
            Block::SafetyReminders(_) => BlockType::SafetyReminders,
            Block::ClinicalPromptTemplates(_) => BlockType::ClinicalPromptTemplates,
            Block::TermOfMonth(_) => BlockType::TermOfMonth,
            Block::AiCaseFile(_) => BlockType::AiCaseFile,
            Block::QuickHits(_) => BlockType::QuickHits,
            Block::Humor(_) => BlockType::Humor,
            Block::Spacer(_) => BlockType::Spacer,
            Block::Footer(_) => BlockType::Footer,
            Block::AiSafety(_) => BlockType::AiSafety,
            Block::InstitutionalSpotlight(_) => BlockType::InstitutionalSpotlight,
            Block::RssSidebar(_) => BlockType::RssSidebar,
        }
    }

    /// The article list, for variants that own one
    pub fn articles_mut(&mut self) -> Option<&mut Vec<Article>> {
        match self {
            Block::ArticleGrid(b) => Some(&mut b.articles),
            _ => None,
        }
    }

    /// The single spotlight article
    pub fn spotlight_article_mut(&mut self) -> Option<&mut Article> {
        match self {
            Block::Spotlight(b) => Some(&mut b.article),
            _ => None,
        }
    }

    /// The quick-hit list, for variants that own one
    pub fn quick_hits_mut(&mut self) -> Option<&mut Vec<QuickHit>> {
        match self {
            Block::QuickHits(b) => Some(&mut b.hits),
            _ => None,
        }
    }

    /// Give the block and every identified nested entity a fresh id.
    pub fn reassign_ids(&mut self, ids: &mut dyn IdSource) {
        self.set_id(ids.next_id());

        match self {
            Block::ArticleGrid(b) => {
                for article in &mut b.articles {
                    article.id = ids.next_id();
                }
            }
            Block::Spotlight(b) => b.article.id = ids.next_id(),
            Block::QuickHits(b) => {
                for hit in &mut b.hits {
                    hit.id = ids.next_id();
                }
            }
            Block::ClinicalPromptTemplates(b) => {
                for template in &mut b.templates {
                    template.id = ids.next_id();
                }
            }
            Block::AiSafety(b) => {
                for update in &mut b.updates {
                    update.id = ids.next_id();
                }
            }
            Block::InstitutionalSpotlight(b) => {
                for item in &mut b.items {
                    item.id = ids.next_id();
                }
            }
            _ => {}
        }
    }

    /// Identifiers of the nested entities this block owns
    pub fn nested_ids(&self) -> Vec<&str> {
        match self {
            Block::ArticleGrid(b) => b.articles.iter().map(|a| a.id.as_str()).collect(),
            Block::Spotlight(b) => vec![b.article.id.as_str()],
            Block::QuickHits(b) => b.hits.iter().map(|h| h.id.as_str()).collect(),
            Block::ClinicalPromptTemplates(b) => {
                b.templates.iter().map(|t| t.id.as_str()).collect()
            }
            Block::AiSafety(b) => b.updates.iter().map(|u| u.id.as_str()).collect(),
            Block::InstitutionalSpotlight(b) => b.items.iter().map(|i| i.id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use chrono::{TimeZone, Utc};

    fn grid() -> Block {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        BlockType::ArticleGrid.create(&mut SequentialIds::new("seed"), now)
    }

    #[test]
    fn test_block_json_is_flat_with_type_tag() {
        let json = serde_json::to_value(grid()).unwrap();
        assert_eq!(json["type"], "article-grid");
        assert_eq!(json["columns"], 2);
        assert_eq!(json["sectionTitle"], "This Week in Clinical AI");
        assert!(json["articles"].is_array());
    }

    #[test]
    fn test_reassign_ids_refreshes_nested() {
        let mut block = grid();
        let before: Vec<String> = block.nested_ids().iter().map(|s| s.to_string()).collect();

        block.reassign_ids(&mut SequentialIds::new("fresh"));

        assert_eq!(block.id(), "fresh-1");
        let after = block.nested_ids();
        assert_eq!(after, vec!["fresh-2", "fresh-3"]);
        for id in after {
            assert!(!before.iter().any(|b| b == id));
        }
    }

    #[test]
    fn test_list_accessors_match_variants() {
        let mut block = grid();
        assert!(block.articles_mut().is_some());
        assert!(block.quick_hits_mut().is_none());
        assert!(block.spotlight_article_mut().is_none());
    }

    #[test]
    fn test_unknown_type_tag_fails_to_parse() {
        let err = serde_json::from_str::<Block>(r#"{"type":"carousel","id":"x"}"#);
        assert!(err.is_err());
    }
}
