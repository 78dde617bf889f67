//! Curated feeds offered when configuring a feed-backed block.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub url: &'static str,
    pub tags: &'static [&'static str],
}

const PRESETS: &[FeedPreset] = &[
    FeedPreset {
        id: "frontiers-in-neuroscience-rss",
        label: "Frontiers in Neuroscience",
        url: "https://www.frontiersin.org/journals/neuroscience/rss",
        tags: &["neuroscience", "journal"],
    },
    FeedPreset {
        id: "frontiers-in-neurology-rss",
        label: "Frontiers in Neurology",
        url: "https://www.frontiersin.org/journals/neurology/rss",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "mit-news-artificial-intelligence",
        label: "MIT News: Artificial Intelligence",
        url: "https://news.mit.edu/rss/topic/artificial-intelligence2",
        tags: &["ai", "news"],
    },
    FeedPreset {
        id: "sciencedaily-artificial-intelligence",
        label: "ScienceDaily: Artificial Intelligence",
        url: "https://www.sciencedaily.com/rss/computers_math/artificial_intelligence.xml",
        tags: &["ai", "news"],
    },
    FeedPreset {
        id: "marktechpost-ai-news",
        label: "MarkTechPost: AI News",
        url: "https://www.marktechpost.com/feed/",
        tags: &["ai", "news"],
    },
    FeedPreset {
        id: "the-lancet-neurology-current",
        label: "The Lancet Neurology: Current",
        url: "https://www.thelancet.com/rssfeed/laneur_current.xml",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "jama-neurology-rss",
        label: "JAMA Neurology",
        url: "https://jamanetwork.com/rss/site_16/0.xml",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "jama-neuro-onlinefirst",
        label: "JAMA Neurology: Online First",
        url: "https://jamanetwork.com/rss/site_16/onlineFirst_72.xml",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "jama-neuro-current",
        label: "JAMA Neurology: Current Issue",
        url: "https://jamanetwork.com/rss/site_16/72.xml",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "npj-digital-medicine-rss",
        label: "npj Digital Medicine",
        url: "https://www.nature.com/npjdigitalmed.rss",
        tags: &["digital-medicine", "journal"],
    },
    FeedPreset {
        id: "practical-neurology-current",
        label: "Practical Neurology (BMJ): Current Issue",
        url: "https://pn.bmj.com/rss/current.xml",
        tags: &["neurology", "journal"],
    },
    FeedPreset {
        id: "fierce-healthcare-healthtech",
        label: "Fierce Healthcare: Health Tech",
        url: "https://www.fiercehealthcare.com/rss/health%20%26%20tech/xml",
        tags: &["ai", "health-it", "news"],
    },
    FeedPreset {
        id: "fierce-healthcare-all",
        label: "Fierce Healthcare: All Stories",
        url: "https://www.fiercehealthcare.com/rss/xml",
        tags: &["health-it", "news"],
    },
    FeedPreset {
        id: "nejm-ai-podcast",
        label: "NEJM AI Grand Rounds (podcast)",
        url: "https://ai-podcast.nejm.org/feed.xml",
        tags: &["ai", "medicine", "podcast"],
    },
];

pub fn presets() -> &'static [FeedPreset] {
    PRESETS
}

pub fn preset(id: &str) -> Option<&'static FeedPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

pub fn presets_tagged(tag: &str) -> Vec<&'static FeedPreset> {
    PRESETS.iter().filter(|p| p.tags.contains(&tag)).collect()
}
