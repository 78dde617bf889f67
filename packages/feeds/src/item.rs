use crate::parse::parse_date;
use chrono::{DateTime, Utc};
use pulse_schema::{SidebarItem, TickerLink};
use serde::{Deserialize, Serialize};

/// One normalized feed entry, whichever dialect it came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Date as published, unparsed
    pub pub_date: String,
    pub source: String,
    pub description: String,
    pub image_url: String,
}

impl FeedItem {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.pub_date)
    }

    /// Title, or the link for untitled entries
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.link
        } else {
            &self.title
        }
    }

    pub fn to_sidebar_item(&self) -> SidebarItem {
        SidebarItem {
            title: self.display_title().to_string(),
            url: self.link.clone(),
            source: self.source.clone(),
            pub_date: self.pub_date.clone(),
        }
    }

    pub fn to_ticker_link(&self) -> TickerLink {
        TickerLink {
            text: self.display_title().to_string(),
            url: self.link.clone(),
        }
    }
}
