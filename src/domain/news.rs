// News domain model and delivery relevance filtering
use serde::{Deserialize, Serialize};

pub const SCANNED_ARTICLES: usize = 10;

pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "traffic",
    "road",
    "accident",
    "protest",
    "event",
    "closure",
    "strike",
    "demonstration",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
}

impl NewsItem {
    pub fn placeholder(title: impl Into<String>, source: &str) -> Self {
        Self {
            title: title.into(),
            url: "#".to_string(),
            source: source.to_string(),
        }
    }

    pub fn no_significant_news() -> Self {
        Self::placeholder("No significant news affecting deliveries at this time", "System")
    }

    /// Canned headlines for `city`, shown when no provider feed can be
    /// reached at all.
    pub fn simulated(city: &str) -> Vec<Self> {
        vec![
            Self::placeholder(
                format!("Traffic delays reported on main avenue in {} due to construction", city),
                "Traffic Update",
            ),
            Self::placeholder(
                format!("New delivery routes established in {} downtown area", city),
                "Courier News",
            ),
            Self::placeholder(
                format!("Weather conditions affecting delivery times in {} suburban areas", city),
                "Weather Alert",
            ),
            Self::placeholder(
                format!("Local businesses report increased delivery demands in {}", city),
                "Business Times",
            ),
        ]
    }
}

/// Prefer headlines mentioning a delivery-relevant keyword among the first
/// few articles; otherwise show the top articles unfiltered.
pub fn select_relevant(articles: Vec<NewsItem>, keywords: &[String], max_items: usize) -> Vec<NewsItem> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let relevant: Vec<NewsItem> = articles
        .iter()
        .take(SCANNED_ARTICLES)
        .filter(|a| {
            let title = a.title.to_lowercase();
            keywords.iter().any(|k| title.contains(k.as_str()))
        })
        .take(max_items)
        .cloned()
        .collect();

    let selected = if relevant.is_empty() {
        articles.into_iter().take(max_items).collect()
    } else {
        relevant
    };

    if selected.is_empty() {
        vec![NewsItem::no_significant_news()]
    } else {
        selected
    }
}
