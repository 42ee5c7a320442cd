use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub summary: String,
    pub sentiment: f64,
    pub url: String,
}
