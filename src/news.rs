use crate::api::models::NewsItem;
use crate::sentiment;

pub const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";

pub fn build_prompt(topic: &str) -> String {
    format!("Summarize news in {topic} market for the last 24 hours")
}

/// Turns generated text into one item per blank-line separated paragraph, in order.
pub fn parse_news(content: &str) -> Vec<NewsItem> {
    content
        .split("\n\n")
        .filter(|paragraph| !paragraph.is_empty())
        .map(news_item)
        .collect()
}

fn news_item(paragraph: &str) -> NewsItem {
    let summary = first_sentence(paragraph);
    let url = search_url(&summary);
    NewsItem {
        sentiment: sentiment::score(paragraph),
        summary,
        url,
    }
}

/// Text up to and including the first period; a period is appended when there is none.
pub fn first_sentence(paragraph: &str) -> String {
    match paragraph.find('.') {
        Some(end) => paragraph[..=end].to_string(),
        None => format!("{paragraph}."),
    }
}

pub fn search_url(summary: &str) -> String {
    let mut url = String::with_capacity(SEARCH_URL_PREFIX.len() + summary.len() * 3);
    url.push_str(SEARCH_URL_PREFIX);
    url.push_str(&urlencoding::encode(summary));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_paragraphs_become_two_items() {
        let items = parse_news("Markets surge today.\n\nOil prices fall sharply.");
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].summary, "Markets surge today.");
        assert!((items[0].sentiment - 0.2).abs() < 1e-9);
        assert_eq!(
            items[0].url,
            "https://www.google.com/search?q=Markets%20surge%20today."
        );

        assert_eq!(items[1].summary, "Oil prices fall sharply.");
        assert!((items[1].sentiment + 0.2).abs() < 1e-9);
        assert_eq!(
            items[1].url,
            format!("{SEARCH_URL_PREFIX}Oil%20prices%20fall%20sharply.")
        );
    }

    #[test]
    fn irregular_verbs_are_not_markers() {
        let items = parse_news("Markets rose today.\n\nOil prices fell sharply.");
        let scored: Vec<_> = items
            .iter()
            .map(|i| (i.summary.as_str(), i.sentiment))
            .collect();
        assert_eq!(
            scored,
            vec![
                ("Markets rose today.", 0.0),
                ("Oil prices fell sharply.", 0.0)
            ]
        );
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let items = parse_news("\n\nFirst.\n\n\n\nSecond.\n\n");
        let summaries: Vec<_> = items.iter().map(|i| i.summary.as_str()).collect();
        assert_eq!(summaries, vec!["First.", "Second."]);
    }

    #[test]
    fn empty_content_yields_no_items() {
        assert!(parse_news("").is_empty());
    }

    #[test]
    fn summary_stops_at_first_period() {
        assert_eq!(
            first_sentence("Stocks gained. Bonds were flat. Gold slipped."),
            "Stocks gained."
        );
    }

    #[test]
    fn summary_without_period_gets_one() {
        assert_eq!(first_sentence("No period here"), "No period here.");
    }

    #[test]
    fn sentiment_uses_whole_paragraph() {
        let items = parse_news("Quiet open. Later a crash wiped out the gains.");
        assert_eq!(items[0].summary, "Quiet open.");
        // "crash" and "gain" both sit past the summary
        assert!(items[0].sentiment.abs() < 1e-9);

        let items = parse_news("Quiet open. Later a crash.");
        assert!((items[0].sentiment + 0.2).abs() < 1e-9);
    }

    #[test]
    fn url_percent_encodes_reserved_characters() {
        assert_eq!(
            search_url("AT&T up 5%?"),
            "https://www.google.com/search?q=AT%26T%20up%205%25%3F"
        );
    }

    #[test]
    fn prompt_embeds_topic() {
        assert_eq!(
            build_prompt("crypto"),
            "Summarize news in crypto market for the last 24 hours"
        );
    }
}
