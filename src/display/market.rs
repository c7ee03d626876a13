//! Stock and news display formatting

use chrono::{DateTime, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_price, Article, PriceBar};
use crate::services::{PriceSlot, StocksPage};

use super::text::{truncate, wrap};

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
}

impl From<&PriceBar> for BarRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            time: bar.time().format("%Y-%m-%d %H:%M").to_string(),
            open: format_price(bar.open),
            close: format_price(bar.close),
            high: format_price(bar.high),
            low: format_price(bar.low),
        }
    }
}

/// Format one page of the company listing with its price overlay
pub fn format_company_page(page: &StocksPage) -> String {
    let mut output = String::new();

    if let Some(error) = page.error() {
        output.push_str(&format!("Error: {}\n", error));
    }

    if page.companies().is_empty() {
        output.push_str("No companies on this page.\n");
    } else {
        let rows: Vec<CompanyRow> = page
            .companies()
            .iter()
            .map(|company| CompanyRow {
                symbol: company.symbol.clone(),
                name: truncate(&company.name, 32),
                price: page.display_price(company),
                note: match page.price_slot(&company.symbol) {
                    Some(PriceSlot::Pending) => "loading".into(),
                    Some(PriceSlot::Unavailable) => "no data".into(),
                    Some(PriceSlot::Failed(_)) => "failed".into(),
                    _ => String::new(),
                },
            })
            .collect();
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "Page {} of {}\n",
        page.page() + 1,
        page.max_page() + 1
    ));
    output
}

/// Format a price history, newest bar first
pub fn format_price_history(symbol: &str, bars: &[PriceBar]) -> String {
    if bars.is_empty() {
        return format!("No price history for {}.", symbol);
    }

    let mut sorted: Vec<&PriceBar> = bars.iter().collect();
    sorted.sort_by_key(|bar| std::cmp::Reverse(bar.timestamp));

    let rows: Vec<BarRow> = sorted.into_iter().map(BarRow::from).collect();
    format!(
        "{} ({} bars)\n{}",
        symbol,
        bars.len(),
        Table::new(rows).with(Style::psql())
    )
}

/// Format the latest quote for a symbol
pub fn format_quote(symbol: &str, bar: &PriceBar) -> String {
    format!(
        "{}  {}  (open {}, as of {})",
        symbol,
        format_price(bar.display_price()),
        format_price(bar.open),
        bar.time().format("%Y-%m-%d %H:%M UTC")
    )
}

/// Format one news card
pub fn format_article(article: &Article, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    let title = if article.title().is_empty() {
        "(untitled)"
    } else {
        article.title()
    };
    output.push_str(title);
    output.push('\n');

    let mut meta = Vec::new();
    if !article.source_name().is_empty() {
        meta.push(article.source_name().to_string());
    }
    if let Some(author) = article.author.as_deref().filter(|a| !a.is_empty()) {
        meta.push(author.to_string());
    }
    let date = article.relative_date(now);
    if !date.is_empty() {
        meta.push(date);
    }
    if !meta.is_empty() {
        output.push_str(&format!("  {}\n", meta.join(" · ")));
    }

    let summary = article.summary();
    if !summary.is_empty() {
        for line in wrap(&summary, 76) {
            output.push_str(&format!("  {}\n", line));
        }
    }
    if let Some(url) = article.url.as_deref() {
        output.push_str(&format!("  {}\n", url));
    }
    output
}

/// Format a list of news cards
pub fn format_articles(articles: &[&Article], total: usize, now: DateTime<Utc>) -> String {
    if articles.is_empty() {
        return if total == 0 {
            "No articles available.".to_string()
        } else {
            "No articles match your filters.".to_string()
        };
    }

    let cards: Vec<String> = articles.iter().map(|a| format_article(a, now)).collect();
    format!(
        "{}\nShowing {} of {} articles",
        cards.join("\n"),
        articles.len(),
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleSource, Company};
    use crate::services::StockUpdate;
    use chrono::TimeZone;

    fn company(symbol: &str) -> Company {
        Company {
            symbol: symbol.into(),
            name: format!("{} Inc", symbol),
            exchange: None,
            price: Some(-1.0),
        }
    }

    #[test]
    fn test_company_page_overlay() {
        let mut page = StocksPage::new(9);
        let generation = page.begin_load(0).unwrap();
        page.apply(StockUpdate::Page {
            generation,
            page: 0,
            result: Ok(vec![company("AAPL"), company("MSFT")]),
        });
        page.apply(StockUpdate::Price {
            generation,
            symbol: "AAPL".into(),
            result: Ok(Some(187.1)),
        });

        let text = format_company_page(&page);
        assert!(text.contains("AAPL"));
        assert!(text.contains("187.10"));
        assert!(text.contains("loading"));
        assert!(text.contains("Page 1 of 10"));
    }

    #[test]
    fn test_history_newest_first() {
        let bars = [
            PriceBar {
                timestamp: 1_700_000_000_000_000_000,
                open: Some(10.0),
                close: Some(11.0),
                high: None,
                low: None,
            },
            PriceBar {
                timestamp: 1_700_086_400_000_000_000,
                open: Some(11.0),
                close: Some(12.5),
                high: None,
                low: None,
            },
        ];
        let text = format_price_history("IBM", &bars);
        assert!(text.starts_with("IBM (2 bars)"));
        let newest = text.find("12.50").unwrap();
        let oldest = text.find("10.00").unwrap();
        assert!(newest < oldest);
        assert!(format_price_history("IBM", &[]).contains("No price history"));
    }

    #[test]
    fn test_article_card() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let article = Article {
            title: Some("Markets rally".into()),
            source: Some(ArticleSource {
                id: None,
                name: Some("Reuters".into()),
            }),
            published_at: Some("2024-03-20T09:00:00Z".into()),
            description: Some("Stocks rose.".into()),
            ..Default::default()
        };
        let card = format_article(&article, now);
        assert!(card.starts_with("Markets rally\n"));
        assert!(card.contains("Reuters · 3h ago"));
        assert!(card.contains("Stocks rose."));

        assert_eq!(format_articles(&[], 4, now), "No articles match your filters.");
        assert_eq!(format_articles(&[], 0, now), "No articles available.");
    }
}
