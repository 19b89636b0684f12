// Turns one results page into PropertyRecords by reading the listing microdata.

use crate::{
    error::{ScraperError, ScraperResult},
    models::{NOT_AVAILABLE, PropertyRecord},
};
use scraper::{ElementRef, Html, Selector};

const LISTING_SELECTOR: &str = "li.li-item";
const AREA_UNIT: &str = "m²";

fn selector(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{css}: {e:?}")))
}

/// Where a field lives inside a listing container and how to read it.
#[derive(Debug, Clone)]
pub enum FieldLocator {
    /// Value of `attr` on the first element matching the selector.
    Attribute { selector: Selector, attr: &'static str },
    /// Trimmed text content of the first element matching the selector.
    Text { selector: Selector },
}

impl FieldLocator {
    fn attribute(css: &str, attr: &'static str) -> ScraperResult<Self> {
        Ok(Self::Attribute { selector: selector(css)?, attr })
    }

    fn text(css: &str) -> ScraperResult<Self> {
        Ok(Self::Text { selector: selector(css)? })
    }

    pub fn read(&self, container: ElementRef<'_>) -> Option<String> {
        match self {
            Self::Attribute { selector, attr } => container
                .select(selector)
                .next()
                .and_then(|el| el.value().attr(attr))
                .map(|value| value.trim().to_string()),
            Self::Text { selector } => container
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string()),
        }
    }

    /// Reads the field, substituting `default` when the markup is missing.
    pub fn read_or(&self, container: ElementRef<'_>, default: &str) -> String {
        self.read(container).unwrap_or_else(|| default.to_string())
    }
}

/// Compiled selectors for a results page; build once per run.
#[derive(Debug, Clone)]
pub struct Extractor {
    listing: Selector,
    name: FieldLocator,
    address: FieldLocator,
    price: FieldLocator,
    area: FieldLocator,
    neighborhood: FieldLocator,
    url: FieldLocator,
}

impl Extractor {
    pub fn new() -> ScraperResult<Self> {
        Ok(Self {
            listing: selector(LISTING_SELECTOR)?,
            name: FieldLocator::attribute(r#"meta[itemprop="name"]"#, "content")?,
            address: FieldLocator::text("span.endereco")?,
            price: FieldLocator::attribute(r#"meta[itemprop="price"]"#, "content")?,
            area: FieldLocator::text(r#"li[title="Área total"]"#)?,
            neighborhood: FieldLocator::text("span.bairro")?,
            url: FieldLocator::attribute(r#"link[itemprop="url"]"#, "href")?,
        })
    }

    /// Extracts every listing on the page, in document order. An empty vector means no results.
    pub fn extract(&self, html: &str) -> Vec<PropertyRecord> {
        let document = Html::parse_document(html);
        document
            .select(&self.listing)
            .map(|container| self.record(container))
            .collect()
    }

    fn record(&self, container: ElementRef<'_>) -> PropertyRecord {
        let price = self
            .price
            .read(container)
            .map(|raw| {
                raw.parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or_else(|| {
                    tracing::warn!(raw = %raw, "Unparseable listing price, using 0");
                    0.0
                })
            })
            .unwrap_or(0.0);

        let area_text = self.area.read_or(container, NOT_AVAILABLE);
        let area_numeric = parse_area(&area_text);

        let record = PropertyRecord {
            name: self.name.read_or(container, NOT_AVAILABLE),
            address: self.address.read_or(container, NOT_AVAILABLE),
            price,
            price_per_area: price_per_area(price, area_numeric),
            area_text,
            area_numeric,
            neighborhood: self.neighborhood.read_or(container, NOT_AVAILABLE),
            listing_url: self.url.read_or(container, NOT_AVAILABLE),
        };
        tracing::debug!(name = %record.name, area = ?record.area_numeric, url = %record.listing_url, "Extracted listing");
        record
    }
}

/// Converts pt-BR area text such as `"1.250,50 m²"` to `1250.5`.
/// Returns `None` for the placeholder or anything that does not parse.
pub fn parse_area(area_text: &str) -> Option<f64> {
    let text = area_text.trim();
    if text.is_empty() || text == NOT_AVAILABLE {
        return None;
    }

    let number = text.strip_suffix(AREA_UNIT).unwrap_or(text).trim();
    let normalized = number.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|area| area.is_finite())
}

/// Price divided by area, rounded to cents (ties to even). Absent unless the area is known and positive.
pub fn price_per_area(price: f64, area: Option<f64>) -> Option<f64> {
    area.filter(|a| *a > 0.0)
        .map(|a| ((price / a) * 100.0).round_ties_even() / 100.0)
}
