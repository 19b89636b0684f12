// Data structures for one scraping run: the search scope and the extracted listings.

use serde::Serialize;
use std::num::NonZeroU32;

/// Placeholder for any textual listing field whose markup is missing.
pub const NOT_AVAILABLE: &str = "N/A";

// Search scope, read once at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub region_code: String,
    pub city_slug: String,
    pub neighborhood_slug: Option<String>,
    pub max_pages: NonZeroU32,
}

impl QueryParameters {
    pub fn new(
        region_code: impl Into<String>,
        city_slug: impl Into<String>,
        neighborhood_slug: Option<String>,
        max_pages: NonZeroU32,
    ) -> Self {
        Self {
            region_code: region_code.into(),
            city_slug: city_slug.into(),
            neighborhood_slug,
            max_pages,
        }
    }

    /// `region/city[/neighborhood]`, as used in the search path.
    pub fn path_segments(&self) -> String {
        match &self.neighborhood_slug {
            Some(neighborhood) => format!("{}/{}/{}", self.region_code, self.city_slug, neighborhood),
            None => format!("{}/{}", self.region_code, self.city_slug),
        }
    }
}

/// One listing as extracted from a results page.
///
/// Column names follow the report header (`Nome,Endereco,Preco,Area,Preco_medio,Bairro,Url`);
/// `area_numeric` is kept in memory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Endereco")]
    pub address: String,
    #[serde(rename = "Preco")]
    pub price: f64,
    #[serde(rename = "Area")]
    pub area_text: String,
    #[serde(skip)]
    pub area_numeric: Option<f64>,
    #[serde(rename = "Preco_medio")]
    pub price_per_area: Option<f64>,
    #[serde(rename = "Bairro")]
    pub neighborhood: String,
    #[serde(rename = "Url")]
    pub listing_url: String,
}
