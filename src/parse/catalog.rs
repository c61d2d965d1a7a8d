use crate::domain::model::Catalog;
use crate::parse::{element_text, CITY_LABELS_SELECTOR, SERVER_OPTIONS_SELECTOR};
use crate::utils::error::{Result, ScrapeError};
use scraper::Html;

pub fn parse_cities(html: &str) -> Result<Vec<String>> {
    cities_from(&Html::parse_document(html))
}

/// Servers from the world dropdown, without its leading prompt option.
pub fn parse_servers(html: &str) -> Result<Vec<String>> {
    servers_from(&Html::parse_document(html))
}

/// Cities and servers of the catalog page, parsing the document once.
pub fn parse_catalog(html: &str) -> Result<Catalog> {
    let document = Html::parse_document(html);
    let cities = cities_from(&document)?;
    let servers = servers_from(&document)?;

    if cities.is_empty() {
        return Err(ScrapeError::EmptyCityList);
    }
    if servers.is_empty() {
        return Err(ScrapeError::EmptyServerList);
    }

    Ok(Catalog { cities, servers })
}

fn cities_from(document: &Html) -> Result<Vec<String>> {
    let cities: Vec<String> = document
        .select(&CITY_LABELS_SELECTOR)
        .map(|label| element_text(label).trim().to_string())
        .collect();

    if cities.is_empty() {
        return Err(ScrapeError::MissingElement {
            element: "city labels",
        });
    }
    Ok(cities)
}

fn servers_from(document: &Html) -> Result<Vec<String>> {
    let options: Vec<String> = document
        .select(&SERVER_OPTIONS_SELECTOR)
        .map(|option| element_text(option).trim().to_string())
        .collect();

    if options.is_empty() {
        return Err(ScrapeError::MissingElement {
            element: "server options",
        });
    }
    Ok(options.into_iter().skip(1).collect())
}
