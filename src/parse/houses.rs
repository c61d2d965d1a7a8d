use crate::domain::model::{HousePage, HouseRecord};
use crate::parse::{
    element_text, HOUSE_ROWS_SELECTOR, NAME_CELL_SELECTOR, RENT_CELL_SELECTOR,
    RESULTS_HEADER_SELECTOR, SIZE_CELL_SELECTOR, STATUS_CELL_SELECTOR,
};
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Extracts the house rows of one results page.
///
/// City and server are taken from the page caption, not from the request
/// that produced the page. Rows without a size cell are skipped and counted.
pub fn parse_houses(html: &str) -> Result<HousePage> {
    let document = Html::parse_document(html);

    let header = document
        .select(&RESULTS_HEADER_SELECTOR)
        .next()
        .ok_or(ScrapeError::MissingElement {
            element: "results header",
        })?;
    let (city, server) = split_header(&element_text(header))?;

    // The first row holds the column headings.
    let rows: Vec<ElementRef<'_>> = document.select(&HOUSE_ROWS_SELECTOR).skip(1).collect();
    if rows.is_empty() {
        return Err(ScrapeError::MissingElement {
            element: "house rows",
        });
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped_rows = 0;

    for (index, row) in rows.into_iter().enumerate() {
        let Some(size) = row.select(&SIZE_CELL_SELECTOR).next() else {
            skipped_rows += 1;
            continue;
        };

        let row_number = index + 1;
        records.push(HouseRecord {
            name: cell(row, &NAME_CELL_SELECTOR, row_number, "name")?,
            size: normalize(&element_text(size)),
            rent: cell(row, &RENT_CELL_SELECTOR, row_number, "rent")?,
            status: cell(row, &STATUS_CELL_SELECTOR, row_number, "status")?,
            city: city.clone(),
            server: server.clone(),
        });
    }

    if skipped_rows > 0 {
        tracing::debug!(
            "Skipped {} rows without a size cell for {} of {}",
            skipped_rows,
            city,
            server
        );
    }

    Ok(HousePage {
        city,
        server,
        records,
        skipped_rows,
    })
}

/// Splits "... <city> of <server>" on single spaces: the last word is the
/// server, the third from last the city.
fn split_header(text: &str) -> Result<(String, String)> {
    let words: Vec<&str> = text.trim().split(' ').collect();
    if words.len() < 3 {
        return Err(ScrapeError::MalformedHeader {
            header: text.to_string(),
        });
    }

    let server = words[words.len() - 1];
    let city = words[words.len() - 3];
    Ok((city.to_string(), server.to_string()))
}

fn cell(
    row: ElementRef<'_>,
    selector: &Selector,
    row_number: usize,
    column: &'static str,
) -> Result<String> {
    row.select(selector)
        .next()
        .map(|element| normalize(&element_text(element)))
        .ok_or(ScrapeError::MalformedHouseRow {
            row: row_number,
            missing: column,
        })
}

fn normalize(text: &str) -> String {
    text.replace('\u{a0}', " ")
}
