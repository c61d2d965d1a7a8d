//! Field extraction from the community house pages.
//!
//! The selectors below are positional copies of the page markup. When the
//! site layout changes, update the constant here and nothing else.

pub mod catalog;
pub mod houses;

pub use catalog::{parse_catalog, parse_cities, parse_servers};
pub use houses::parse_houses;

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Town labels in the search form's town column.
pub const CITY_LABELS: &str = "#houses > div.Border_2 > div > div > form > div > table > tbody > tr > td > div.InnerTableContainer > table > tbody > tr:nth-child(2) > td > div > table > tbody > tr:nth-child(2) > td:nth-child(1) > label";

/// Options of the world dropdown; the first one is the "choose a world" prompt.
pub const SERVER_OPTIONS: &str = "#houses > div.Border_2 > div > div > form > div > table > tbody > tr > td > div.InnerTableContainer > table > tbody > tr:nth-child(1) > td > div > table > tbody > tr > td > div > div.WorldSelectionDropDown > select > option";

/// Caption of a results page, e.g. "Houses in Thais of Antica".
pub const RESULTS_HEADER: &str = "#houses > div.Border_2 > div > div > div > div > div > div";

/// Rows of the results table, column headings first.
pub const HOUSE_ROWS: &str = "#houses > div.Border_2 > div > div > div > table > tbody > tr > td > div.InnerTableContainer > table > tbody > tr > td > div > table tbody > tr";

pub const NAME_CELL: &str = "td:nth-child(1)";
pub const SIZE_CELL: &str = "td:nth-child(2)";
pub const RENT_CELL: &str = "td:nth-child(3)";
pub const STATUS_CELL: &str = "td:nth-child(4)";

fn compile(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

pub(crate) static CITY_LABELS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile(CITY_LABELS));
pub(crate) static SERVER_OPTIONS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile(SERVER_OPTIONS));
pub(crate) static RESULTS_HEADER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile(RESULTS_HEADER));
pub(crate) static HOUSE_ROWS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile(HOUSE_ROWS));
pub(crate) static NAME_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile(NAME_CELL));
pub(crate) static SIZE_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile(SIZE_CELL));
pub(crate) static RENT_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile(RENT_CELL));
pub(crate) static STATUS_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile(STATUS_CELL));

/// All text below `element`, concatenated.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Builders for results pages shaped like the live site.
#[cfg(test)]
pub(crate) mod test_pages {
    /// A results page captioned `header` whose table holds a heading row plus `rows`.
    pub(crate) fn results_page(header: &str, rows: &[&[&str]]) -> String {
        let mut body = String::from("<tr><td>Name</td><td>Size</td><td>Rent</td><td>Status</td></tr>");
        for row in rows {
            body.push_str("<tr>");
            for cell in row.iter() {
                body.push_str(&format!("<td>{}</td>", cell));
            }
            body.push_str("</tr>");
        }

        format!(
            r#"<html><body><div id="houses"><div class="Border_2"><div><div><div>
<div><div><div>{header}</div></div></div>
<table><tbody><tr><td><div class="InnerTableContainer"><table><tbody><tr><td><div>
<table><tbody>{body}</tbody></table>
</div></td></tr></tbody></table></div></td></tr></tbody></table>
</div></div></div></div></div></body></html>"#
        )
    }
}
