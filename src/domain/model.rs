use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order of every tabular export.
pub const HOUSE_COLUMNS: [&str; 6] = ["name", "size", "rent", "status", "city", "server"];

/// Ordered key/value pairs of an `application/x-www-form-urlencoded` body.
pub type FormPayload = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub name: String,
    pub size: String,
    pub rent: String,
    pub status: String,
    pub city: String,
    pub server: String,
}

/// One URL to fetch, with a form body when it should be POSTed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    url: String,
    form: Option<FormPayload>,
}

impl RequestTarget {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            form: None,
        }
    }

    pub fn post_form(url: impl Into<String>, form: FormPayload) -> Self {
        Self {
            url: url.into(),
            form: Some(form),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn form(&self) -> Option<&[(String, String)]> {
        self.form.as_deref()
    }
}

/// A (server, city) pair to query house listings for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    pub server: String,
    pub city: String,
}

impl Combination {
    pub fn new(server: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            city: city.into(),
        }
    }

    /// Full cross product, servers outer and cities inner.
    pub fn cross_product(servers: &[String], cities: &[String]) -> Vec<Combination> {
        servers
            .iter()
            .flat_map(|server| cities.iter().map(move |city| Combination::new(server, city)))
            .collect()
    }

    /// Body of the search form that lists auctioned houses for this pair.
    pub fn to_form(&self) -> FormPayload {
        vec![
            ("world".to_string(), self.server.trim().to_string()),
            ("town".to_string(), self.city.trim().to_string()),
            ("state".to_string(), "auctioned".to_string()),
            ("type".to_string(), "houses".to_string()),
            ("order".to_string(), String::new()),
        ]
    }

    /// Whether a results page header that named `echoed` belongs to this request.
    ///
    /// The header only carries the last word of a multi-word city name, so
    /// "Port Hope" is echoed back as "Hope".
    pub fn matches_echo(&self, echoed: &Combination) -> bool {
        let requested_city = self.city.trim();
        let city_tail = requested_city.rsplit(' ').next().unwrap_or(requested_city);
        self.server.trim() == echoed.server && (requested_city == echoed.city || city_tail == echoed.city)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.city, self.server)
    }
}

/// Cities and servers offered by the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub cities: Vec<String>,
    pub servers: Vec<String>,
}

/// Everything extracted from one per-combination results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HousePage {
    pub city: String,
    pub server: String,
    pub records: Vec<HouseRecord>,
    pub skipped_rows: usize,
}

impl HousePage {
    pub fn echoed(&self) -> Combination {
        Combination::new(&self.server, &self.city)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    pub records: Vec<HouseRecord>,
    pub combinations_requested: usize,
    pub forbidden_combinations: usize,
    pub skipped_rows: usize,
    pub mismatched_combinations: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<HouseRecord>,
    /// Rendered files as (file name, contents).
    pub outputs: Vec<(String, Vec<u8>)>,
}
