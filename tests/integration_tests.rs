use httpmock::prelude::*;
use tempfile::TempDir;
use tibia_houses::{CliConfig, EtlEngine, HousePipeline, LocalStorage, ScrapeError, TomlConfig};

const CATALOG: &str = include_str!("fixtures/catalog.html");
const HOUSES: &str = include_str!("fixtures/houses.html");

fn config_for(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        catalog_url: server.url("/community/"),
        output_path: output_path.to_string(),
        concurrent_requests: 2,
        ..CliConfig::default()
    }
}

async fn run(config: CliConfig) -> Result<String, ScrapeError> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = HousePipeline::new(storage, config)?;
    EtlEngine::new(pipeline).run().await
}

/// Answers 403 for every combination other than Antica/Thais.
async fn mock_forbidden_rest(server: &MockServer) -> Vec<httpmock::Mock<'_>> {
    let mut mocks = Vec::new();
    for (world, town) in [("Antica", "Venore"), ("Secura", "Thais"), ("Secura", "Venore")] {
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/community/")
                    .body_contains(format!("world={}", world))
                    .body_contains(format!("town={}", town));
                then.status(403);
            })
            .await;
        mocks.push(mock);
    }
    mocks
}

async fn mock_catalog(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/community/");
            then.status(200).body(CATALOG);
        })
        .await
}

#[tokio::test]
async fn test_end_to_end_scrape_writes_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    let catalog_mock = mock_catalog(&server).await;
    let thais_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/community/")
                .body_contains("world=Antica")
                .body_contains("town=Thais");
            then.status(200).body(HOUSES);
        })
        .await;
    let forbidden_mocks = mock_forbidden_rest(&server).await;

    let result = run(config_for(&server, &output_path)).await;

    let written = result.unwrap();
    assert!(written.ends_with("houses.csv"));
    catalog_mock.assert_hits_async(1).await;
    thais_mock.assert_hits_async(1).await;
    for mock in &forbidden_mocks {
        mock.assert_hits_async(1).await;
    }

    let csv = std::fs::read_to_string(temp_dir.path().join("houses.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,size,rent,status,city,server");
    assert_eq!(lines[1], "House One,25 sqm,1000 gold,rented by,Thais,Antica");
    assert_eq!(
        lines[2],
        "House Two,35 sqm,1500 gold,auctioned (no bid yet),Thais,Antica"
    );
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn test_single_city_single_server_makes_one_search() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let catalog = CATALOG
        .replace(r#"<option value="Secura">Secura</option>"#, "")
        .replace(
            r#"<label><input type="radio" name="town" value="Venore"> Venore</label>"#,
            "",
        );

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/community/");
            then.status(200).body(catalog);
        })
        .await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/community/");
            then.status(200).body(HOUSES);
        })
        .await;

    run(config_for(&server, &output_path)).await.unwrap();

    search_mock.assert_hits_async(1).await;
    let csv = std::fs::read_to_string(temp_dir.path().join("houses.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_all_forbidden_still_writes_header() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/community/");
            then.status(403);
        })
        .await;

    run(config_for(&server, &output_path)).await.unwrap();

    let csv = std::fs::read_to_string(temp_dir.path().join("houses.csv")).unwrap();
    assert_eq!(csv, "name,size,rent,status,city,server\n");
}

#[tokio::test]
async fn test_server_error_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/community/");
            then.status(500);
        })
        .await;

    let result = run(config_for(&server, &output_path)).await;

    assert!(matches!(
        result,
        Err(ScrapeError::CombinationFetchFailed { status: 500, .. })
    ));
    assert!(!temp_dir.path().join("houses.csv").exists());
}

#[tokio::test]
async fn test_catalog_failure_skips_fan_out() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/community/");
            then.status(503);
        })
        .await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/community/");
            then.status(200).body(HOUSES);
        })
        .await;

    let result = run(config_for(&server, &output_path)).await;

    assert!(matches!(
        result,
        Err(ScrapeError::CatalogUnavailable { status: 503 })
    ));
    search_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/community/");
            then.status(200).body(HOUSES);
        })
        .await;

    // Every combination echoes "Thais of Antica"; that is a counted mismatch, not an error.
    run(config_for(&server, &output_path)).await.unwrap();
    let first = std::fs::read(temp_dir.path().join("houses.csv")).unwrap();

    run(config_for(&server, &output_path)).await.unwrap();
    let second = std::fs::read(temp_dir.path().join("houses.csv")).unwrap();

    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 1 + 4 * 2);
}

#[tokio::test]
async fn test_toml_config_with_multiple_formats() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    mock_catalog(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/community/")
                .body_contains("world=Antica")
                .body_contains("town=Thais");
            then.status(200).body(HOUSES);
        })
        .await;
    mock_forbidden_rest(&server).await;

    let toml_content = format!(
        r#"
[source]
url = "{}"

[extract]
concurrent_requests = 1
fail_on_mismatch = true

[load]
output_path = "{}"
file_stem = "auctions"
output_formats = ["csv", "json"]
"#,
        server.url("/community/"),
        output_path.replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = HousePipeline::new(storage, config).unwrap();
    let written = EtlEngine::new(pipeline).run().await.unwrap();

    assert!(written.contains("auctions.csv"));
    assert!(written.contains("auctions.json"));

    let json = std::fs::read_to_string(temp_dir.path().join("auctions.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "House One");
    assert_eq!(records[1]["server"], "Antica");
}
