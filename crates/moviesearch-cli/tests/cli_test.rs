#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::Command;
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the user's config and environment.
fn isolated_cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("MOVIESEARCH_TMDB_API_KEY")
        .env_remove("MOVIESEARCH_TMDB_BASE_URL")
        .env_remove("MOVIESEARCH_TMDB_IMAGE_BASE_URL")
        .env_remove("MOVIESEARCH_CONFIG_DIR")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env("RUST_LOG", "info");
    cmd
}

/// Command pointed at a mock TMDB server.
fn mock_cmd(dir: &tempfile::TempDir, server: &MockServer) -> Command {
    let mut cmd = isolated_cmd(dir);
    cmd.env("MOVIESEARCH_TMDB_API_KEY", "test-key")
        .env("MOVIESEARCH_TMDB_BASE_URL", format!("{}/3", server.uri()));
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("popular"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_popular_rejects_page_zero() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["popular", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn test_missing_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .arg("popular")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MOVIESEARCH_TMDB_API_KEY"));
}

#[test]
fn test_blank_query_fails_without_request() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search query must not be empty"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviesearch");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moviesearch"));
}

#[tokio::test]
async fn test_popular_prints_movies_from_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/popular_movies.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = mock_cmd(&dir, &server);

    // Act & Assert
    tokio::task::spawn_blocking(move || {
        cmd.arg("popular")
            .assert()
            .success()
            .stdout(predicate::str::contains("Fight Club"))
            .stdout(predicate::str::contains("8.4"))
            .stdout(predicate::str::contains("26280 votes"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_detail_not_found_reports_empty_state() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#,
        ))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = mock_cmd(&dir, &server);

    // Act & Assert
    tokio::task::spawn_blocking(move || {
        cmd.args(["detail", "--id", "999999"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Movie not found"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_detail_server_error_fails() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = mock_cmd(&dir, &server);

    // Act & Assert
    tokio::task::spawn_blocking(move || {
        cmd.args(["detail", "--id", "550"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load movie details"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_config_file_supplies_api_key() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("api_key", "file-key"))
        .and(query_param("query", "Fight Club"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/search_movie_fight_club.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[tmdb]\napi_key = \"file-key\"\nbase_url = \"{}/3/\"\n",
            server.uri()
        ),
    )
    .unwrap();
    let mut cmd = isolated_cmd(&dir);

    // Act & Assert
    tokio::task::spawn_blocking(move || {
        cmd.args(["search", "--query", "Fight Club"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Search Results (2)"));
    })
    .await
    .unwrap();
}
