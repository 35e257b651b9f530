//! End-to-end analysis against a mocked platform.

mod helpers;

use httptest::{all_of, cycle, matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;

use follow_audit::app::{ResultSink, TextFileSink};
use follow_audit::{run_analysis, Analyzer, CollectionFault, EdgeKind, ScrapeError, SessionToken};

use helpers::{edge_page, profile_page, test_config, FOLLOWERS_HASH, FOLLOWING_HASH};

fn expect_alice(server: &Server, runs: usize) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/alice/"))
            .times(runs)
            .respond_with(status_code(200).body(profile_page("alice", "123"))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWERS_HASH)))),
            request::query(url_decoded(contains(("variables", matches(r#""id":"123""#))))),
            request::headers(contains(("cookie", "sessionid=e2e-session"))),
        ])
        .times(2 * runs)
        .respond_with(cycle![
            json_encoded(edge_page("edge_followed_by", &["alice1", "alice2"], true, "X")),
            json_encoded(edge_page("edge_followed_by", &["alice3"], false, "")),
        ]),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWING_HASH)))),
        ])
        .times(runs)
        .respond_with(json_encoded(edge_page(
            "edge_follow",
            &["alice2", "alice4"],
            false,
            "",
        ))),
    );
}

#[tokio::test]
async fn test_alice_scenario() {
    let server = Server::run();
    expect_alice(&server, 1);
    let config = test_config(&server);

    let report = run_analysis(&config, SessionToken::new("e2e-session").unwrap(), "alice")
        .await
        .unwrap();

    assert_eq!(report.user_id, "123");
    assert_eq!(report.followers_count, 3);
    assert_eq!(report.following_count, 2);
    assert_eq!(report.mutual_count(), 1);
    assert_eq!(report.sorted_non_followers(), vec!["alice4"]);
    assert!(report.is_complete());

    let dir = TempDir::new().unwrap();
    let sink = TextFileSink::new(dir.path().join("non_followers.txt"));
    sink.write_report(&report.sorted_non_followers()).unwrap();
    let content = std::fs::read_to_string(sink.path()).unwrap();
    let names: Vec<&str> = content.lines().skip(2).collect();
    assert_eq!(names, vec!["alice4"]);
}

#[tokio::test]
async fn test_analysis_is_idempotent() {
    let server = Server::run();
    expect_alice(&server, 2);
    let config = test_config(&server);
    let analyzer = Analyzer::new(&config, SessionToken::new("e2e-session").unwrap()).unwrap();

    let first = analyzer.analyze("alice").await.unwrap();
    let second = analyzer.analyze("alice").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(analyzer.request_stats().total(), 6);
}

#[tokio::test]
async fn test_rate_limited_page_still_completes() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/bob/"))
            .respond_with(status_code(200).body(profile_page("bob", "42"))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWERS_HASH)))),
        ])
        .times(4)
        .respond_with(cycle![
            status_code(429),
            status_code(429),
            status_code(429),
            json_encoded(edge_page("edge_followed_by", &["x"], false, "")),
        ]),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWING_HASH)))),
        ])
        .respond_with(json_encoded(edge_page("edge_follow", &["x", "y"], false, ""))),
    );

    let config = test_config(&server);
    let report = run_analysis(&config, SessionToken::new("s").unwrap(), "bob")
        .await
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.sorted_non_followers(), vec!["y"]);
}

#[tokio::test]
async fn test_partial_followers_are_reported() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/carol/"))
            .respond_with(status_code(200).body(profile_page("carol", "7"))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWERS_HASH)))),
        ])
        .times(2)
        .respond_with(cycle![
            json_encoded(edge_page("edge_followed_by", &["a"], true, "next")),
            status_code(200).body("{\"data\":{\"user\":null}}"),
        ]),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/graphql/query/"),
            request::query(url_decoded(contains(("query_hash", FOLLOWING_HASH)))),
        ])
        .respond_with(json_encoded(edge_page("edge_follow", &["a", "b"], false, ""))),
    );

    let config = test_config(&server);
    let report = run_analysis(&config, SessionToken::new("s").unwrap(), "carol")
        .await
        .unwrap();
    assert_eq!(
        report.incomplete,
        vec![(EdgeKind::Followers, CollectionFault::MissingUser)]
    );
    assert_eq!(report.sorted_non_followers(), vec!["b"]);
}

#[tokio::test]
async fn test_unresolved_user_aborts_before_pagination() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/dave/"))
            .respond_with(status_code(200).body("<html><body>Page not found</body></html>")),
    );

    let config = test_config(&server);
    let result = run_analysis(&config, SessionToken::new("s").unwrap(), "dave").await;
    assert!(matches!(result, Err(ScrapeError::UserNotResolved { .. })));
}

#[tokio::test]
async fn test_empty_pool_is_rejected_before_network() {
    let server = Server::run();
    let mut config = test_config(&server);
    config.user_agents = vec![" ".to_string()];

    let result = run_analysis(&config, SessionToken::new("s").unwrap(), "alice").await;
    assert!(matches!(result, Err(ScrapeError::Configuration(_))));
}
