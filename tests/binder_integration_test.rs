mod common;

use common::*;
use flight_binder::{BinderError, ParseFailure, Route};
use httpmock::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_end_to_end_binder_in_route_order() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(200).body(CYCLE_PAGE);
    });
    let abc_search = server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("cycle", "2510")
            .query_param("ident", "ABC");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/abc_old.pdf"),
            &server.url("/afd/02oct2025/abc.pdf"),
        ));
    });
    let def_search = server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("cycle", "2510")
            .query_param("ident", "DEF");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/def_old.pdf"),
            &server.url("/afd/02oct2025/def.pdf"),
        ));
    });
    let abc_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/abc.pdf");
        then.status(200)
            .header("Content-Type", "application/pdf")
            .body(sample_pdf(&["ABC"]));
    });
    let def_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/def.pdf");
        then.status(200)
            .header("Content-Type", "application/pdf")
            .body(sample_pdf(&["DEF-1", "DEF-2"]));
    });

    let engine = engine(&server, &workdir);
    let output = engine
        .run("Trip1", &Route::new(["ABC", "DEF"]))
        .await
        .unwrap();

    catalog_mock.assert();
    abc_search.assert();
    def_search.assert();
    abc_doc.assert();
    def_doc.assert();

    let expected = workdir.path().join("Trip1.pdf");
    assert_eq!(output.path, expected);
    assert_eq!(output.documents, 2);
    assert!(workdir.path().join("output").join("abc.pdf").exists());
    assert!(workdir.path().join("output").join("def.pdf").exists());

    let pages = page_contents(&expected);
    assert_eq!(pages.len(), 3);
    assert!(draws(&pages[0], "ABC"));
    assert!(draws(&pages[1], "DEF-1"));
    assert!(draws(&pages[2], "DEF-2"));
}

#[tokio::test]
async fn test_unresolvable_waypoint_aborts_before_downloads() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(200).body(CYCLE_PAGE);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("ident", "ABC");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/abc_old.pdf"),
            &server.url("/afd/02oct2025/abc.pdf"),
        ));
    });
    let zzz_search = server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("ident", "ZZZ");
        then.status(200).body(NO_RESULTS_PAGE);
    });
    let abc_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/abc.pdf");
        then.status(200).body(sample_pdf(&["ABC"]));
    });

    let engine = engine(&server, &workdir);
    let err = engine
        .run("Trip1", &Route::new(["ABC", "ZZZ"]))
        .await
        .unwrap_err();

    zzz_search.assert();
    abc_doc.assert_hits(0);
    match &err {
        BinderError::UnresolvedWaypoint { waypoint } => assert_eq!(waypoint, "ZZZ"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.user_friendly_message().contains("ZZZ"));
    assert!(!workdir.path().join("Trip1.pdf").exists());
    assert!(!workdir.path().join("output").join("abc.pdf").exists());

    assert!(!engine.execute("Trip1", &Route::new(["ABC", "ZZZ"])).await);
}

#[tokio::test]
async fn test_rerun_uses_cached_documents() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(200).body(CYCLE_PAGE);
    });
    let abc_search = server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("ident", "ABC");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/abc_old.pdf"),
            &server.url("/afd/02oct2025/abc.pdf"),
        ));
    });
    let def_search = server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("ident", "DEF");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/def_old.pdf"),
            &server.url("/afd/02oct2025/def.pdf"),
        ));
    });
    let abc_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/abc.pdf");
        then.status(200).body(sample_pdf(&["ABC"]));
    });
    let def_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/def.pdf");
        then.status(200).body(sample_pdf(&["DEF"]));
    });

    let engine = engine(&server, &workdir);
    let route = Route::new(["ABC", "DEF"]);
    let output_path = workdir.path().join("Trip1.pdf");

    assert!(engine.execute("Trip1", &route).await);
    let first = std::fs::read(&output_path).unwrap();

    assert!(engine.execute("Trip1", &route).await);
    let second = std::fs::read(&output_path).unwrap();

    assert_eq!(first, second);
    catalog_mock.assert_hits(2);
    abc_search.assert_hits(2);
    def_search.assert_hits(2);
    abc_doc.assert_hits(1);
    def_doc.assert_hits(1);

    let pages = page_contents(&output_path);
    assert!(draws(&pages[0], "ABC"));
    assert!(draws(&pages[1], "DEF"));
}

#[tokio::test]
async fn test_unreachable_catalog_fails_without_output() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(503).body("Service Unavailable");
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/dafd/search/results/");
        then.status(200).body(NO_RESULTS_PAGE);
    });

    let engine = engine(&server, &workdir);
    let err = engine
        .run("Trip1", &Route::new(["ABC"]))
        .await
        .unwrap_err();

    catalog_mock.assert();
    search_mock.assert_hits(0);
    assert!(matches!(err, BinderError::UpstreamUnavailable { .. }));

    let cache_dir = workdir.path().join("output");
    assert!(cache_dir.is_dir());
    assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
    assert!(!workdir.path().join("Trip1.pdf").exists());
}

#[tokio::test]
async fn test_catalog_without_cycle_list_is_a_parse_error() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(200).body("<html><body>Down for maintenance</body></html>");
    });

    let err = engine(&server, &workdir)
        .run("Trip1", &Route::new(["ABC"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BinderError::Parse(ParseFailure::MissingCycleList)
    ));
}

#[tokio::test]
async fn test_corrupt_cached_document_fails_merge() {
    let workdir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/dafd/search/");
        then.status(200).body(CYCLE_PAGE);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/dafd/search/results/")
            .query_param("ident", "ABC");
        then.status(200).body(results_page(
            &server.url("/afd/07aug2025/abc_old.pdf"),
            &server.url("/afd/02oct2025/abc.pdf"),
        ));
    });
    let abc_doc = server.mock(|when, then| {
        when.method(GET).path("/afd/02oct2025/abc.pdf");
        then.status(200).body(sample_pdf(&["ABC"]));
    });

    let cache_dir = workdir.path().join("output");
    std::fs::create_dir_all(&cache_dir).unwrap();
    std::fs::write(cache_dir.join("abc.pdf"), b"truncated download").unwrap();

    let err = engine(&server, &workdir)
        .run("Trip1", &Route::new(["ABC"]))
        .await
        .unwrap_err();

    abc_doc.assert_hits(0);
    assert!(matches!(err, BinderError::Merge { .. }));
    assert!(!workdir.path().join("Trip1.pdf").exists());
}
