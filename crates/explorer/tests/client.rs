use explorer::{
    AthleteListing, CompetitionFilter, CompetitionListing, ExplorerError, PagedSearchController,
    ResultsClient, SearchSettings, SearchSource, SearchStatus,
};
use chrono::NaiveDate;
use serde_json::json;
use standings::dto::{PaginationParams, SearchHit};
use standings::{AttemptOrdinal, BestAttempt};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lift_row(reference_id: &str) -> serde_json::Value {
    json!({
        "reference_id": reference_id,
        "athlete": "a1",
        "athlete_name": "Jane Doe",
        "competition": "c1",
        "competition_name": "State Open",
        "competition_date_start": "2022-05-07",
        "snatch_first": "LIFT", "snatch_first_weight": 100,
        "snatch_second": "NOLIFT", "snatch_second_weight": 105,
        "snatch_third": "DNA", "snatch_third_weight": 0,
        "cnj_first": "LIFT", "cnj_first_weight": 120,
        "cnj_second": "LIFT", "cnj_second_weight": 125,
        "cnj_third": "NOLIFT", "cnj_third_weight": 130,
        "best_snatch_weight": ["1st", 100],
        "best_cnj_weight": ["2nd", 125],
        "total_lifted": 225,
        "weight_category": "W76",
        "age_categories": {"is_senior": true}
    })
}

fn search_page(next: Option<&str>, results: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "count": 3,
        "next": next,
        "previous": null,
        "per_page": 2,
        "results": results
    })
}

fn athlete_hit(reference_id: &str, name: &str) -> serde_json::Value {
    json!({
        "query_result_type": "Athlete",
        "query_result": {"reference_id": reference_id, "full_name": name},
        "query_result_headline": format!("<b>{}</b>", name),
        "query_result_headline_no_html": name
    })
}

async fn client_for(server: &MockServer) -> Arc<ResultsClient> {
    Arc::new(ResultsClient::new(server.uri()).unwrap())
}

#[tokio::test]
async fn test_search_decodes_typed_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "jane"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            Some("http://api/search?q=jane&page=2"),
            vec![
                athlete_hit("a1", "Jane Doe"),
                json!({
                    "query_result_type": "Lift",
                    "query_result": lift_row("l1"),
                    "query_result_headline": "<b>Jane</b> Doe",
                    "query_result_headline_no_html": "Jane Doe"
                }),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.search("jane", PaginationParams::new(1, 2)).await.unwrap();

    assert!(response.has_next());
    assert_eq!(response.results.len(), 2);
    match &response.results[1].hit {
        SearchHit::Lift(lift) => {
            assert_eq!(lift.best_cnj, BestAttempt::at(AttemptOrdinal::Second, 125));
            assert_eq!(lift.total_lifted, 225);
        }
        other => panic!("expected a lift, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/athletes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.athlete("missing").await.unwrap_err();

    assert!(matches!(err, ExplorerError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_oversized_page_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(None, vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .search("jane", PaginationParams::new(1, 500))
        .await
        .unwrap_err();

    assert!(matches!(err, ExplorerError::InvalidPage(_)));
}

#[tokio::test]
async fn test_invalid_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.competition("c1").await.unwrap_err();

    assert!(matches!(err, ExplorerError::ParseError(_)));
}

#[tokio::test]
async fn test_competition_detail_with_a_malformed_row() {
    let server = MockServer::start().await;
    let mut broken = lift_row("l2");
    broken["cnj_second"] = json!("???");
    Mock::given(method("GET"))
        .and(path("/competitions/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reference_id": "c1",
            "name": "State Open",
            "date_start": "2022-05-07",
            "date_end": "2022-05-07",
            "location": "Brisbane",
            "lifts_count": 3,
            "lift_set": [lift_row("l1"), broken, 42]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detail = client.competition("c1").await.unwrap();

    assert_eq!(detail.lift_set.len(), 2);
    assert_eq!(detail.lift_set[0].total_lifted, 225);
    assert!(detail.lift_set[1].best_cnj.is_none());
    assert_eq!(detail.lift_set[1].total_lifted, 0);
}

#[tokio::test]
async fn test_competition_listing_sends_date_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions"))
        .and(query_param("search", "open"))
        .and(query_param("date_start_after", "2022-01-01"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1, "next": null, "previous": null, "per_page": 10,
            "results": [{"reference_id": "c1", "name": "State Open", "lifts_count": 40}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let window = CompetitionFilter {
        date_start_after: NaiveDate::from_ymd_opt(2022, 1, 1),
        ..Default::default()
    };
    let controller = PagedSearchController::new(
        CompetitionListing::new(client, 10).with_window(window),
        SearchSettings::with_debounce(Duration::from_millis(10)),
    );

    controller.on_query_change("open");
    let state = controller.settled().await;

    assert_eq!(state.status, SearchStatus::Settled);
    assert_eq!(state.items[0].name, "State Open");
    assert!(!state.has_more);
}

#[tokio::test]
async fn test_controller_pages_through_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            Some("http://api/search?page=2"),
            vec![athlete_hit("a1", "Jane Doe"), athlete_hit("a2", "Jane Roe")],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            None,
            vec![athlete_hit("a3", "Janet Poe")],
        )))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let controller = PagedSearchController::new(
        SearchSource::new(client, 2),
        SearchSettings::with_debounce(Duration::from_millis(10)),
    );

    controller.on_query_change("jane");
    let first = controller.settled().await;
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more);

    assert!(controller.on_intersect());
    let second = controller.settled().await;
    assert_eq!(second.items.len(), 3);
    assert!(!second.has_more);
    assert!(!controller.on_intersect());
}

#[tokio::test]
async fn test_server_error_leaves_controller_errored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/athletes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let controller = PagedSearchController::new(
        AthleteListing::new(client, 10),
        SearchSettings::with_debounce(Duration::from_millis(10)).browse_when_empty(),
    );

    controller.on_query_change("");
    let state = controller.settled().await;

    assert!(state.is_error());
    assert!(state.items.is_empty());
}
