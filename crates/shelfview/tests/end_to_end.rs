//! End-to-end fetch cycles against a mock catalog API.

use std::time::Duration;

use scraper::{Html, Selector};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfview::{
    Controller, FetchOutcome, Grid, GridMessage, HttpCatalog, Labels, MemoryView, QueryState,
};

const ENDPOINT: &str = "/api/app/books";

// ─────────────────────── helpers ───────────────────────

async fn controller_for(server: &MockServer) -> Controller<HttpCatalog, MemoryView> {
    let base = format!("{}{ENDPOINT}", server.uri());
    let source = HttpCatalog::new(&base, Some(5_000)).unwrap();
    Controller::new(source, MemoryView::new(), Labels::default())
}

fn select_text(html: &str, selector: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

fn painted_html(controller: &Controller<HttpCatalog, MemoryView>) -> String {
    let view = controller.view();
    view.grid
        .as_ref()
        .expect("grid painted")
        .to_html(controller.labels())
}

// ─────────────────────── tests ───────────────────────

#[tokio::test]
async fn single_item_renders_one_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "1"))
        .and(query_param("size", "24"))
        .and(query_param("order", "DESC"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": [{"title": "Book A", "price": 15000}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let outcome = controller.fetch_and_render(QueryState::default()).await;
    assert_eq!(outcome, FetchOutcome::Rendered { count: 1, page: 1 });

    let html = painted_html(&controller);
    assert_eq!(select_text(&html, "article.card h3.title"), vec!["Book A"]);
    assert_eq!(select_text(&html, "article.card .price"), vec!["15 000 сум"]);
    assert_eq!(select_text(&html, "article.card .price-old"), vec![""]);

    let view = controller.view();
    assert_eq!(view.status, "1 товаров (стр. 1)");
    assert!(!view.loader_visible);
}

#[tokio::test]
async fn empty_list_shows_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let outcome = controller.fetch_and_render(QueryState::default()).await;
    assert_eq!(outcome, FetchOutcome::Rendered { count: 0, page: 1 });

    let view = controller.view();
    assert_eq!(view.grid, Some(Grid::Message(GridMessage::NotFound)));
    assert!(view.status.starts_with("0 "));
    assert!(!view.loader_visible);
}

#[tokio::test]
async fn server_error_shows_load_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let outcome = controller.fetch_and_render(QueryState::default()).await;
    assert_eq!(outcome, FetchOutcome::Failed);

    let html = painted_html(&controller);
    assert_eq!(select_text(&html, ".grid-message.error"), vec!["Ошибка загрузки"]);

    let view = controller.view();
    assert_eq!(view.status, "Ошибка");
    assert!(!view.loader_visible);
}

#[tokio::test]
async fn malformed_body_is_a_load_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    assert_eq!(
        controller.fetch_and_render(QueryState::default()).await,
        FetchOutcome::Failed
    );
}

#[tokio::test]
async fn envelope_without_list_shows_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    assert_eq!(
        controller.fetch_and_render(QueryState::default()).await,
        FetchOutcome::NoData
    );
    let view = controller.view();
    assert_eq!(view.grid, Some(Grid::Message(GridMessage::NoData)));
    assert_eq!(view.status, "0 товаров");
}

#[tokio::test]
async fn nested_envelope_and_search_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("q", "толстой"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "total": 2,
                "items": [
                    {"name": "Анна Каренина", "currentPrice": "32000", "oldPrice": 40000, "rating": 4},
                    {"bookTitle": "Война и мир", "images": ["https://cdn.example/wp.jpg"]}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let mut state = QueryState::default();
    state.set_query("  толстой ");
    state.next_page();
    let outcome = controller.fetch_and_render(state).await;
    assert_eq!(outcome, FetchOutcome::Rendered { count: 2, page: 2 });

    let html = painted_html(&controller);
    assert_eq!(
        select_text(&html, "h3.title"),
        vec!["Анна Каренина", "Война и мир"]
    );
    assert_eq!(select_text(&html, ".price"), vec!["32 000 сум", "—"]);
    assert_eq!(select_text(&html, ".price-old"), vec!["40 000 сум", ""]);
    assert_eq!(select_text(&html, ".stars"), vec!["★★★★☆", "★★★★★"]);

    let fragment = Html::parse_fragment(&html);
    let img = Selector::parse(".thumb img").unwrap();
    let srcs: Vec<_> = fragment
        .select(&img)
        .filter_map(|el| el.value().attr("src"))
        .collect();
    assert_eq!(srcs, vec!["https://cdn.example/wp.jpg"]);
}

#[tokio::test]
async fn latest_request_wins_over_slower_earlier_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"title": "Stale"}]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "Fresh"}])))
        .mount(&server)
        .await;

    let controller = controller_for(&server).await;
    let first = QueryState::default();
    let mut second = QueryState::default();
    second.next_page();

    let (slow, fast) = tokio::join!(controller.fetch_and_render(first), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.fetch_and_render(second).await
    });

    assert_eq!(slow, FetchOutcome::Superseded);
    assert_eq!(fast, FetchOutcome::Rendered { count: 1, page: 2 });

    let view = controller.view();
    let titles: Vec<_> = view
        .grid
        .as_ref()
        .unwrap()
        .cards()
        .iter()
        .map(|c| c.title.clone())
        .collect();
    assert_eq!(titles, vec!["Fresh"]);
    assert_eq!(view.status, "1 товаров (стр. 2)");
    assert!(!view.loader_visible);
}
