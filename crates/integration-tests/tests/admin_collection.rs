//! Admin collection view over the real HTTP client.

use mymovielist_client::api::AdminApi;
use mymovielist_client::views::admin::{ADD_FAILED, Applied, DELETE_FAILED, MOVIE_ADDED};
use mymovielist_client::views::{Notice, Outcome};
use mymovielist_core::{MovieField, MovieId};
use mymovielist_integration_tests::{
    TestBackend, admin_user, error, movie_json, ok, regular_user,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn page(movies: Vec<Value>, current: u32, total_pages: u32, total: u32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "movies": movies,
        "total_pages": total_pages,
        "current_page": current,
        "total_movies": total
    }))
}

async fn admin_backend() -> TestBackend {
    let backend = TestBackend::start().await;
    backend.me(Some(admin_user())).await;
    backend
}

async fn list(backend: &TestBackend, page_no: &str, query: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/admin/movies"))
        .and(query_param("page", page_no))
        .and(query_param("query", query))
        .respond_with(response)
        .mount(&backend.server)
        .await;
}

// =============================================================================
// Access
// =============================================================================

#[tokio::test]
async fn test_non_admin_mount_fetches_nothing() {
    let backend = TestBackend::start().await;
    backend.me(Some(regular_user("ana"))).await;
    let app = backend.app();

    let mut view = app.admin_view();
    assert_eq!(
        view.mount(app.auth()).await,
        Outcome::Redirect(mymovielist_client::routes::Route::default())
    );
    assert_eq!(backend.hits("/api/admin/movies").await, 0);
}

#[tokio::test]
async fn test_backend_denial_degrades_to_empty() {
    let backend = admin_backend().await;
    list(&backend, "1", "", error(403, "Access denied")).await;
    let app = backend.app();

    let mut view = app.admin_view();
    assert_eq!(view.mount(app.auth()).await, Outcome::Done);
    assert!(view.load_failed());
    assert!(view.items().is_empty());
}

// =============================================================================
// Paging and Filtering
// =============================================================================

#[tokio::test]
async fn test_filtered_second_page() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![movie_json(1, "Alien")], 1, 48, 141)).await;
    list(
        &backend,
        "1",
        "dune",
        page(vec![movie_json(10, "Dune"), movie_json(11, "Dune: Part Two")], 1, 5, 13),
    )
    .await;
    list(
        &backend,
        "2",
        "dune",
        page(
            vec![
                movie_json(12, "Dune (1984)"),
                movie_json(13, "Dune (2000)"),
                movie_json(14, "Children of Dune"),
            ],
            2,
            5,
            13,
        ),
    )
    .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;
    assert_eq!(view.total_pages(), 48);
    assert_eq!(view.total_movies(), Some(141));

    view.set_filter("dune").await;
    assert_eq!(view.page(), 1);
    assert_eq!(view.total_pages(), 5);

    assert_eq!(view.next_page().await, Outcome::Done);
    assert_eq!(view.page(), 2);
    assert_eq!(view.page_input(), "2");
    let titles: Vec<&str> = view.items().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["Dune (1984)", "Dune (2000)", "Children of Dune"]);
    assert_eq!(view.total_pages(), 5);
    assert!(view.can_prev());
    assert!(view.can_next());
}

#[tokio::test]
async fn test_out_of_order_responses_apply_latest() {
    let backend = admin_backend().await;
    list(
        &backend,
        "1",
        "",
        page(vec![movie_json(1, "Slow")], 1, 2, 2).set_delay(std::time::Duration::from_millis(200)),
    )
    .await;
    list(&backend, "1", "fast", page(vec![movie_json(2, "Fast")], 1, 1, 1)).await;

    let api = backend.http();
    let mut view = mymovielist_client::views::AdminMoviesView::new(api.clone());

    let slow = view.begin_fetch();
    view.set_filter_query(" fast ");
    let fast = view.begin_fetch();
    assert_eq!(slow.query(), "");
    assert_eq!((fast.page(), fast.query()), (1, "fast"));

    let (slow, fast) = tokio::join!(slow.send(&api), fast.send(&api));
    assert_eq!(view.apply(fast), Applied::Current);
    assert_eq!(view.apply(slow), Applied::Stale);
    assert_eq!(view.filter_query(), "fast");
    assert_eq!(view.items().first().map(|m| m.title.as_str()), Some("Fast"));
}

#[tokio::test]
async fn test_shrunken_collection_clamps_page() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![movie_json(1, "A")], 1, 3, 7)).await;
    list(&backend, "3", "", page(vec![], 3, 2, 6)).await;
    list(&backend, "2", "", page(vec![movie_json(4, "D")], 2, 2, 6)).await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;
    view.set_page_input("3");
    assert_eq!(view.submit_page_input().await, Outcome::Done);

    assert_eq!(view.page(), 2);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.items().len(), 1);
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_sends_draft_and_refetches() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![], 1, 0, 0)).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movie"))
        .and(body_partial_json(json!({
            "title": "Arrival",
            "releaseDate": "2016-11-11",
            "runtime": 116
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;
    assert_eq!(view.total_pages(), 1);

    view.new_field(MovieField::Title, "Arrival");
    view.new_field(MovieField::ReleaseDate, "Fri, 11 Nov 2016 00:00:00 GMT");
    view.new_field(MovieField::Runtime, "116");
    assert_eq!(view.create().await, Outcome::Done);
    assert_eq!(view.take_notice(), Some(Notice::Success(MOVIE_ADDED.to_string())));
    assert!(view.creation().is_blank());
    assert_eq!(backend.hits("/api/admin/movies").await, 2);
}

#[tokio::test]
async fn test_create_failure_keeps_buffer() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![], 1, 1, 0)).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/movie"))
        .respond_with(error(400, "Title is required"))
        .mount(&backend.server)
        .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;
    view.new_field(MovieField::Title, "Arrival");

    assert_eq!(view.create().await, Outcome::Failed(ADD_FAILED.to_string()));
    assert_eq!(view.creation().title, "Arrival");
}

#[tokio::test]
async fn test_update_sends_full_record_with_normalised_date() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![movie_json(7, "Dune")], 1, 1, 1)).await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/movie/7"))
        .and(body_partial_json(json!({
            "title": "Dune",
            "tagline": "Beyond fear, destiny awaits.",
            "releaseDate": "2021-10-22",
            "voteAverage": 7.8,
            "voteCount": 1200
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;

    assert_eq!(view.start_edit(MovieId::new(7)), Outcome::Done);
    view.edit_field(MovieField::Tagline, "Beyond fear, destiny awaits.");
    assert_eq!(view.save_edit().await, Outcome::Done);
    assert!(view.editing().is_none());
}

#[tokio::test]
async fn test_delete_declined_then_failed() {
    let backend = admin_backend().await;
    list(&backend, "1", "", page(vec![movie_json(7, "Dune")], 1, 1, 1)).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movie/7"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;

    assert_eq!(view.delete(MovieId::new(7), &mut false).await, Outcome::Declined);
    assert_eq!(
        view.delete(MovieId::new(7), &mut true).await,
        Outcome::Failed(DELETE_FAILED.to_string())
    );
    assert_eq!(view.items().len(), 1);
    assert!(view.take_notice().is_some_and(|n| n.is_error()));
}

#[tokio::test]
async fn test_empty_success_reply_is_acknowledged() {
    let backend = admin_backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movie/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let result = backend.http().delete_movie(MovieId::new(7)).await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn test_delete_with_no_content_refetches() {
    let backend = admin_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/movies"))
        .respond_with(page(vec![movie_json(7, "Dune")], 1, 1, 1))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    list(&backend, "1", "", page(vec![], 1, 1, 0)).await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/movie/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&backend.server)
        .await;

    let app = backend.app();
    let mut view = app.admin_view();
    view.mount(app.auth()).await;
    assert_eq!(view.items().len(), 1);

    assert_eq!(view.delete(MovieId::new(7), &mut true).await, Outcome::Done);
    assert!(view.items().is_empty());
    assert!(view.take_notice().is_none());
    assert_eq!(backend.hits("/api/admin/movies").await, 2);
}
