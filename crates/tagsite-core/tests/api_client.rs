//! End-to-end client tests against a local stub server

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use tagsite_core::model::DeleteAllReport;
use tagsite_core::{ApiClient, ApiError, Catalogue, GameRecord, Platform, SearchQuery, Tag};
use tiny_http::{Header, Response, Server};

#[derive(Debug)]
struct Captured {
    method: String,
    url: String,
    body: String,
}

/// Serve canned `(status, body)` replies in order, one per request, and
/// report every request received.
fn stub(replies: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in replies {
            let Ok(mut request) = server.recv() else {
                return;
            };
            let mut content = String::new();
            let _ = request.as_reader().read_to_string(&mut content);
            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: content,
            });
            let header = "Content-Type: application/json".parse::<Header>().unwrap();
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (format!("http://{addr}"), rx)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, None).unwrap()
}

#[tokio::test]
async fn test_list_tags_and_upsert() {
    let (base, rx) = stub(vec![
        (200, r#"[{"tag_jp":"新作","tag_kr":"신작","priority":10},{"tag_jp":"旧作","tag_kr":null}]"#),
        (200, r#"{"ok":true}"#),
    ]);
    let api = client(&base);

    let tags = api.list_tags().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0], Tag::new("新作", "신작", Some(10)));
    assert_eq!(tags[1].tag_kr, "");
    assert_eq!(tags[1].priority, None);

    api.upsert_tag(&Tag::new("新作", "새작품", None)).await.unwrap();

    let list = rx.recv().unwrap();
    assert_eq!(list.method, "GET");
    assert_eq!(list.url, "/tags/");

    let upsert = rx.recv().unwrap();
    assert_eq!(upsert.method, "POST");
    assert_eq!(upsert.url, "/tags/");
    let body: serde_json::Value = serde_json::from_str(&upsert.body).unwrap();
    assert_eq!(body["tag_jp"], "新作");
    assert_eq!(body["tag_kr"], "새작품");
    assert!(body["priority"].is_null());
}

#[tokio::test]
async fn test_sync_and_purge_reports() {
    let (base, rx) = stub(vec![(200, r#"{"updated":12}"#), (200, r#"{"deleted":3}"#)]);
    let api = client(&base);

    assert_eq!(api.sync_tags().await.unwrap().updated, 12);
    assert_eq!(api.purge_slash_tags().await.unwrap().deleted, 3);

    assert_eq!(rx.recv().unwrap().url, "/tags/sync-tags");
    assert_eq!(rx.recv().unwrap().url, "/tags/delete-slash");
}

#[tokio::test]
async fn test_list_games_uses_catalogue_prefix() {
    let (base, rx) = stub(vec![
        (200, r#"[{"rj_code":"RJ01","title_kr":"게임","maker":"서클","price":"1,100"}]"#),
        (200, r#"[]"#),
    ]);
    let api = client(&base);
    let rj = Platform::new("rj");

    let games = api.list_games(Catalogue::Storage, &rj).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].code_str(), "RJ01");
    assert_eq!(games[0].display_title(), "게임");

    let games = api
        .list_games(Catalogue::Document, &Platform::new("steam"))
        .await
        .unwrap();
    assert!(games.is_empty());

    assert_eq!(rx.recv().unwrap().url, "/games/rj");
    assert_eq!(rx.recv().unwrap().url, "/games-fs/steam");
}

#[tokio::test]
async fn test_get_game_not_found_is_none() {
    let (base, rx) = stub(vec![
        (404, r#"{"error":"missing"}"#),
        (200, r#"{"title":"제목","circle":"서클","price":500,"tags":["a","b"]}"#),
        (500, r#"{"error":"boom"}"#),
    ]);
    let api = client(&base);
    let rj = Platform::new("rj");

    assert_eq!(api.get_game(Catalogue::Document, &rj, "RJ9").await.unwrap(), None);

    let game = api
        .get_game(Catalogue::Document, &rj, "RJ1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(game.title, "제목");
    assert_eq!(game.price, 500);
    assert_eq!(game.tags, vec!["a", "b"]);

    let err = api.get_game(Catalogue::Document, &rj, "RJ2").await.unwrap_err();
    assert!(matches!(err, ApiError::Status(500)));

    assert_eq!(rx.recv().unwrap().url, "/games-fs/rj/RJ9");
}

#[tokio::test]
async fn test_save_preserves_unknown_fields() {
    let (base, rx) = stub(vec![(200, r#"{"ok":true}"#)]);
    let api = client(&base);

    let mut game: GameRecord =
        serde_json::from_str(r#"{"title":"old","rating":4.5,"tags":["x"]}"#).unwrap();
    game.title = "new".to_string();
    api.save_game(Catalogue::Storage, &Platform::new("rj"), "RJ5", &game)
        .await
        .unwrap();

    let captured = rx.recv().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/games/rj/RJ5");
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["title"], "new");
    assert_eq!(body["rating"], 4.5);
    assert_eq!(body["tags"][0], "x");
}

#[tokio::test]
async fn test_delete_one_and_all() {
    let (base, rx) = stub(vec![
        (200, r#"{"ok":true}"#),
        (200, r#"{"message":"Deleted 4 games"}"#),
        (404, r#"{}"#),
    ]);
    let api = client(&base);
    let rj = Platform::new("rj");

    api.delete_game(Catalogue::Document, &rj, "RJ1").await.unwrap();
    let report = api.delete_all_games(Catalogue::Document, &rj).await.unwrap();
    assert_eq!(
        report,
        DeleteAllReport {
            message: "Deleted 4 games".to_string()
        }
    );
    assert!(api
        .delete_game(Catalogue::Document, &rj, "RJ1")
        .await
        .unwrap_err()
        .is_not_found());

    let first = rx.recv().unwrap();
    assert_eq!((first.method.as_str(), first.url.as_str()), ("DELETE", "/games-fs/rj/RJ1"));
    let second = rx.recv().unwrap();
    assert_eq!((second.method.as_str(), second.url.as_str()), ("DELETE", "/games-fs/rj"));
}

#[tokio::test]
async fn test_search_and_stats_query_strings() {
    let (base, rx) = stub(vec![
        (200, r#"[{"rj_code":"RJ7","title_kr":"검색","tags":["a"]}]"#),
        (200, r#"[]"#),
        (200, r#"{"total_games":2,"unique_tags":1,"tag_stats":[{"tag":"a","count":2}]}"#),
    ]);
    let api = client(&base);
    let rj = Platform::new("rj");

    let found = api
        .search_games(Catalogue::Document, &rj, &SearchQuery::Title("검 색".to_string()))
        .await
        .unwrap();
    assert_eq!(found[0].code_str(), "RJ7");

    api.search_games(Catalogue::Document, &rj, &SearchQuery::Tag("a&b".to_string()))
        .await
        .unwrap();

    let stats = api.tag_stats(Catalogue::Document, &rj).await.unwrap();
    assert_eq!(stats.total_games, 2);
    assert_eq!(stats.tag_stats[0].count, 2);

    let title = rx.recv().unwrap();
    assert!(title.url.starts_with("/games-fs/search?platform=rj&query="));
    let tag = rx.recv().unwrap();
    assert_eq!(tag.url, "/games-fs/search?platform=rj&tag=a%26b");
    assert_eq!(rx.recv().unwrap().url, "/games-fs/tag-stats?platform=rj");
}

#[tokio::test]
async fn test_storage_catalogue_rejects_document_only_calls() {
    let api = client("http://127.0.0.1:9");
    let rj = Platform::new("rj");

    let err = api.tag_stats(Catalogue::Storage, &rj).await.unwrap_err();
    assert!(matches!(err, ApiError::Unsupported { .. }));

    let err = api
        .search_games(Catalogue::Storage, &rj, &SearchQuery::Tag("a".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unsupported { .. }));
}

#[tokio::test]
async fn test_decode_failure_is_classified() {
    let (base, _rx) = stub(vec![(200, "not json")]);
    let err = client(&base).list_tags().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
