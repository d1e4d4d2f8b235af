mod common;

use axum::http::StatusCode;
use common::{body_json, insert_user, test_pool, TestApp};
use einesteine::store::{self, IdeaUpdate};

#[tokio::test]
async fn export_returns_json_with_ideas() {
    let app = TestApp::new().await;
    let (user_id, cookie) = app.user_session("ada").await;

    let idea = store::create_idea(&app.db, &user_id).await.unwrap();
    store::update_idea(
        &app.db,
        &idea.id,
        &user_id,
        IdeaUpdate {
            name: "Export Test",
            post_text: Some("a note"),
            post_time: Some("03.11.2021 14:05"),
            complete: None,
        },
    )
    .await
    .unwrap();
    let tag = store::add_tag(&app.db, &user_id, "rust").await.unwrap().unwrap();
    store::link_tag(&app.db, &idea.id, &tag.id, &user_id).await.unwrap();

    let resp = app.get("/export", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_disposition.starts_with("attachment; filename="));
    assert!(content_disposition.contains("einesteine-export-"));

    let json = body_json(resp).await;
    assert!(json["exported_at"].is_string());
    assert_eq!(json["username"], "ada");
    assert_eq!(json["ideas"].as_array().unwrap().len(), 1);
    assert_eq!(json["ideas"][0]["name"], "Export Test");
    assert_eq!(json["ideas"][0]["number"], 1);
    assert_eq!(json["ideas"][0]["tags"][0], "rust");
    assert_eq!(json["ideas"][0]["posts"][0]["body"], "a note");
}

#[tokio::test]
async fn export_unauthenticated_redirects() {
    let app = TestApp::new().await;
    let resp = app.get("/export", None).await;
    common::assert_redirect(&resp, "/login");
}

#[tokio::test]
async fn import_restores_an_export() {
    let db = test_pool().await;
    let owner = insert_user(&db, "ada").await;
    store::create_idea(&db, &owner).await.unwrap();
    let existing = store::add_tag(&db, &owner, "work").await.unwrap().unwrap();

    let export = serde_json::json!({
        "exported_at": "2022-01-01T00:00:00+00:00",
        "username": "someone",
        "ideas": [
            {
                "id": "ignored",
                "name": "Imported",
                "number": 40,
                "complete": true,
                "created_at": "2021-11-03T14:05:00+00:00",
                "tags": ["work", "new"],
                "posts": [{ "body": "old note", "created_at": "2021-11-04T08:00:00+00:00" }]
            },
            { "name": "" }
        ]
    });
    let path = std::env::temp_dir().join(format!("einesteine-import-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, export.to_string()).unwrap();

    einesteine::cli::import_data(&db, path.to_str().unwrap(), "ada")
        .await
        .unwrap();
    std::fs::remove_file(&path).ok();

    let ideas = store::ideas_for_user(&db, &owner).await.unwrap();
    let numbers: Vec<i64> = ideas.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(ideas[1].name, "Imported");
    assert!(ideas[1].complete);
    assert_eq!(ideas[2].name, "Untitled");

    let tags = store::tags_for_idea(&db, &ideas[1].id).await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["new", "work"]);
    assert!(tags.iter().any(|t| t.id == existing.id));

    let posts = store::posts_for_idea(&db, &ideas[1].id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].created_time(), "04.11.2021 08:00");
}

#[tokio::test]
async fn import_for_unknown_user_fails() {
    let db = test_pool().await;
    let result = einesteine::cli::import_data(&db, "/does/not/matter.json", "ghost").await;
    assert!(result.is_err());
}
