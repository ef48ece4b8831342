//! Integration tests for an author's books
//!
//! Runs against the seeded repository: Stephen King has three books,
//! every other author one.

use axum::http::{StatusCode, header::LOCATION};
use axum_test::TestServer;
use library::server::ServerBuilder;
use serde_json::{Value, json};
use uuid::Uuid;

const BASE: &str = "http://localhost:3000";

fn king() -> Uuid {
    Uuid::from_u128(0x25320c5e_f58a_4b1f_b63a_8ee07a840bdf)
}

fn misery() -> Uuid {
    Uuid::from_u128(0xa3749477_f823_4124_aa4a_fc9ad5e79cd6)
}

fn gaiman() -> Uuid {
    Uuid::from_u128(0x412c3012_d891_4f5e_9613_ff7aa63e6bb3)
}

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_library_resources()
        .build()
        .expect("Failed to build app");
    TestServer::try_new(app).expect("Failed to create test server")
}

fn books_of(author: Uuid) -> String {
    format!("/api/authors/{}/books", author)
}

fn book_of(author: Uuid, book: Uuid) -> String {
    format!("/api/authors/{}/books/{}", author, book)
}

fn rels(links: &Value) -> Vec<&str> {
    links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect()
}

fn error_fields(body: &Value) -> Vec<&str> {
    body["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Reading
// ============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_books_for_author_with_links() {
        let server = create_test_server();

        let response = server.get(&books_of(king())).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let titles: Vec<&str> = body["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["The Shining", "Misery", "It"]);

        assert_eq!(rels(&body["links"]), vec!["self"]);
        assert_eq!(
            body["links"][0]["href"],
            format!("{}/api/authors/{}/books", BASE, king())
        );

        let book = &body["value"][1];
        assert_eq!(book["authorId"], king().to_string());
        assert_eq!(
            rels(&book["links"]),
            vec!["self", "delete_book", "update_book", "partially_update_book"]
        );
        let methods: Vec<&str> = book["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["method"].as_str().unwrap())
            .collect();
        assert_eq!(methods, vec!["GET", "DELETE", "PUT", "PATCH"]);
        assert_eq!(
            book["links"][0]["href"],
            format!("{}/api/authors/{}/books/{}", BASE, king(), misery())
        );
    }

    #[tokio::test]
    async fn test_books_shaped() {
        let server = create_test_server();

        let response = server.get(&format!("{}?fields=title", books_of(king()))).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let mut keys: Vec<&String> = body["value"][0].as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["links", "title"]);
        assert_eq!(
            body["links"][0]["href"],
            format!("{}/api/authors/{}/books?fields=title", BASE, king())
        );
    }

    #[tokio::test]
    async fn test_unknown_book_field_is_rejected() {
        let server = create_test_server();

        let response = server.get(&format!("{}?fields=isbn", books_of(king()))).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_book_for_author() {
        let server = create_test_server();

        let response = server.get(&book_of(king(), misery())).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["title"], "Misery");
        assert_eq!(body["id"], misery().to_string());
    }

    #[tokio::test]
    async fn test_book_of_other_author_is_not_found() {
        let server = create_test_server();

        server
            .get(&book_of(gaiman(), misery()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_author_is_not_found() {
        let server = create_test_server();

        let response = server.get(&books_of(Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["details"]["resource"], "author");
    }
}

// ============================================================================
// Creation and deletion
// ============================================================================

mod create_delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_book() {
        let server = create_test_server();

        let response = server
            .post(&books_of(gaiman()))
            .json(&json!({ "title": "Coraline", "description": "A dark fantasy novella." }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let id = body["id"].as_str().unwrap();
        let location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert_eq!(
            location,
            format!("{}/api/authors/{}/books/{}", BASE, gaiman(), id)
        );
        assert_eq!(body["authorId"], gaiman().to_string());

        let books: Value = server.get(&books_of(gaiman())).await.json();
        assert_eq!(books["value"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_description_must_differ_from_title() {
        let server = create_test_server();

        let response = server
            .post(&books_of(gaiman()))
            .json(&json!({ "title": "Stardust", "description": "Stardust" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(error_fields(&body), vec!["book"]);
        assert_eq!(
            body["details"]["fields"][0]["message"],
            "The provided description should be different from the title."
        );
    }

    #[tokio::test]
    async fn test_missing_title_is_unprocessable() {
        let server = create_test_server();

        let response = server
            .post(&books_of(gaiman()))
            .json(&json!({ "description": "No title here" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(error_fields(&body), vec!["title"]);
    }

    #[tokio::test]
    async fn test_create_book_for_unknown_author() {
        let server = create_test_server();

        server
            .post(&books_of(Uuid::new_v4()))
            .json(&json!({ "title": "Orphan" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_book_without_body() {
        let server = create_test_server();

        server
            .post(&books_of(gaiman()))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let server = create_test_server();

        server
            .delete(&book_of(king(), misery()))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&book_of(king(), misery()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&book_of(king(), misery()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Full update (PUT)
// ============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_put_replaces_existing_book() {
        let server = create_test_server();

        server
            .put(&book_of(king(), misery()))
            .json(&json!({ "title": "Misery (revised)", "description": "Annie returns." }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body: Value = server.get(&book_of(king(), misery())).await.json();
        assert_eq!(body["title"], "Misery (revised)");
        assert_eq!(body["description"], "Annie returns.");
    }

    #[tokio::test]
    async fn test_put_creates_missing_book_at_id() {
        let server = create_test_server();
        let id = Uuid::new_v4();

        let response = server
            .put(&book_of(king(), id))
            .json(&json!({ "title": "Carrie", "description": "King's first novel." }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["id"], id.to_string());
        assert_eq!(
            response.headers().get(LOCATION).unwrap().to_str().unwrap(),
            format!("{}/api/authors/{}/books/{}", BASE, king(), id)
        );

        server.get(&book_of(king(), id)).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_upsert_cannot_take_another_authors_book() {
        let server = create_test_server();

        let response = server
            .put(&book_of(gaiman(), misery()))
            .json(&json!({ "title": "Stolen", "description": "Taken from King." }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "RESOURCE_ALREADY_EXISTS");

        server
            .patch(&book_of(gaiman(), misery()))
            .json(&json!([
                { "op": "add", "path": "/title", "value": "Stolen" },
                { "op": "add", "path": "/description", "value": "Taken from King." }
            ]))
            .await
            .assert_status(StatusCode::CONFLICT);

        let body: Value = server.get(&book_of(king(), misery())).await.json();
        assert_eq!(body["title"], "Misery");
        assert_eq!(body["authorId"], king().to_string());
        server
            .get(&book_of(gaiman(), misery()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_requires_description() {
        let server = create_test_server();

        let response = server
            .put(&book_of(king(), misery()))
            .json(&json!({ "title": "Misery" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(error_fields(&body), vec!["description"]);
    }

    #[tokio::test]
    async fn test_put_applies_description_rule() {
        let server = create_test_server();

        let response = server
            .put(&book_of(king(), misery()))
            .json(&json!({ "title": "Misery", "description": "Misery" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_put_for_unknown_author() {
        let server = create_test_server();

        server
            .put(&book_of(Uuid::new_v4(), misery()))
            .json(&json!({ "title": "Misery", "description": "A thriller." }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Partial update (PATCH)
// ============================================================================

mod patch_tests {
    use super::*;

    #[tokio::test]
    async fn test_patch_replaces_member() {
        let server = create_test_server();

        server
            .patch(&book_of(king(), misery()))
            .json(&json!([
                { "op": "replace", "path": "/title", "value": "Misery, updated" }
            ]))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body: Value = server.get(&book_of(king(), misery())).await.json();
        assert_eq!(body["title"], "Misery, updated");
        assert_eq!(
            body["description"],
            "Misery is a psychological horror thriller novel by Stephen King."
        );
    }

    #[tokio::test]
    async fn test_patch_creates_missing_book() {
        let server = create_test_server();
        let id = Uuid::new_v4();

        let response = server
            .patch(&book_of(king(), id))
            .json(&json!([
                { "op": "add", "path": "/title", "value": "Cujo" },
                { "op": "add", "path": "/description", "value": "A rabid St. Bernard." }
            ]))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["id"], id.to_string());
        assert_eq!(body["title"], "Cujo");
    }

    #[tokio::test]
    async fn test_patched_book_is_validated() {
        let server = create_test_server();

        let response = server
            .patch(&book_of(king(), misery()))
            .json(&json!([
                { "op": "copy", "from": "/title", "path": "/description" }
            ]))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(error_fields(&body), vec!["book"]);

        let response = server
            .patch(&book_of(king(), Uuid::new_v4()))
            .json(&json!([{ "op": "add", "path": "/title", "value": "Christine" }]))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_invalid_patch_documents() {
        let server = create_test_server();

        let failed_test = server
            .patch(&book_of(king(), misery()))
            .json(&json!([
                { "op": "test", "path": "/title", "value": "Carrie" },
                { "op": "replace", "path": "/title", "value": "Never applied" }
            ]))
            .await;
        failed_test.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = failed_test.json();
        assert_eq!(body["code"], "INVALID_PATCH");

        server
            .patch(&book_of(king(), misery()))
            .json(&json!([{ "op": "replace", "path": "/isbn", "value": "123" }]))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server.get(&book_of(king(), misery())).await.json();
        assert_eq!(body["title"], "Misery");
    }
}
