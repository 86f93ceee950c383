//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_envelope, assert_error, assert_json, assert_status, check_test_env, fixtures::*,
    multipart_form, with_cover, TestServer,
};
use reqwest::{header, StatusCode};

const CHAPTER_BODY_CHARS: usize = 450;

async fn register(server: &TestServer) -> (RegisterForm, AuthUser) {
    let form = RegisterForm::unique();
    let response = server
        .post_form("/register", None, &form.fields())
        .await
        .unwrap();
    let user: AuthUser = assert_json(response, StatusCode::CREATED).await.unwrap();
    (form, user)
}

async fn create_story(server: &TestServer, token: &str) -> StoryDetail {
    let form = StoryForm::unique();
    let response = server
        .post_multipart("/add-book", token, multipart_form(&form.fields()))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_chapter(server: &TestServer, token: &str, story_slug: &str, title: &str) -> ChapterDetail {
    let body = "x".repeat(CHAPTER_BODY_CHARS);
    let response = server
        .post_form(
            &format!("/add-chapter/{story_slug}"),
            Some(token),
            &[
                ("title", title),
                ("body", body.as_str()),
                ("authorComment", "Thanks for reading"),
                ("isPublished", "1"),
            ],
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, user) = register(&server).await;

    assert_eq!(user.username, form.username);
    assert_eq!(user.email, form.email);
    assert_eq!(user.name, form.name);
    assert_eq!(user.sex, "Male");
    assert!(!user.token.is_empty());

    let response = server
        .post_form("/login", None, &form.login_fields())
        .await
        .unwrap();
    let envelope = assert_envelope::<AuthUser>(response, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.message, "OK");
    assert_eq!(envelope.data.id, user.id);
    assert!(!envelope.data.token.is_empty());
}

#[tokio::test]
async fn test_register_duplicates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, _) = register(&server).await;

    // Same email, new username: email wins
    let mut same_email = RegisterForm::unique();
    same_email.email = form.email.clone();
    let response = server
        .post_form("/register", None, &same_email.fields())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "email already exists");

    // Both collide: email is still reported first
    let response = server
        .post_form("/register", None, &form.fields())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "email already exists");

    // Only the username collides
    let mut same_username = RegisterForm::unique();
    same_username.username = form.username.clone();
    let response = server
        .post_form("/register", None, &same_username.fields())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "username already exists");
}

#[tokio::test]
async fn test_register_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut form = RegisterForm::unique();
    form.email = "not-an-email".to_string();
    form.sex = "7".to_string();

    let response = server
        .post_form("/register", None, &form.fields())
        .await
        .unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert!(envelope.data["email"].is_array());
    assert!(envelope.data["sex"].is_array());
}

#[tokio::test]
async fn test_login_errors_are_distinct() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, _) = register(&server).await;

    let unknown = RegisterForm::unique();
    let response = server
        .post_form("/login", None, &unknown.login_fields())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "email not found");

    let response = server
        .post_form(
            "/login",
            None,
            &[("email", form.email.as_str()), ("password", "WrongPass999")],
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "password are wrong");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    for path in ["/books/categories", "/user/books", "/book-list", "/fantasy"] {
        let response = server.get(path).await.unwrap();
        assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}

// ============================================================================
// Category Tests
// ============================================================================

#[tokio::test]
async fn test_list_categories() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    create_story(&server, &user.token).await;

    let response = server.get_auth("/books/categories", &user.token).await.unwrap();
    let categories: Vec<Category> = assert_json(response, StatusCode::OK).await.unwrap();

    let fantasy = categories
        .iter()
        .find(|c| c.slug == FANTASY_CATEGORY_SLUG)
        .expect("seeded category");
    assert_eq!(fantasy.id, FANTASY_CATEGORY_ID);
    assert!(fantasy.story_counts >= 1);

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

// ============================================================================
// Story Tests
// ============================================================================

#[tokio::test]
async fn test_create_story_with_cover() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let story_form = StoryForm::unique();
    let form = with_cover(
        multipart_form(&story_form.fields()),
        "front.png",
        b"fake png bytes",
    )
    .unwrap();
    let response = server.post_multipart("/add-book", &user.token, form).await.unwrap();
    let story: StoryDetail = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(story.user_id, user.id);
    assert_eq!(story.category_id, FANTASY_CATEGORY_ID);
    assert_eq!(story.category.slug, FANTASY_CATEGORY_SLUG);
    assert_eq!(story.title, story_form.title);
    assert!(story.slug.ends_with(&format!("-{}", story.id)));
    assert!(story.is_published);
    assert!(!story.is_adult);
    assert!(story.cover.ends_with(".png"));

    let filename = story.cover.rsplit('/').next().unwrap();
    let response = server.get(&format!("/book_front/{filename}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(&response.bytes().await.unwrap()[..], b"fake png bytes");
}

#[tokio::test]
async fn test_create_story_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let mut story_form = StoryForm::unique();
    story_form.title = "Tiny".to_string();
    let response = server
        .post_multipart("/add-book", &user.token, multipart_form(&story_form.fields()))
        .await
        .unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert!(envelope.data["title"].is_array());

    let mut story_form = StoryForm::unique();
    story_form.category_id = "999999".to_string();
    let response = server
        .post_multipart("/add-book", &user.token, multipart_form(&story_form.fields()))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_identical_titles_get_distinct_slugs() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let story_form = StoryForm::unique();
    let mut slugs = Vec::new();
    for _ in 0..2 {
        let response = server
            .post_multipart("/add-book", &user.token, multipart_form(&story_form.fields()))
            .await
            .unwrap();
        let story: StoryDetail = assert_json(response, StatusCode::CREATED).await.unwrap();
        slugs.push(story.slug);
    }
    assert_ne!(slugs[0], slugs[1]);
}

#[tokio::test]
async fn test_edit_story() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let story = create_story(&server, &user.token).await;

    let mut story_form = StoryForm::unique();
    story_form.title = format!("Renamed Road {}", unique_suffix());
    story_form.is_adult = "1".to_string();
    let response = server
        .put_multipart(
            &format!("/edit-book/{}", story.slug),
            &user.token,
            multipart_form(&story_form.fields()),
        )
        .await
        .unwrap();
    let edited: StoryDetail = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(edited.id, story.id);
    assert_eq!(edited.title, story_form.title);
    assert!(edited.is_adult);
    assert!(edited.slug.ends_with(&format!("-{}", story.id)));
    assert_ne!(edited.slug, story.slug);

    // Another user cannot edit it
    let (_, other) = register(&server).await;
    let response = server
        .put_multipart(
            &format!("/edit-book/{}", edited.slug),
            &other.token,
            multipart_form(&StoryForm::unique().fields()),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "story not found");

    let response = server
        .get_auth(&format!("/book/{}", edited.slug), &user.token)
        .await
        .unwrap();
    let page: StoryBySlug = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.id, story.id);
    assert_eq!(page.title, story_form.title);
    assert_eq!(page.slug, edited.slug);
}

#[tokio::test]
async fn test_failed_edit_keeps_story_and_covers() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let story_form = StoryForm::unique();
    let form = with_cover(multipart_form(&story_form.fields()), "front.png", b"first cover").unwrap();
    let response = server.post_multipart("/add-book", &user.token, form).await.unwrap();
    let story: StoryDetail = assert_json(response, StatusCode::CREATED).await.unwrap();
    let covers = server.cover_files();
    assert_eq!(covers.len(), 1);

    // Rejected by validation
    let mut invalid = StoryForm::unique();
    invalid.title = "abc".to_string();
    let form = with_cover(multipart_form(&invalid.fields()), "second.png", b"second cover").unwrap();
    let response = server
        .put_multipart(&format!("/edit-book/{}", story.slug), &user.token, form)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(server.cover_files(), covers);

    // Rejected by the database after the new cover was written
    let mut unknown_category = StoryForm::unique();
    unknown_category.category_id = "999999".to_string();
    let form = with_cover(
        multipart_form(&unknown_category.fields()),
        "third.png",
        b"third cover",
    )
    .unwrap();
    let response = server
        .put_multipart(&format!("/edit-book/{}", story.slug), &user.token, form)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(server.cover_files(), covers);

    let response = server
        .get_auth(&format!("/book/{}", story.slug), &user.token)
        .await
        .unwrap();
    let page: StoryBySlug = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.title, story_form.title);
    assert_eq!(page.slug, story.slug);

    let filename = story.cover.rsplit('/').next().unwrap();
    let response = server.get(&format!("/book_front/{filename}")).await.unwrap();
    assert_eq!(&response.bytes().await.unwrap()[..], b"first cover");
}

#[tokio::test]
async fn test_story_listings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let first = create_story(&server, &user.token).await;
    let second = create_story(&server, &user.token).await;

    let response = server.get_auth("/user/books", &user.token).await.unwrap();
    let own: Vec<StoryListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<i64> = own.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let response = server
        .get_auth("/book-list?filter=time", &user.token)
        .await
        .unwrap();
    let by_time: Vec<StoryListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    let pos = |id: i64| by_time.iter().position(|s| s.id == id).expect("listed");
    assert!(pos(second.id) < pos(first.id));

    // Only stories with chapters appear under "modified"
    add_chapter(&server, &user.token, &first.slug, "Chapter One").await;
    let response = server
        .get_auth("/book-list?filter=modified", &user.token)
        .await
        .unwrap();
    let by_modified: Vec<StoryListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(by_modified.iter().any(|s| s.id == first.id));
    assert!(!by_modified.iter().any(|s| s.id == second.id));

    // Unknown filters fall back to "modified"
    let response = server
        .get_auth("/book-list?filter=bogus", &user.token)
        .await
        .unwrap();
    let fallback: Vec<StoryListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!fallback.iter().any(|s| s.id == second.id));

    let response = server
        .get_auth(
            &format!("/{FANTASY_CATEGORY_SLUG}?filter=time"),
            &user.token,
        )
        .await
        .unwrap();
    let in_category: Vec<StoryListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(in_category.iter().any(|s| s.id == first.id));
    assert!(in_category.iter().any(|s| s.id == second.id));
}

#[tokio::test]
async fn test_remove_story() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let (_, other) = register(&server).await;
    let story = create_story(&server, &user.token).await;
    add_chapter(&server, &user.token, &story.slug, "Chapter One").await;

    let path = format!("/writers/book/{}/delete", story.id);
    let response = server.delete_auth(&path, &other.token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &user.token).await.unwrap();
    let status: Status = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.status);

    let response = server
        .get_auth(&format!("/book/{}", story.slug), &user.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "story not found");
}

#[tokio::test]
async fn test_invalid_path_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let response = server
        .delete_auth("/writers/book/not-a-number/delete", &user.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Chapter Tests
// ============================================================================

#[tokio::test]
async fn test_add_and_read_chapter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let story = create_story(&server, &user.token).await;

    let chapter = add_chapter(&server, &user.token, &story.slug, "The First Chapter").await;
    assert_eq!(chapter.story_id, story.id);
    assert_eq!(chapter.slug, "the-first-chapter");
    assert_eq!(chapter.word_counts, CHAPTER_BODY_CHARS as u64);
    assert_eq!(chapter.reading_time, "2 Minutes");
    assert_eq!(chapter.author_comment, "Thanks for reading");
    assert_eq!(chapter.likes, 0);
    assert!(chapter.is_published);

    let response = server
        .get_auth(
            &format!("/book/{}/{}", story.slug, chapter.slug),
            &user.token,
        )
        .await
        .unwrap();
    let read: ChapterRead = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(read.id, chapter.id);
    assert_eq!(read.body.chars().count(), CHAPTER_BODY_CHARS);

    let response = server
        .get_auth(&format!("/book/{}", story.slug), &user.token)
        .await
        .unwrap();
    let page: StoryBySlug = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.chapter_counts, 1);
    assert_eq!(page.reading_time, "2 Minutes");
}

#[tokio::test]
async fn test_add_chapter_to_foreign_story() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let (_, other) = register(&server).await;
    let story = create_story(&server, &user.token).await;

    let response = server
        .post_form(
            &format!("/add-chapter/{}", story.slug),
            Some(&other.token),
            &[
                ("title", "Hijacked Chapter"),
                ("body", "Not my story at all"),
                ("isPublished", "1"),
            ],
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "story not found");
}

#[tokio::test]
async fn test_edit_chapter_keeps_publish_flag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let story = create_story(&server, &user.token).await;
    let chapter = add_chapter(&server, &user.token, &story.slug, "Draft Chapter").await;

    let response = server
        .patch_form(
            &format!("/edit-chapter/{}/{}", story.slug, chapter.slug),
            &user.token,
            &[("title", "Final Chapter"), ("body", "A much shorter body")],
        )
        .await
        .unwrap();
    let edited: ChapterDetail = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(edited.id, chapter.id);
    assert_eq!(edited.title, "Final Chapter");
    assert_eq!(edited.slug, "final-chapter");
    assert_eq!(edited.reading_time, "0 Minutes");
    assert!(edited.is_published);

    // Invalid input leaves the chapter unchanged
    let response = server
        .patch_form(
            &format!("/edit-chapter/{}/{}", story.slug, edited.slug),
            &user.token,
            &[("title", "Bad"), ("body", "Still a fine body")],
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(&format!("/book/{}/{}", story.slug, edited.slug), &user.token)
        .await
        .unwrap();
    let read: ChapterRead = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(read.body, "A much shorter body");
}

#[tokio::test]
async fn test_like_chapter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, reader) = register(&server).await;
    let story = create_story(&server, &author.token).await;
    let chapter = add_chapter(&server, &author.token, &story.slug, "Likeable Chapter").await;

    let path = format!("/books/{}/chapters/{}/votes/up", story.id, chapter.id);

    let response = server.post_form(&path, Some(&author.token), &[]).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "cannot like your own chapter");

    // Repeated likes are recorded each time
    for _ in 0..2 {
        let response = server.post_form(&path, Some(&reader.token), &[]).await.unwrap();
        let status: Status = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(status.status);
    }

    let response = server
        .get_auth(&format!("/books/{}/chapters", story.id), &reader.token)
        .await
        .unwrap();
    let chapters: Vec<ChapterSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].id, chapter.id);
    assert_eq!(chapters[0].likes, 2);

    // Chapter id under the wrong story
    let other_story = create_story(&server, &author.token).await;
    let response = server
        .post_form(
            &format!("/books/{}/chapters/{}/votes/up", other_story.id, chapter.id),
            Some(&reader.token),
            &[],
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "chapter not found");
}

#[tokio::test]
async fn test_remove_chapter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, other) = register(&server).await;
    let story = create_story(&server, &author.token).await;
    let chapter = add_chapter(&server, &author.token, &story.slug, "Doomed Chapter").await;

    let path = format!("/writers/chapter/{}/delete", chapter.id);
    let response = server.delete_auth(&path, &other.token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let status: Status = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.status);

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "chapter not found");
}
