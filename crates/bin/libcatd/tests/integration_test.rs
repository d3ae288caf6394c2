//! End-to-end smoke tests for the full libcatd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use libcat_adapter_http_axum::router;
use libcat_adapter_http_axum::state::AppState;
use libcat_adapter_storage_sqlite_sqlx::{
    Config, SqliteAuthorRepository, SqliteBookInstanceRepository, SqliteBookRepository,
    SqliteSessionStore, SqliteTagRepository, SqliteUserRepository,
};
use libcat_app::ports::SessionStore;
use libcat_app::services::catalog_service::CatalogService;
use libcat_app::services::session_service::SessionService;
use libcat_domain::author::Author;
use libcat_domain::book::Book;
use libcat_domain::book_instance::{BookInstance, LoanStatus};
use libcat_domain::genre::Genre;
use libcat_domain::session::Session;
use libcat_domain::time::Date;
use libcat_domain::user::{CAN_MARK_RETURNED, User};
use tower::ServiceExt;

/// A wired router plus direct handles for seeding.
struct Library {
    app: axum::Router,
    books: SqliteBookRepository,
    authors: SqliteAuthorRepository,
    copies: SqliteBookInstanceRepository,
    tags: SqliteTagRepository,
    users: SqliteUserRepository,
    sessions: SqliteSessionStore,
}

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn library() -> Library {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");
    let pool = db.pool().clone();

    let catalog = CatalogService::new(
        SqliteBookRepository::new(pool.clone()),
        SqliteAuthorRepository::new(pool.clone()),
        SqliteBookInstanceRepository::new(pool.clone()),
        SqliteTagRepository::new(pool.clone()),
    );
    let sessions = SessionService::new(
        SqliteSessionStore::new(pool.clone()),
        SqliteUserRepository::new(pool.clone()),
    );

    Library {
        app: router::build(AppState::new(catalog, sessions)),
        books: SqliteBookRepository::new(pool.clone()),
        authors: SqliteAuthorRepository::new(pool.clone()),
        copies: SqliteBookInstanceRepository::new(pool.clone()),
        tags: SqliteTagRepository::new(pool.clone()),
        users: SqliteUserRepository::new(pool.clone()),
        sessions: SqliteSessionStore::new(pool),
    }
}

impl Library {
    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn author(&self, first: &str, last: &str) -> Author {
        let author = Author::builder()
            .first_name(first)
            .last_name(last)
            .build()
            .unwrap();
        self.authors.insert(&author).await.unwrap();
        author
    }

    async fn book(&self, title: &str, author: Option<&Author>) -> Book {
        let mut builder = Book::builder().title(title).summary("A summary.");
        if let Some(author) = author {
            builder = builder.author_id(author.id);
        }
        let book = builder.build().unwrap();
        self.books.insert(&book).await.unwrap();
        book
    }

    async fn copy(&self, book: &Book, status: LoanStatus) -> BookInstance {
        let copy = BookInstance::builder(book.id)
            .imprint("First edition")
            .status(status)
            .build()
            .unwrap();
        self.copies.insert(&copy).await.unwrap();
        copy
    }

    async fn loan(&self, book: &Book, borrower: &User, due: Date) -> BookInstance {
        let copy = BookInstance::builder(book.id)
            .imprint("Paperback")
            .status(LoanStatus::OnLoan)
            .due_back(due)
            .borrower(borrower.id)
            .build()
            .unwrap();
        self.copies.insert(&copy).await.unwrap();
        copy
    }

    /// Store `user` with a logged-in session and return the cookie header.
    async fn login(&self, user: &User) -> String {
        self.users.insert(user).await.unwrap();
        let mut session = Session::new();
        session.login(user.id);
        self.sessions.save(&session).await.unwrap();
        format!("sessionid={}", session.id)
    }
}

async fn body_string(resp: Response) -> String {
    String::from_utf8(resp.into_body().collect().await.unwrap().to_bytes().to_vec()).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

/// `name=value` part of the response's `Set-Cookie` header.
fn session_cookie(resp: &Response) -> String {
    let raw = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    raw.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let lib = library().await;
    let resp = lib.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "OK");
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_home_counts() {
    let lib = library().await;
    let tolstoy = lib.author("Leo", "Tolstoy").await;
    let war_and_peace = lib.book("War and Peace", Some(&tolstoy)).await;
    lib.book("Star wars", None).await;
    lib.copy(&war_and_peace, LoanStatus::Available).await;
    lib.copy(&war_and_peace, LoanStatus::Maintenance).await;
    lib.tags
        .insert_genre(&Genre::new("Science fiction").unwrap())
        .await
        .unwrap();

    let resp = lib.get("/catalog/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;

    assert!(body.contains("<strong>Books:</strong> 2"));
    assert!(body.contains("<strong>Copies:</strong> 2"));
    assert!(body.contains("<strong>Copies available:</strong> 1"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
    // only "Star wars" matches the lowercase needle
    assert!(body.contains("in the title:</strong> 1"));
    assert!(body.contains("in the name:</strong> 1"));
    assert!(body.contains("visited this page 0 times"));
}

#[tokio::test]
async fn should_show_title_count_in_genre_slot() {
    let lib = library().await;
    lib.tags
        .insert_genre(&Genre::new("Science fiction").unwrap())
        .await
        .unwrap();

    let body = body_string(lib.get("/catalog/", None).await).await;
    assert!(body.contains("in the title:</strong> 0"));
    assert!(body.contains("in the name:</strong> 0"));
}

#[tokio::test]
async fn should_count_visits_with_session_cookie() {
    let lib = library().await;

    let first = lib.get("/catalog/", None).await;
    let cookie = session_cookie(&first);
    assert!(body_string(first).await.contains("visited this page 0 times"));

    let second = lib.get("/catalog/", Some(&cookie)).await;
    assert!(body_string(second).await.contains("visited this page 1 times"));

    let third = lib.get("/catalog/", Some(&cookie)).await;
    assert_eq!(session_cookie(&third), cookie);
    assert!(body_string(third).await.contains("visited this page 2 times"));
}

#[tokio::test]
async fn should_start_new_session_for_unknown_cookie() {
    let lib = library().await;
    let resp = lib
        .get(
            "/catalog/",
            Some("sessionid=00000000-0000-4000-8000-000000000000"),
        )
        .await;
    assert_ne!(
        session_cookie(&resp),
        "sessionid=00000000-0000-4000-8000-000000000000"
    );
    assert!(body_string(resp).await.contains("visited this page 0 times"));
}

#[tokio::test]
async fn should_redirect_root_to_catalog_home() {
    let lib = library().await;
    let resp = lib.get("/", None).await;
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/catalog/");
}

// ---------------------------------------------------------------------------
// Books and authors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_paginate_books_five_per_page() {
    let lib = library().await;
    for title in ["A", "B", "C", "D", "E", "F"] {
        lib.book(title, None).await;
    }

    let first = body_string(lib.get("/catalog/books/", None).await).await;
    assert!(first.contains("Page 1 of 2"));
    assert!(first.contains(">E</a>"));
    assert!(!first.contains(">F</a>"));

    let second = body_string(lib.get("/catalog/books/?page=2", None).await).await;
    assert!(second.contains(">F</a>"));
    assert!(!second.contains(">A</a>"));

    let last = body_string(lib.get("/catalog/books/?page=last", None).await).await;
    assert!(last.contains(">F</a>"));

    let past_end = lib.get("/catalog/books/?page=3", None).await;
    assert_eq!(past_end.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_render_first_page_of_empty_listing() {
    let lib = library().await;
    let resp = lib.get("/catalog/authors/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("There are no authors available."));
}

#[tokio::test]
async fn should_render_book_detail_with_copies() {
    let lib = library().await;
    let tolstoy = lib.author("Leo", "Tolstoy").await;
    let book = lib.book("War and Peace", Some(&tolstoy)).await;
    lib.copy(&book, LoanStatus::Available).await;

    let resp = lib.get(&format!("/catalog/book/{}", book.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("War and Peace"));
    assert!(body.contains("Tolstoy, Leo"));
    assert!(body.contains("First edition"));
}

#[tokio::test]
async fn should_render_author_detail_with_books() {
    let lib = library().await;
    let tolstoy = lib.author("Leo", "Tolstoy").await;
    lib.book("Anna Karenina", Some(&tolstoy)).await;

    let resp = lib.get(&format!("/catalog/author/{}", tolstoy.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("Anna Karenina"));
}

#[tokio::test]
async fn should_return_404_for_unknown_records() {
    let lib = library().await;
    let book = lib
        .get("/catalog/book/00000000-0000-4000-8000-000000000000", None)
        .await;
    assert_eq!(book.status(), StatusCode::NOT_FOUND);

    let author = lib.get("/catalog/author/7", None).await;
    assert_eq!(author.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_redirect_anonymous_visitor_to_login() {
    let lib = library().await;
    let resp = lib.get("/catalog/mybooks/", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()[header::LOCATION],
        "/accounts/login/?next=/catalog/mybooks/"
    );
}

#[tokio::test]
async fn should_list_only_own_loans_earliest_due_first() {
    let lib = library().await;
    let dune = lib.book("Dune", None).await;
    let emma = lib.book("Emma", None).await;
    let alice = User::new("alice");
    let bob = User::new("bob");
    let cookie = lib.login(&alice).await;
    lib.users.insert(&bob).await.unwrap();

    lib.loan(&emma, &alice, day(2030, 3, 1)).await;
    lib.loan(&dune, &alice, day(2030, 1, 1)).await;
    lib.loan(&dune, &bob, day(2030, 2, 1)).await;

    let resp = lib.get("/catalog/mybooks/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;

    assert!(body.contains("2030-01-01"));
    assert!(body.contains("2030-03-01"));
    assert!(!body.contains("2030-02-01"));
    let dune_at = body.find(">Dune</a>").unwrap();
    let emma_at = body.find(">Emma</a>").unwrap();
    assert!(dune_at < emma_at);
}

#[tokio::test]
async fn should_forbid_all_loans_to_reader() {
    let lib = library().await;
    let cookie = lib.login(&User::new("reader")).await;
    let resp = lib.get("/catalog/borrowed/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_list_every_loan_for_librarian() {
    let lib = library().await;
    let dune = lib.book("Dune", None).await;
    let alice = User::new("alice");
    lib.users.insert(&alice).await.unwrap();
    lib.loan(&dune, &alice, day(2030, 1, 1)).await;
    lib.copy(&dune, LoanStatus::Available).await;

    let librarian = User::new("librarian").with_permission(CAN_MARK_RETURNED);
    let cookie = lib.login(&librarian).await;

    let resp = lib.get("/catalog/borrowed/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("alice"));
    assert!(body.contains("2030-01-01"));
    assert!(body.contains("All borrowed"));
}
