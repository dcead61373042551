use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{Account, Documents, Links, Login, Memos, Register, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/links")]
        Links {},
        #[route("/documents")]
        Documents {},
        #[route("/memos")]
        Memos {},
        #[route("/account")]
        Account {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::{get, post};
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_http::cors::{Any, CorsLayer};
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Initialize database pool
    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    // Run migrations
    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to set up session store");

    // Sessions persist across reloads: cookie + Postgres store, 7-day
    // inactivity expiry.
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into().unwrap(),
        ));

    // The existence check is callable from anywhere, pre-flight included.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = axum::Router::new()
        // Routes outside the Dioxus application: the existence-check
        // endpoint and signed blob downloads.
        .route("/api/auth/exists", post(check_exists).layer(cors))
        .route("/files/{*path}", get(serve_blob))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App)
        // Add session layer to all routes
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

#[cfg(feature = "server")]
#[derive(serde::Deserialize)]
struct ExistsRequest {
    email: Option<String>,
}

/// Normalized email from an existence-check request, if one was supplied.
/// An absent or unparseable body counts the same as a missing email.
#[cfg(feature = "server")]
fn exists_request_email(req: Option<ExistsRequest>) -> Option<String> {
    req.and_then(|r| r.email)
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// `POST /api/auth/exists` — does an account with this email exist?
///
/// Exactly three outcomes: `200 {"exists": true}`, `200 {"exists": false}`
/// (a no-match lookup is not an error), or `500` with the underlying reason.
/// A missing or empty email is the client's error, reported as
/// `400 {"error": "Email is required"}` whatever shape the body took.
#[cfg(feature = "server")]
async fn check_exists(
    body: Result<axum::Json<ExistsRequest>, axum::extract::rejection::JsonRejection>,
) -> axum::response::Response {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::Json;
    use serde_json::json;

    let Some(email) = exists_request_email(body.ok().map(|Json(req)| req)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email is required"})),
        )
            .into_response();
    };

    let pool = match api::db::get_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("existence check: pool unavailable: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let row: Result<Option<(i64,)>, sqlx::Error> =
        sqlx::query_as("SELECT 1::BIGINT AS n FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await;

    match row {
        Ok(found) => Json(json!({"exists": found.is_some()})).into_response(),
        Err(e) => {
            tracing::error!("existence check failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(feature = "server")]
#[derive(serde::Deserialize)]
struct SignedQuery {
    expires: i64,
    sig: String,
}

/// `GET /files/{path}` — serve a blob if the signed URL still verifies.
#[cfg(feature = "server")]
async fn serve_blob(
    axum::extract::Path(path): axum::extract::Path<String>,
    axum::extract::Query(query): axum::extract::Query<SignedQuery>,
) -> axum::response::Response {
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;

    if !api::storage::verify(&path, query.expires, &query.sig) {
        return (StatusCode::FORBIDDEN, "This link is invalid or has expired").into_response();
    }

    match api::storage::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Err(e) => {
            tracing::warn!(%path, "signed download failed: {e}");
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` to `/links`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Links {});
    rsx! {}
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn test_exists_request_email_rejects_absent_bodies() {
        // A rejected or empty body folds into the same missing-email branch.
        assert_eq!(exists_request_email(None), None);
        assert_eq!(exists_request_email(Some(ExistsRequest { email: None })), None);
        assert_eq!(
            exists_request_email(Some(ExistsRequest {
                email: Some("   ".to_string())
            })),
            None
        );
    }

    #[test]
    fn test_exists_request_email_normalizes() {
        assert_eq!(
            exists_request_email(Some(ExistsRequest {
                email: Some("  Ada@Example.COM ".to_string())
            })),
            Some("ada@example.com".to_string())
        );
    }
}
