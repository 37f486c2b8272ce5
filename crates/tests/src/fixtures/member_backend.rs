use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use dashmap::DashMap;
use serde_json::Value;
use tokio::net::TcpListener;

pub const MEMBER_PATH: &str = "/api/v1/members/me";

#[derive(Debug, Clone)]
pub enum MemberReply {
    Member(Value),
    Status(u16),
}

/// Stand-in for the members API: answers `GET /members/me` per bearer token.
pub struct MockMemberBackend {
    pub base_url: String,
    replies: Arc<DashMap<String, MemberReply>>,
}

impl MockMemberBackend {
    pub async fn spawn() -> Self {
        let replies: Arc<DashMap<String, MemberReply>> = Arc::new(DashMap::new());

        let app = Router::new()
            .route(MEMBER_PATH, get(members_me))
            .with_state(replies.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr: SocketAddr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            replies,
        }
    }

    pub fn set_member(&self, token: &str, member: Value) {
        self.replies
            .insert(token.to_string(), MemberReply::Member(member));
    }

    pub fn set_status(&self, token: &str, status: u16) {
        self.replies
            .insert(token.to_string(), MemberReply::Status(status));
    }
}

async fn members_me(
    State(replies): State<Arc<DashMap<String, MemberReply>>>,
    headers: HeaderMap,
) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let reply = token.and_then(|t| replies.get(t).map(|r| r.clone()));
    match reply {
        Some(MemberReply::Member(member)) => Json(member).into_response(),
        Some(MemberReply::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}
