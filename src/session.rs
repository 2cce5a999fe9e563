use std::str::FromStr;

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};
use uuid::Uuid;

use crate::model::role::Role;

pub const SESSION_HEADER: &str = "X-Session-Id";
pub const ROLE_HEADER: &str = "X-Role";
pub const USER_HEADER: &str = "X-User-Id";

/// Per-request context handed explicitly to every operation.
///
/// Extraction never fails: a missing or malformed session id gets a fresh one,
/// and an unknown role or user id is left empty. The role is informational only.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub role: Option<Role>,
    pub user_id: Option<u64>,
}

impl SessionContext {
    fn from_headers(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
        };

        Self {
            session_id: header(SESSION_HEADER)
                .and_then(|h| Uuid::parse_str(h).ok())
                .unwrap_or_else(Uuid::new_v4),
            role: header(ROLE_HEADER).and_then(|h| Role::from_str(h).ok()),
            user_id: header(USER_HEADER).and_then(|h| h.parse().ok()),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(SessionContext::from_headers(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_known_headers() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, id.to_string()))
            .insert_header((ROLE_HEADER, "teacher"))
            .insert_header((USER_HEADER, "12"))
            .to_http_request();

        let session = SessionContext::from_headers(&req);
        assert_eq!(session.session_id, id);
        assert_eq!(session.role, Some(Role::Teacher));
        assert_eq!(session.user_id, Some(12));
    }

    #[test]
    fn malformed_headers_fall_back_instead_of_failing() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "not-a-uuid"))
            .insert_header((ROLE_HEADER, "principal"))
            .insert_header((USER_HEADER, "-3"))
            .to_http_request();

        let session = SessionContext::from_headers(&req);
        assert_eq!(session.role, None);
        assert_eq!(session.user_id, None);
        assert!(!session.session_id.is_nil());
    }
}
