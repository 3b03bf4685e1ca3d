//! Auth gate and route guard.
//!
//! This is a mock gate: any non-empty username is accepted and the session
//! lives for the in-memory lifetime of the app. The route guard maps paths to
//! views and redirects unauthenticated visits to protected views back to the
//! login route.

use crate::error::SalonError;
use crate::types::{Credentials, RouteOutcome, SessionUser};

pub const LOGIN_PATH: &str = "/login";
pub const OVERVIEW_PATH: &str = "/main-analytics-overview-dashboard";
pub const MANAGEMENT_PATH: &str = "/appointment-management-dashboard";

#[derive(Debug, Default)]
pub struct AuthSession {
    user: Option<SessionUser>,
}

impl AuthSession {
    pub fn new() -> Self {
        AuthSession { user: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Mock login: accepts any non-empty username, grants the admin role.
    /// No credential verification exists in this scope.
    pub fn login(&mut self, credentials: Credentials) -> Result<SessionUser, SalonError> {
        let username = credentials.username.trim();
        if username.is_empty() {
            return Err(SalonError::LoginRejected("username is required".to_string()));
        }
        let user = SessionUser {
            username: username.to_string(),
            role: "admin".to_string(),
        };
        self.user = Some(user.clone());
        log::info!("Session started for {}", user.username);
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("Session ended for {}", user.username);
        }
    }
}

/// Map a path to a routing decision for the current session.
pub fn resolve_route(path: &str, authenticated: bool) -> RouteOutcome {
    match path {
        LOGIN_PATH => RouteOutcome::Render {
            view: "login".to_string(),
        },
        "/" => RouteOutcome::Redirect {
            to: OVERVIEW_PATH.to_string(),
        },
        OVERVIEW_PATH | MANAGEMENT_PATH => {
            if authenticated {
                RouteOutcome::Render {
                    view: path.trim_start_matches('/').to_string(),
                }
            } else {
                RouteOutcome::Redirect {
                    to: LOGIN_PATH.to_string(),
                }
            }
        }
        _ => RouteOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn test_login_sets_session() {
        let mut session = AuthSession::new();
        assert!(!session.is_authenticated());
        let user = session.login(creds("marta")).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn test_login_rejects_blank_username() {
        let mut session = AuthSession::new();
        assert!(session.login(creds("   ")).is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let mut session = AuthSession::new();
        session.login(creds("marta")).unwrap();
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_root_redirects_to_overview() {
        assert_eq!(
            resolve_route("/", true),
            RouteOutcome::Redirect {
                to: OVERVIEW_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_protected_routes_render_when_authenticated() {
        for path in [OVERVIEW_PATH, MANAGEMENT_PATH] {
            match resolve_route(path, true) {
                RouteOutcome::Render { view } => {
                    assert_eq!(view, path.trim_start_matches('/'))
                }
                other => panic!("expected render, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_protected_routes_redirect_when_unauthenticated() {
        for path in [OVERVIEW_PATH, MANAGEMENT_PATH] {
            assert_eq!(
                resolve_route(path, false),
                RouteOutcome::Redirect {
                    to: LOGIN_PATH.to_string()
                }
            );
        }
    }

    #[test]
    fn test_login_route_is_public() {
        assert_eq!(
            resolve_route(LOGIN_PATH, false),
            RouteOutcome::Render {
                view: "login".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(resolve_route("/reports/annual", true), RouteOutcome::NotFound);
    }

    #[test]
    fn test_login_then_navigate_then_logout_then_navigate() {
        // Scenario: logged-in navigation renders, logged-out navigation
        // bounces to /login.
        let mut session = AuthSession::new();
        session.login(creds("marta")).unwrap();
        assert!(matches!(
            resolve_route(OVERVIEW_PATH, session.is_authenticated()),
            RouteOutcome::Render { .. }
        ));

        session.logout();
        assert_eq!(
            resolve_route(OVERVIEW_PATH, session.is_authenticated()),
            RouteOutcome::Redirect {
                to: LOGIN_PATH.to_string()
            }
        );
    }
}
