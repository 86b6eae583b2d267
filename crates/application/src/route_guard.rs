use crate::AuthSnapshot;

/// Path unauthenticated and under-privileged visitors are sent to.
pub const ROOT_PATH: &str = "/";

/// Navigation target carried by a redirect decision.
///
/// The guard only produces the value; issuing the navigation is the
/// embedding shell's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    path: String,
    return_to: Option<String>,
}

impl RedirectTarget {
    /// Returns the path to navigate to.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the originally requested path, when the destination should
    /// send the visitor back after sign-in.
    #[must_use]
    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }
}

/// Outcome of evaluating a protected route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session state is still resolving; render a neutral placeholder only.
    Loading,
    /// Navigate away instead of rendering the protected subtree.
    Redirect(RedirectTarget),
    /// Render the protected subtree unchanged.
    Render,
}

/// Access policy for one protected route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
    require_admin: bool,
}

impl RouteGuard {
    /// Guard that only requires a signed-in user.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_admin: false,
        }
    }

    /// Guard that additionally requires the admin privilege.
    #[must_use]
    pub fn with_admin_required() -> Self {
        Self { require_admin: true }
    }

    /// Decides whether the route at `requested_path` may render.
    ///
    /// The loading check runs before any redirect: a session that has not
    /// resolved yet is not an unauthenticated session, and redirecting it
    /// would bounce valid sign-ins.
    #[must_use]
    pub fn evaluate(&self, snapshot: &AuthSnapshot, requested_path: &str) -> RouteDecision {
        if snapshot.is_loading() {
            return RouteDecision::Loading;
        }

        if !snapshot.is_authenticated() {
            return RouteDecision::Redirect(RedirectTarget {
                path: ROOT_PATH.to_owned(),
                return_to: Some(requested_path.to_owned()),
            });
        }

        if self.require_admin && !snapshot.is_admin() {
            // Permission denial, not a sign-in prompt: no return-to location.
            return RouteDecision::Redirect(RedirectTarget {
                path: ROOT_PATH.to_owned(),
                return_to: None,
            });
        }

        RouteDecision::Render
    }
}
