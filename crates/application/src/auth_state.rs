use gatewise_core::UserIdentity;
use gatewise_domain::UserProfile;
use tokio::sync::watch;

/// Read-only view of the hosted auth provider's current session state.
///
/// "Loading" is a distinct third state next to authenticated and anonymous:
/// while it holds, no component may treat the session as resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    is_loading: bool,
    is_authenticated: bool,
    is_admin: bool,
    user: Option<UserIdentity>,
    profile: Option<UserProfile>,
}

impl AuthSnapshot {
    /// Snapshot taken while the provider is still resolving the session.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            is_authenticated: false,
            is_admin: false,
            user: None,
            profile: None,
        }
    }

    /// Snapshot of a resolved session with no signed-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            is_loading: false,
            is_authenticated: false,
            is_admin: false,
            user: None,
            profile: None,
        }
    }

    /// Snapshot of a resolved, signed-in session.
    ///
    /// The profile may still be absent; it resolves independently of the
    /// session identity.
    #[must_use]
    pub fn authenticated(user: UserIdentity, profile: Option<UserProfile>, is_admin: bool) -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            is_admin,
            user: Some(user),
            profile,
        }
    }

    /// Snapshot of a session the provider is re-resolving while stale
    /// identity data is still visible, e.g. during a token refresh.
    #[must_use]
    pub fn refreshing(user: UserIdentity, profile: Option<UserProfile>, is_admin: bool) -> Self {
        Self {
            is_loading: true,
            is_authenticated: true,
            is_admin,
            user: Some(user),
            profile,
        }
    }

    /// Whether the provider is still resolving the session.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Whether the signed-in user holds the elevated admin privilege.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the signed-in user's identity, when one is present.
    #[must_use]
    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Returns the resolved profile, when one is present.
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

/// Explicit observable over the provider's session state.
///
/// The embedding shell publishes snapshots as the provider pushes updates;
/// components read the current value or subscribe for changes. Replaces the
/// ambient mutable auth context of context-based UI stacks.
#[derive(Debug)]
pub struct AuthStateFeed {
    sender: watch::Sender<AuthSnapshot>,
}

impl AuthStateFeed {
    /// Creates a feed with an initial snapshot.
    #[must_use]
    pub fn new(initial: AuthSnapshot) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publishes a new snapshot to all subscribers.
    pub fn publish(&self, snapshot: AuthSnapshot) {
        self.sender.send_replace(snapshot);
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn current(&self) -> AuthSnapshot {
        self.sender.borrow().clone()
    }

    /// Subscribes to future snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.sender.subscribe()
    }
}

impl Default for AuthStateFeed {
    fn default() -> Self {
        Self::new(AuthSnapshot::loading())
    }
}
