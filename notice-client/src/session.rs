use crate::api::ApiClient;
use crate::api::NewNotice;
use crate::api::NewUser;
use crate::api::NoticeView;
use crate::api::Role;
use crate::api::SessionUser;
use crate::api::UserView;
use crate::cache::SessionCache;
use crate::errors::ClientError;

/// Session lifecycle.
///
/// `Uninitialized → Loading → Ready(..)`; the presentation layer must not
/// decide on a redirect-to-login until the state is `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Ready(Identity),
}

/// Who the session currently belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated { token: String, user: SessionUser },
}

/// The client-side session: current identity, persisted cache, and the
/// capability projections the presentation layer renders from.
///
/// All mutations are explicit; a failed server call never changes local
/// state, the caller only receives the error message for display.
pub struct Session {
    api: ApiClient,
    cache: SessionCache,
    state: SessionState,
}

impl Session {
    /// Create an uninitialized session. Call [`Session::bootstrap`] before
    /// rendering anything that depends on the identity.
    pub fn new(api: ApiClient, cache: SessionCache) -> Self {
        Self {
            api,
            cache,
            state: SessionState::Uninitialized,
        }
    }

    /// Restore the persisted session, if one exists.
    ///
    /// A corrupted cache is cleared by the cache layer and lands here as
    /// anonymous; bootstrap itself never fails.
    pub fn bootstrap(&mut self) {
        self.state = SessionState::Loading;

        self.state = match self.cache.load() {
            Some(stored) => SessionState::Ready(Identity::Authenticated {
                token: stored.token,
                user: stored.user,
            }),
            None => SessionState::Ready(Identity::Anonymous),
        };
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True until bootstrap has resolved the persisted state.
    pub fn is_loading(&self) -> bool {
        !matches!(self.state, SessionState::Ready(_))
    }

    /// The authenticated user, if any.
    pub fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Ready(Identity::Authenticated { user, .. }) => Some(user),
            _ => None,
        }
    }

    fn authenticated(&self) -> Result<(&str, &SessionUser), ClientError> {
        match &self.state {
            SessionState::Ready(Identity::Authenticated { token, user }) => {
                Ok((token.as_str(), user))
            }
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    fn install(&mut self, token: String, user: SessionUser) -> SessionUser {
        if let Err(e) = self.cache.store(&token, &user) {
            // The in-memory session still works; it just won't survive a
            // restart.
            tracing::warn!("Failed to persist session: {}", e);
        }

        self.state = SessionState::Ready(Identity::Authenticated {
            token,
            user: user.clone(),
        });
        user
    }

    /// Log in with existing credentials. On success the session is persisted
    /// and becomes the current identity; on failure prior state is kept.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let payload = self.api.login(email, password).await?;
        Ok(self.install(payload.token, payload.user))
    }

    /// Create an account and log into it in one step.
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<SessionUser, ClientError> {
        let payload = self.api.register(name, email, password, role).await?;
        Ok(self.install(payload.token, payload.user))
    }

    /// Drop the current identity and the persisted cache. Idempotent.
    pub fn logout(&mut self) {
        self.cache.clear();
        self.state = SessionState::Ready(Identity::Anonymous);
    }

    /// Admin-only: create another account through the admin endpoint.
    ///
    /// Checked locally first so the form can fail fast; the server
    /// independently re-checks the role.
    pub async fn add_user(&self, new_user: NewUser) -> Result<UserView, ClientError> {
        let (token, user) = match self.authenticated() {
            Ok(auth) => auth,
            Err(_) => return Err(ClientError::PermissionDenied),
        };
        if user.role != Role::Admin {
            return Err(ClientError::PermissionDenied);
        }

        self.api.create_user(token, &new_user).await
    }

    /// Fetch the board, replaying the cached bearer token.
    pub async fn notices(&self) -> Result<Vec<NoticeView>, ClientError> {
        let (token, _) = self.authenticated()?;
        self.api.list_notices(token).await
    }

    /// Post a notice as the current identity.
    pub async fn post_notice(&self, notice: NewNotice) -> Result<NoticeView, ClientError> {
        let (token, _) = self.authenticated()?;
        self.api.create_notice(token, &notice).await
    }

    /// Delete a notice as the current identity.
    pub async fn remove_notice(&self, notice_id: &str) -> Result<(), ClientError> {
        let (token, _) = self.authenticated()?;
        self.api.delete_notice(token, notice_id).await
    }

    /// Admin-only: list all accounts.
    pub async fn users(&self) -> Result<Vec<UserView>, ClientError> {
        let (token, _) = self.authenticated()?;
        self.api.list_users(token).await
    }

    /// May the current identity author notices?
    pub fn can_create(&self) -> bool {
        self.current_user()
            .map(|user| user.role.can_create_notices())
            .unwrap_or(false)
    }

    /// May the current identity delete this notice? Admins always; authors
    /// their own.
    pub fn can_delete(&self, notice: &NoticeView) -> bool {
        let Some(user) = self.current_user() else {
            return false;
        };

        user.role.can_delete_any_notice()
            || (user.role.can_create_notices() && notice.author.id == user.id)
    }
}
