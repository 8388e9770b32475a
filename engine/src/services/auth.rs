// Session state, broadcast over a watch channel. Subscribers always see
// the latest value; intermediate flips may coalesce if nobody is polling.
use shared::models::User;
use tokio::sync::watch;
use tracing::info;

pub struct AuthService {
    sessions: watch::Sender<Option<User>>,
}

impl AuthService {
    pub fn new() -> Self {
        let (sessions, _) = watch::channel(None);
        AuthService { sessions }
    }

    /// Starts a session. Signing in again re-notifies subscribers even if
    /// the user is unchanged.
    pub fn sign_in(&self, user: User) {
        info!(user = %user.email, "session started");
        self.sessions.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        info!("session ended");
        self.sessions.send_replace(None);
    }

    pub fn current_user(&self) -> Option<User> {
        self.sessions.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.sessions.subscribe()
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_signed_out() {
        assert!(AuthService::new().current_user().is_none());
    }

    #[tokio::test]
    async fn subscriber_sees_sign_in_and_out() {
        let auth = AuthService::new();
        let mut rx = auth.subscribe();

        auth.sign_in(User::new("trader@example.com"));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|u| u.email.clone()),
            Some("trader@example.com".to_string())
        );

        auth.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn repeated_sign_in_renotifies() {
        let auth = AuthService::new();
        let mut rx = auth.subscribe();

        auth.sign_in(User::new("trader@example.com"));
        rx.changed().await.unwrap();
        rx.borrow_and_update();

        auth.sign_in(User::new("trader@example.com"));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());
    }
}
