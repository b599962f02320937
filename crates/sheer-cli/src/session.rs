//! Admin session gate.
//!
//! Sign-in state lives in a [`watch`] channel. The gate publishes the
//! authenticated client when credentials check out and `None` on sign-out;
//! the UI subscribes and only looks at whether a session exists.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use crate::client::{ApiClient, Credentials};

/// An established admin session.
#[derive(Clone)]
pub struct Session {
  pub username: String,
  /// Client that signs requests with the session's credentials.
  pub client:   ApiClient,
}

/// Publishes session changes. Cheap to clone; every clone feeds the same
/// channel.
#[derive(Clone)]
pub struct SessionGate {
  anon: ApiClient,
  tx:   Arc<watch::Sender<Option<Session>>>,
}

impl SessionGate {
  pub fn new(anon: ApiClient) -> Self {
    let (tx, _rx) = watch::channel(None);
    Self { anon, tx: Arc::new(tx) }
  }

  pub fn subscribe(&self) -> watch::Receiver<Option<Session>> { self.tx.subscribe() }

  /// The current session, if signed in.
  pub fn current(&self) -> Option<Session> { self.tx.borrow().clone() }

  /// Check `credentials` against the server and publish the session on
  /// success. Failure leaves the current state as it was.
  pub async fn sign_in(&self, credentials: Credentials) -> Result<String> {
    let client = self.anon.with_credentials(credentials);
    let username = client.session().await?;
    tracing::info!(%username, "signed in");
    self.publish(Some(Session { username: username.clone(), client }));
    Ok(username)
  }

  /// Drop the credentials and publish the signed-out state.
  pub fn sign_out(&self) {
    if self.publish(None).is_some() {
      tracing::info!("signed out");
    }
  }

  /// Replace the session, returning the previous one.
  pub(crate) fn publish(&self, session: Option<Session>) -> Option<Session> {
    self.tx.send_replace(session)
  }

  #[cfg(test)]
  pub(crate) fn anon(&self) -> &ApiClient { &self.anon }
}
