//! Authentication store: the source of session state.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use posdash_core::UserId;

use crate::{RoleSet, SessionClaims, SessionState, TokenValidationError, TosStatus, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("auth store unavailable: {0}")]
    Unavailable(String),
}

/// Read side of an authentication store.
///
/// Each accessor may fail (the store might live behind a lock, a worker, a
/// storage API...). Callers that need a decision should use [`snapshot`](Self::snapshot),
/// which never fails.
pub trait AuthStore: Send + Sync {
    fn is_authenticated(&self) -> Result<bool, StoreError>;

    fn roles(&self) -> Result<RoleSet, StoreError>;

    fn tos_status(&self) -> Result<TosStatus, StoreError>;

    fn user(&self) -> Result<Option<UserId>, StoreError> {
        Ok(None)
    }

    /// Capture the current session.
    ///
    /// Fails closed: if any part of the session cannot be read, the result is
    /// the anonymous session.
    fn snapshot(&self) -> SessionState {
        let read = || -> Result<SessionState, StoreError> {
            if !self.is_authenticated()? {
                return Ok(SessionState::anonymous());
            }
            Ok(SessionState {
                authenticated: true,
                roles: self.roles()?,
                tos: self.tos_status()?,
                user: self.user()?,
            })
        };

        read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "auth store unreadable; treating session as signed out");
            SessionState::anonymous()
        })
    }
}

/// User profile returned by the backend alongside the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,

    /// Raw terms-of-service status (`ACCEPTED`, `NOT_ACCEPTED`, ...).
    #[serde(rename = "acceptedToS", default)]
    pub accepted_tos: Option<String>,
}

#[derive(Debug, Clone)]
struct SignedIn {
    claims: SessionClaims,
    profile: UserProfile,
}

#[derive(Debug, Default)]
struct Inner {
    signed_in: Option<SignedIn>,
    /// Set when the user accepts the terms during this session; wins over the profile.
    accepted_tos: Option<TosStatus>,
}

/// Process-wide in-memory store.
///
/// Starts signed out. Mutated by [`login`](Self::login), [`logout`](Self::logout)
/// and [`accept_tos`](Self::accept_tos); read by navigation through [`AuthStore`].
#[derive(Debug, Default)]
pub struct InMemoryAuthStore {
    inner: RwLock<Inner>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))
    }

    /// Sign in with already-decoded token claims.
    ///
    /// Claims outside their validity window are rejected and the store stays
    /// signed out.
    pub fn login(&self, claims: SessionClaims, profile: UserProfile) -> Result<(), LoginError> {
        self.login_at(claims, profile, Utc::now())
    }

    pub fn login_at(
        &self,
        claims: SessionClaims,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<(), LoginError> {
        validate_claims(&claims, now)?;
        let mut inner = self.write()?;
        tracing::info!(user = %claims.sub, "signed in");
        inner.signed_in = Some(SignedIn { claims, profile });
        inner.accepted_tos = None;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if let Some(previous) = inner.signed_in.take() {
            tracing::info!(user = %previous.claims.sub, "signed out");
        }
        inner.accepted_tos = None;
        Ok(())
    }

    /// Record that the signed-in user accepted the terms of service.
    ///
    /// No-op when signed out.
    pub fn accept_tos(&self) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.signed_in.is_some() {
            inner.accepted_tos = Some(TosStatus::Accepted);
        }
        Ok(())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> Result<bool, StoreError> {
        Ok(self.read()?.active_at(now).is_some())
    }

    /// Capture the session as of `now`, reading the store once.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Result<SessionState, StoreError> {
        let inner = self.read()?;
        let Some(signed_in) = inner.active_at(now) else {
            return Ok(SessionState::anonymous());
        };
        Ok(SessionState {
            authenticated: true,
            roles: RoleSet::parse_lenient(&signed_in.claims.roles),
            tos: inner.tos_status(),
            user: Some(signed_in.profile.id),
        })
    }
}

impl Inner {
    /// The signed-in session, if its token is valid at `now`.
    fn active_at(&self, now: DateTime<Utc>) -> Option<&SignedIn> {
        self.signed_in
            .as_ref()
            .filter(|s| validate_claims(&s.claims, now).is_ok())
    }

    fn tos_status(&self) -> TosStatus {
        if let Some(status) = self.accepted_tos {
            return status;
        }
        self.signed_in
            .as_ref()
            .map(|s| TosStatus::from_wire(s.profile.accepted_tos.as_deref()))
            .unwrap_or_default()
    }
}

impl AuthStore for InMemoryAuthStore {
    fn is_authenticated(&self) -> Result<bool, StoreError> {
        self.is_authenticated_at(Utc::now())
    }

    fn roles(&self) -> Result<RoleSet, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .signed_in
            .as_ref()
            .map(|s| RoleSet::parse_lenient(&s.claims.roles))
            .unwrap_or_default())
    }

    fn tos_status(&self) -> Result<TosStatus, StoreError> {
        Ok(self.read()?.tos_status())
    }

    fn user(&self) -> Result<Option<UserId>, StoreError> {
        Ok(self.read()?.signed_in.as_ref().map(|s| s.profile.id))
    }

    /// One read of the lock, so a concurrent login or logout is seen
    /// entirely or not at all.
    fn snapshot(&self) -> SessionState {
        self.snapshot_at(Utc::now()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "auth store unreadable; treating session as signed out");
            SessionState::anonymous()
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error(transparent)]
    Token(#[from] TokenValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
