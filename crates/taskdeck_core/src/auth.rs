//! Identity consumption for the core.
//!
//! # Responsibility
//! - Hold the user handle supplied by the external identity provider.
//! - Let services fail closed when nobody is signed in.
//!
//! # Invariants
//! - The core never authenticates; it only consumes `CurrentUser`.
//! - Without a user, no store queries are issued.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use uuid::Uuid;

/// Stable identifier of an authenticated user.
pub type UserId = Uuid;

/// Authenticated user handle supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

/// Mutable sign-in state shared by all services on the UI thread.
///
/// Interior mutability keeps the handle updatable from auth callbacks while
/// services hold shared references.
#[derive(Debug, Default)]
pub struct Session {
    user: RefCell<Option<CurrentUser>>,
}

impl Session {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `user`.
    pub fn signed_in(user: CurrentUser) -> Self {
        Self {
            user: RefCell::new(Some(user)),
        }
    }

    /// Replaces the current user handle; `None` signs out.
    pub fn set_user(&self, user: Option<CurrentUser>) {
        *self.user.borrow_mut() = user;
    }

    /// Returns the current user, if any.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.borrow().is_some()
    }
}
