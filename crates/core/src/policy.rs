//! Single authorization gate for resource access.
//!
//! Every handler that touches an owned resource funnels through
//! [`authorize`] with the acting user, the attempted action, and the set of
//! user ids that own the resource. Role checks for whole route groups
//! (owner-only, admin-only) live in the API layer's extractors; this module
//! decides per-resource access.

use crate::error::CoreError;
use crate::roles::ROLE_SUPER_ADMIN;
use crate::types::DbId;

/// An authenticated principal as carried by the session token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == ROLE_SUPER_ADMIN
    }
}

/// What an actor is trying to do to a resource. Only used for error
/// messages; the access rule is the same for every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Update,
    Delete,
    Cancel,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Cancel => "cancel",
        }
    }
}

/// Grant when the actor is a super admin or one of the resource's owners.
///
/// `owners` lists every user id with a legitimate claim on the resource:
/// for a playground that is its owner, for a booking both the player who
/// booked and the playground's owner.
pub fn authorize(
    actor: &Actor,
    action: Action,
    entity: &'static str,
    owners: &[DbId],
) -> Result<(), CoreError> {
    if actor.is_super_admin() || owners.contains(&actor.user_id) {
        return Ok(());
    }
    Err(CoreError::Forbidden(format!(
        "You don't have permission to {} this {entity}",
        action.as_str()
    )))
}
