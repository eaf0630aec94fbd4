//! Authorization rules
//!
//! Pure functions answering "may this member do X in this channel", given the caller's
//! membership record (or its absence). No I/O happens here; services load the
//! membership and then ask.

use crate::entities::Membership;
use crate::error::DomainError;
use crate::value_objects::Capabilities;

/// Channel-scoped actions that require a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelAction {
    /// Read posts or the member list
    ReadContent,
    CreatePost,
    /// Change name, handle or image
    UpdateChannel,
    DeleteChannel,
}

impl ChannelAction {
    /// Capabilities a membership must hold for this action
    pub fn required(self) -> Capabilities {
        match self {
            Self::ReadContent => Capabilities::READ_CONTENT,
            Self::CreatePost => Capabilities::CREATE_POST,
            Self::UpdateChannel => Capabilities::UPDATE_CHANNEL,
            Self::DeleteChannel => Capabilities::DELETE_CHANNEL,
        }
    }

    fn denied(self) -> DomainError {
        match self {
            Self::ReadContent | Self::CreatePost => DomainError::NotChannelMember,
            Self::UpdateChannel => DomainError::RequiresAdminOrModerator,
            Self::DeleteChannel => DomainError::RequiresAdmin,
        }
    }
}

/// Check that `membership` permits `action`.
///
/// A missing membership is always a denial with the action's reason.
pub fn authorize(action: ChannelAction, membership: Option<&Membership>) -> Result<(), DomainError> {
    match membership {
        Some(m) if m.capabilities().allows(action.required()) => Ok(()),
        _ => Err(action.denied()),
    }
}

/// Check that a member may give up their seat.
///
/// `admin_count` is the number of ADMIN memberships currently in the channel,
/// including `membership` itself when it is one.
pub fn ensure_can_leave(membership: &Membership, admin_count: i64) -> Result<(), DomainError> {
    if membership.is_admin() && admin_count <= 1 {
        return Err(DomainError::LastAdmin);
    }
    Ok(())
}
