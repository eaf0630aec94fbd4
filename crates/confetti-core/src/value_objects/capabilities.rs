//! Capability flags granted to channel members by their role

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// What a member may do inside a channel.
    ///
    /// Roles map to fixed capability sets (see [`crate::MemberRole::capabilities`]);
    /// handlers ask for a capability, never compare roles directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Read the channel's posts and member list
        const READ_CONTENT   = 1 << 0;
        /// Publish posts in the channel
        const CREATE_POST    = 1 << 1;
        /// Rename the channel, change its handle or image
        const UPDATE_CHANNEL = 1 << 2;
        /// Delete the channel with everything in it
        const DELETE_CHANNEL = 1 << 3;

        /// Granted to every member
        const MEMBER = Self::READ_CONTENT.bits() | Self::CREATE_POST.bits();

        /// The "admin or moderator" set
        const STAFF = Self::MEMBER.bits() | Self::UPDATE_CHANNEL.bits();

        /// Channel administrators hold everything
        const ALL = Self::STAFF.bits() | Self::DELETE_CHANNEL.bits();
    }
}

impl Capabilities {
    #[inline]
    pub fn allows(&self, required: Capabilities) -> bool {
        self.contains(required)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::empty()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join("|"))
    }
}
