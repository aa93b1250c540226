use ash::vk;

use crate::family::FamilyInfo;

///The four responsibilities a device queue can take over. Every role has to be
/// bound to a concrete `(family, queue index)` pair before the logical device
/// is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Graphics,
    Compute,
    Transfer,
    Present,
}

impl Role {
    ///Fixed resolution order. Graphics goes first since it usually has the
    /// richest family choice on real hardware.
    pub const ALL: [Role; 4] = [
        Role::Graphics,
        Role::Compute,
        Role::Transfer,
        Role::Present,
    ];

    pub(crate) fn idx(self) -> usize {
        self as usize
    }

    ///Peers that need a queue index of their own whenever they end up on the
    /// same family as `self`.
    pub(crate) fn bump_peers(self) -> &'static [Role] {
        match self {
            Role::Graphics => &[Role::Compute, Role::Transfer],
            Role::Compute => &[Role::Graphics, Role::Transfer, Role::Present],
            Role::Transfer => &[Role::Graphics, Role::Compute, Role::Present],
            Role::Present => &[Role::Compute, Role::Transfer],
        }
    }

    ///Peers that may ride on the exact same queue. Presenting does not need a
    /// slot of its own next to graphics work in the same family.
    pub(crate) fn share_peers(self) -> &'static [Role] {
        match self {
            Role::Graphics => &[Role::Present],
            Role::Present => &[Role::Graphics],
            Role::Compute | Role::Transfer => &[],
        }
    }

    ///Hard requirement a family has to fulfill to be considered for this role
    /// at all.
    pub(crate) fn required(self, family: &FamilyInfo) -> bool {
        match self {
            Role::Graphics => family.flags.contains(vk::QueueFlags::GRAPHICS),
            Role::Compute => family.flags.contains(vk::QueueFlags::COMPUTE),
            Role::Transfer => family.flags.contains(vk::QueueFlags::TRANSFER),
            Role::Present => family.present,
        }
    }

    ///Soft preference on top of [required](Role::required). Families fulfilling
    /// this as well are tried first, which gathers roles on families that can
    /// multiplex them and keeps narrow families free for everyone else.
    pub(crate) fn preferred(self, family: &FamilyInfo) -> bool {
        match self {
            Role::Graphics => family.flags.contains(vk::QueueFlags::COMPUTE),
            Role::Compute => {
                family
                    .flags
                    .intersects(vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER)
                    || family.present
            }
            Role::Transfer => {
                family
                    .flags
                    .intersects(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE)
                    || family.present
            }
            Role::Present => family
                .flags
                .intersects(vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_relations_are_symmetric() {
        for role in Role::ALL {
            for peer in role.bump_peers() {
                assert!(
                    peer.bump_peers().contains(&role),
                    "{:?} bumps {:?} but not the other way around",
                    role,
                    peer
                );
            }
            for peer in role.share_peers() {
                assert!(
                    peer.share_peers().contains(&role),
                    "{:?} shares with {:?} but not the other way around",
                    role,
                    peer
                );
            }
        }
    }

    #[test]
    fn peer_relations_are_disjoint() {
        for role in Role::ALL {
            assert!(!role.bump_peers().contains(&role));
            assert!(!role.share_peers().contains(&role));
            for peer in role.bump_peers() {
                assert!(!role.share_peers().contains(peer));
            }
        }
    }
}
