//! # vk-roster
//!
//! Helper around [ash](ash) that answers one question of device setup: which
//! queue family, and which queue inside it, should carry the graphics,
//! compute, transfer and present work.
//!
//! Families differ wildly between devices. Some expose one family that can do
//! everything a couple of times, others expose narrow dedicated families next
//! to a broad one. The resolver searches the family table for an assignment
//! that gives every role a queue, never asks a family for more queues than it
//! has, and lets presenting share the graphics queue where the family allows
//! it. Devices on which no full assignment exists are reported as incomplete,
//! which selection treats as "not suitable", never as an error.
//!
//! # Usage
//!
//! The usual flow:
//! 1. gather a [DeviceCandidate](select::DeviceCandidate) per physical device
//!    via [DeviceCandidate::query](select::DeviceCandidate::query), or build
//!    [FamilyInfo] tables by hand,
//! 2. let [pick_best](select::pick_best) (or
//!    [pick_physical_device](select::pick_physical_device)) choose the device
//!    and keep the returned [QueueFamilyIndices],
//! 3. feed [queue_builders](QueueFamilyIndices::queue_builders) into your
//!    `DeviceCreateInfo`, and once the device exists fetch the handles with
//!    [RoleQueues::fetch](queue::RoleQueues::fetch).
//!
//! Everything outside the two query helpers is plain data in, plain data out,
//! and never talks to Vulkan.

pub use ash;

///Queue family descriptors, reduced to what role assignment looks at.
pub mod family;
///The assignment result and its conversion into queue create requests.
pub mod indices;
///Queue create requests and fetched queue handles.
pub mod queue;
///The search that binds roles to families.
mod resolve;
///The four queue roles and their fixed relations.
pub mod roles;
///Physical device suitability, scoring and selection.
pub mod select;

mod error;
pub use error::SelectError;

pub use family::FamilyInfo;
pub use indices::{QueueFamilyIndices, QueueSlot};
pub use roles::Role;

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    #[test]
    fn impl_send_sync() {
        assert_impl_all!(QueueFamilyIndices: Send, Sync);
        assert_impl_all!(FamilyInfo: Send, Sync);
        assert_impl_all!(queue::QueueBuilder: Send, Sync);
        assert_impl_all!(select::DeviceCandidate: Send, Sync);
    }
}
