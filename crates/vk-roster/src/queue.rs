use ash::vk;

use crate::{indices::QueueFamilyIndices, roles::Role};

///One queue create request for a single family.
///
/// The priorities vector is owned here so the
/// [create info](QueueBuilder::as_create_info) handed to Vulkan can borrow it.
/// Keep the builders alive until the device is created.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueBuilder {
    ///The family's index.
    pub family_index: u32,
    ///How many queues the family can hand out at most.
    pub queue_count: u32,
    ///The length of this vector determines how many queues are created from
    /// this family, each value is the priority of one queue. See the
    /// [documentation](https://registry.khronos.org/vulkan/specs/latest/man/html/VkDeviceQueueCreateInfo.html)
    /// for how priorities behave.
    pub priorities: Vec<f32>,
}

impl QueueBuilder {
    ///Sets the queue amount that is being created (length of the vector) and
    /// each queue's priority. Requests beyond the family's capacity are cut
    /// off.
    pub fn with_queues(&mut self, mut queue_priorities: Vec<f32>) {
        if queue_priorities.len() > self.queue_count as usize {
            queue_priorities.truncate(self.queue_count as usize);
        }

        self.priorities = queue_priorities;
    }

    pub fn as_create_info(&self) -> vk::DeviceQueueCreateInfo<'_> {
        vk::DeviceQueueCreateInfo::default()
            .queue_family_index(self.family_index)
            .queue_priorities(&self.priorities)
    }
}

///A fetched queue handle together with the identity it was fetched for.
#[derive(Clone, Copy, Debug)]
pub struct Queue {
    pub inner: vk::Queue,
    pub family_index: u32,
    pub queue_index: u32,
}

///The queue handle of every role, fetched once after device creation.
///
/// The identities never change for the lifetime of the device, so this value
/// can be cached freely, e.g. by a frame loop. Roles that share a slot get the
/// same handle.
#[derive(Clone, Copy, Debug)]
pub struct RoleQueues {
    pub graphics: Queue,
    pub compute: Queue,
    pub transfer: Queue,
    pub present: Queue,
}

impl RoleQueues {
    ///Fetches all role queues from `device`.
    ///
    /// # Safety related note
    /// The device must have been created with the create infos derived from
    /// this exact assignment (see
    /// [queue_builders](QueueFamilyIndices::queue_builders)), otherwise the
    /// fetched handles are not valid.
    ///
    /// # Panics
    /// Panics if the assignment is not complete.
    pub fn fetch(device: &ash::Device, indices: &QueueFamilyIndices) -> RoleQueues {
        assert!(
            indices.is_complete(),
            "queues requested for an incomplete role assignment"
        );

        let fetch = |role: Role| {
            let slot = indices.get(role).expect("assignment checked as complete");
            Queue {
                inner: unsafe { device.get_device_queue(slot.family, slot.queue_index) },
                family_index: slot.family,
                queue_index: slot.queue_index,
            }
        };

        RoleQueues {
            graphics: fetch(Role::Graphics),
            compute: fetch(Role::Compute),
            transfer: fetch(Role::Transfer),
            present: fetch(Role::Present),
        }
    }

    pub fn get(&self, role: Role) -> &Queue {
        match role {
            Role::Graphics => &self.graphics,
            Role::Compute => &self.compute,
            Role::Transfer => &self.transfer,
            Role::Present => &self.present,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_queues_respects_family_capacity() {
        let mut builder = QueueBuilder {
            family_index: 3,
            queue_count: 2,
            priorities: vec![1.0],
        };

        builder.with_queues(vec![1.0, 0.5, 0.25, 0.125]);
        assert_eq!(builder.priorities, vec![1.0, 0.5]);

        builder.with_queues(vec![0.75]);
        assert_eq!(builder.priorities, vec![0.75]);
    }

    #[test]
    fn create_info_mirrors_builder() {
        let builder = QueueBuilder {
            family_index: 3,
            queue_count: 4,
            priorities: vec![1.0, 1.0],
        };

        let info = builder.as_create_info();
        assert_eq!(info.queue_family_index, 3);
        assert_eq!(info.queue_count, 2);
    }
}
