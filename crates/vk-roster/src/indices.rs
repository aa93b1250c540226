use crate::{queue::QueueBuilder, roles::Role};

///One claimed queue: the family it lives in, the family's capacity and the
/// queue index the role got inside the family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueSlot {
    ///Index of the family in the device's queue family table.
    pub family: u32,
    ///Capacity of the family, copied from its descriptor.
    pub queue_count: u32,
    ///0-based index of the claimed queue inside the family.
    pub queue_index: u32,
}

///The resolved role assignment of one physical device. Produced by
/// [QueueFamilyIndices::resolve](QueueFamilyIndices::resolve).
///
/// An incomplete value marks the device as unsuitable. It is a valid result to
/// inspect, but must never be turned into queue create infos or queue handles.
/// Once complete, the assignment is immutable for the lifetime of the logical
/// device, so callers can cache whatever they derive from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<QueueSlot>,
    pub compute: Option<QueueSlot>,
    pub transfer: Option<QueueSlot>,
    pub present: Option<QueueSlot>,
}

impl QueueFamilyIndices {
    ///True if every role holds a queue slot.
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some()
            && self.compute.is_some()
            && self.transfer.is_some()
            && self.present.is_some()
    }

    pub fn get(&self, role: Role) -> Option<&QueueSlot> {
        match role {
            Role::Graphics => self.graphics.as_ref(),
            Role::Compute => self.compute.as_ref(),
            Role::Transfer => self.transfer.as_ref(),
            Role::Present => self.present.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, role: Role, slot: QueueSlot) {
        match role {
            Role::Graphics => self.graphics = Some(slot),
            Role::Compute => self.compute = Some(slot),
            Role::Transfer => self.transfer = Some(slot),
            Role::Present => self.present = Some(slot),
        }
    }

    ///All resolved roles with their slots, in role order.
    pub fn resolved(&self) -> impl Iterator<Item = (Role, &QueueSlot)> + '_ {
        Role::ALL
            .iter()
            .filter_map(|role| self.get(*role).map(|slot| (*role, slot)))
    }

    ///Folds the assignment into the minimal set of queue create requests: one
    /// builder per distinct family, each asking for enough queues to cover the
    /// highest index claimed on that family. Every queue gets `priority`.
    ///
    /// # Panics
    /// Panics if the assignment is not complete. Incomplete devices are
    /// filtered out during selection, so reaching this with one is a caller
    /// bug.
    pub fn queue_builders(&self, priority: f32) -> Vec<QueueBuilder> {
        assert!(
            self.is_complete(),
            "queue create infos requested for an incomplete role assignment"
        );

        let mut builders: Vec<QueueBuilder> = Vec::new();
        for (_role, slot) in self.resolved() {
            let wanted = slot.queue_index as usize + 1;
            match builders
                .iter_mut()
                .find(|builder| builder.family_index == slot.family)
            {
                Some(builder) => {
                    while builder.priorities.len() < wanted {
                        builder.priorities.push(priority);
                    }
                }
                None => builders.push(QueueBuilder {
                    family_index: slot.family,
                    queue_count: slot.queue_count,
                    priorities: vec![priority; wanted],
                }),
            }
        }

        builders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(family: u32, queue_count: u32, queue_index: u32) -> Option<QueueSlot> {
        Some(QueueSlot {
            family,
            queue_count,
            queue_index,
        })
    }

    #[test]
    fn one_builder_per_family() {
        let indices = QueueFamilyIndices {
            graphics: slot(0, 2, 0),
            compute: slot(1, 1, 0),
            transfer: slot(2, 1, 0),
            present: slot(0, 2, 0),
        };

        let builders = indices.queue_builders(1.0);

        assert_eq!(builders.len(), 3);
        assert_eq!(builders[0].family_index, 0);
        assert_eq!(builders[0].priorities, vec![1.0]);
        assert_eq!(builders[1].family_index, 1);
        assert_eq!(builders[1].priorities, vec![1.0]);
        assert_eq!(builders[2].family_index, 2);
        assert_eq!(builders[2].priorities, vec![1.0]);
    }

    #[test]
    fn builder_covers_highest_claimed_index() {
        let indices = QueueFamilyIndices {
            graphics: slot(0, 4, 0),
            compute: slot(0, 4, 1),
            transfer: slot(0, 4, 2),
            present: slot(0, 4, 0),
        };

        let builders = indices.queue_builders(0.5);

        assert_eq!(builders.len(), 1);
        assert_eq!(builders[0].family_index, 0);
        assert_eq!(builders[0].queue_count, 4);
        assert_eq!(builders[0].priorities, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    #[should_panic(expected = "incomplete role assignment")]
    fn incomplete_assignment_panics() {
        let indices = QueueFamilyIndices {
            graphics: slot(0, 1, 0),
            compute: None,
            transfer: slot(0, 1, 0),
            present: slot(0, 1, 0),
        };
        let _ = indices.queue_builders(1.0);
    }

    #[test]
    fn resolved_iterates_in_role_order() {
        let indices = QueueFamilyIndices {
            graphics: slot(1, 1, 0),
            compute: None,
            transfer: slot(0, 1, 0),
            present: slot(1, 1, 0),
        };

        let roles: Vec<Role> = indices.resolved().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![Role::Graphics, Role::Transfer, Role::Present]);
    }
}
