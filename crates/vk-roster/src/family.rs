use ash::vk;

///Properties of one queue family, reduced to what role assignment looks at.
///
/// Usually acquired per physical device via [FamilyInfo::query], or built from
/// an already fetched property table with [FamilyInfo::from_properties]. The
/// surface support answer is evaluated once, up front, and stored in `present`
/// so the assignment search itself never touches Vulkan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyInfo {
    ///Position of the family in the device's queue family table.
    pub index: u32,
    pub flags: vk::QueueFlags,
    ///How many queues can be created from this family at most.
    pub queue_count: u32,
    ///Whether queues of this family can present to the surface in question.
    pub present: bool,
}

impl FamilyInfo {
    ///Builds the family table from raw queue family properties.
    /// `present_support` is asked once per family, keyed by the family index.
    pub fn from_properties(
        properties: &[vk::QueueFamilyProperties],
        mut present_support: impl FnMut(u32) -> bool,
    ) -> Vec<FamilyInfo> {
        properties
            .iter()
            .enumerate()
            .map(|(index, properties)| FamilyInfo {
                index: index as u32,
                flags: properties.queue_flags,
                queue_count: properties.queue_count,
                present: present_support(index as u32),
            })
            .collect()
    }

    ///Queries the full family table of `physical_device`, including surface
    /// support per family. A failed surface query counts as "can not present"
    /// on that family.
    pub fn query(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        surface_loader: &ash::khr::surface::Instance,
        surface: vk::SurfaceKHR,
    ) -> Vec<FamilyInfo> {
        let properties =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) };

        Self::from_properties(&properties, |family| {
            match unsafe {
                surface_loader.get_physical_device_surface_support(physical_device, family, surface)
            } {
                Ok(support) => support,
                Err(_error) => {
                    #[cfg(feature = "logging")]
                    log::warn!(
                        "Failed to query surface support on queue family {}: {}",
                        family,
                        _error
                    );
                    false
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keeps_order_and_asks_per_family() {
        let properties = [
            vk::QueueFamilyProperties {
                queue_flags: vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
                queue_count: 4,
                ..Default::default()
            },
            vk::QueueFamilyProperties {
                queue_flags: vk::QueueFlags::TRANSFER,
                queue_count: 1,
                ..Default::default()
            },
        ];

        let families = FamilyInfo::from_properties(&properties, |family| family == 1);

        assert_eq!(families.len(), 2);
        assert_eq!(families[0].index, 0);
        assert_eq!(families[0].queue_count, 4);
        assert!(!families[0].present);
        assert_eq!(families[1].index, 1);
        assert_eq!(families[1].flags, vk::QueueFlags::TRANSFER);
        assert!(families[1].present);
    }
}
