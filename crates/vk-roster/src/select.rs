use ash::vk;

use crate::{error::SelectError, family::FamilyInfo, indices::QueueFamilyIndices};

///Everything device selection looks at for one physical device.
#[derive(Clone, Debug)]
pub struct DeviceCandidate {
    ///The raw handle, kept so the winner can be used for device creation.
    pub physical_device: vk::PhysicalDevice,
    ///The device's queue family table, see [FamilyInfo].
    pub families: Vec<FamilyInfo>,
    pub device_type: vk::PhysicalDeviceType,
    ///Upper bound for 2d image extents, used as a coarse quality signal.
    pub max_image_dimension2_d: u32,
}

impl DeviceCandidate {
    ///Queries `physical_device` for everything selection needs.
    pub fn query(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        surface_loader: &ash::khr::surface::Instance,
        surface: vk::SurfaceKHR,
    ) -> DeviceCandidate {
        let properties = unsafe { instance.get_physical_device_properties(physical_device) };

        DeviceCandidate {
            physical_device,
            families: FamilyInfo::query(instance, physical_device, surface_loader, surface),
            device_type: properties.device_type,
            max_image_dimension2_d: properties.limits.max_image_dimension2_d,
        }
    }

    ///Resolves the queue roles on this device and rates the result. `None`
    /// marks the device as unsuitable, which is an expected outcome during
    /// enumeration, not an error.
    ///
    /// Discrete GPUs outrank everything else. Compute and transfer on families
    /// of their own get a bonus each since that is what allows genuinely
    /// asynchronous compute and copy work.
    pub fn suitability(&self) -> Option<(QueueFamilyIndices, u32)> {
        let indices = QueueFamilyIndices::resolve(&self.families);
        if !indices.is_complete() {
            return None;
        }
        let (graphics, compute, transfer) =
            match (&indices.graphics, &indices.compute, &indices.transfer) {
                (Some(graphics), Some(compute), Some(transfer)) => {
                    (graphics.family, compute.family, transfer.family)
                }
                _ => return None,
            };

        let mut score = 0;
        if self.device_type == vk::PhysicalDeviceType::DISCRETE_GPU {
            score += 1000;
        }
        if compute != graphics {
            score += 200;
        }
        if transfer != graphics && transfer != compute {
            score += 200;
        }
        score += self.max_image_dimension2_d;

        Some((indices, score))
    }
}

///The winner of device selection.
#[derive(Clone, Debug)]
pub struct SelectedDevice {
    pub candidate: DeviceCandidate,
    pub indices: QueueFamilyIndices,
    pub score: u32,
}

///Picks the highest scoring suitable device. Ties keep the earlier candidate,
/// so for a fixed enumeration order the choice is stable.
pub fn pick_best(candidates: Vec<DeviceCandidate>) -> Result<SelectedDevice, SelectError> {
    let mut best: Option<SelectedDevice> = None;
    for candidate in candidates {
        let Some((indices, score)) = candidate.suitability() else {
            #[cfg(feature = "logging")]
            log::debug!(
                "physical device {:?} can not serve all queue roles, skipping",
                candidate.physical_device
            );
            continue;
        };

        #[cfg(feature = "logging")]
        log::info!(
            "physical device {:?} rated {}",
            candidate.physical_device,
            score
        );

        if best.as_ref().map_or(true, |best| score > best.score) {
            best = Some(SelectedDevice {
                candidate,
                indices,
                score,
            });
        }
    }

    best.ok_or(SelectError::NoSuitableDevice)
}

///Enumerates all physical devices of `instance` and picks the best one for
/// the given surface.
pub fn pick_physical_device(
    instance: &ash::Instance,
    surface_loader: &ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
) -> Result<SelectedDevice, SelectError> {
    let devices = unsafe { instance.enumerate_physical_devices() }?;
    let candidates = devices
        .into_iter()
        .map(|physical_device| {
            DeviceCandidate::query(instance, physical_device, surface_loader, surface)
        })
        .collect();

    pick_best(candidates)
}
