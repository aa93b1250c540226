use ash::vk;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("No physical device can serve all queue roles. Is a Vulkan capable GPU and driver installed?")]
    NoSuitableDevice,
    #[error("Vulkan error: {0}")]
    VkError(#[from] vk::Result),
}

#[cfg(test)]
mod test {
    use static_assertions::assert_impl_all;

    use crate::SelectError;

    #[test]
    fn assure_send_sync() {
        assert_impl_all!(SelectError: Send, Sync);
    }
}
