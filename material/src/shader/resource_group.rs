//! Shader resource group: the per-material constant block and image slots a
//! runtime functor may write.

use std::sync::Arc;

use bytemuck::Pod;
use redlilium_core::material::ImageRef;

const CONSTANT_ALIGNMENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConstantDescriptor {
    name: String,
    offset: usize,
    size: usize,
}

/// Named constants and image slots of a resource group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderResourceGroupLayout {
    constants: Vec<ConstantDescriptor>,
    images: Vec<String>,
    constant_data_size: usize,
}

impl ShaderResourceGroupLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constant of type `T`, 4-byte aligned.
    #[must_use]
    pub fn with_constant<T: Pod>(mut self, name: impl Into<String>) -> Self {
        let offset = self.constant_data_size.next_multiple_of(CONSTANT_ALIGNMENT);
        let size = std::mem::size_of::<T>();
        self.constants.push(ConstantDescriptor {
            name: name.into(),
            offset,
            size,
        });
        self.constant_data_size = offset + size;
        self
    }

    #[must_use]
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.images.push(name.into());
        self
    }

    /// Total size of the constant block in bytes.
    pub fn constant_data_size(&self) -> usize {
        self.constant_data_size
    }

    fn find_constant(&self, name: &str) -> Option<&ConstantDescriptor> {
        self.constants.iter().find(|c| c.name == name)
    }

    fn find_image(&self, name: &str) -> Option<usize> {
        self.images.iter().position(|n| n == name)
    }
}

/// Constant data and bound images for one material instance.
#[derive(Debug, Clone)]
pub struct ShaderResourceGroup {
    layout: Arc<ShaderResourceGroupLayout>,
    constant_data: Vec<u8>,
    images: Vec<Option<ImageRef>>,
}

impl ShaderResourceGroup {
    /// Create a group with zeroed constants and no images bound.
    pub fn new(layout: Arc<ShaderResourceGroupLayout>) -> Self {
        Self {
            constant_data: vec![0; layout.constant_data_size],
            images: vec![None; layout.images.len()],
            layout,
        }
    }

    pub fn layout(&self) -> &Arc<ShaderResourceGroupLayout> {
        &self.layout
    }

    /// Raw constant block.
    pub fn constant_data(&self) -> &[u8] {
        &self.constant_data
    }

    /// Write constant `name`. Fails if it is unknown or `T` has the wrong size.
    pub fn set_constant<T: Pod>(&mut self, name: &str, value: &T) -> bool {
        let Some(constant) = self.layout.find_constant(name) else {
            log::error!("Shader resource group has no constant '{name}'.");
            return false;
        };
        let bytes = bytemuck::bytes_of(value);
        if bytes.len() != constant.size {
            log::error!(
                "Constant '{}' is {} bytes, got {}.",
                name,
                constant.size,
                bytes.len()
            );
            return false;
        }
        let range = constant.offset..constant.offset + constant.size;
        self.constant_data[range].copy_from_slice(bytes);
        true
    }

    /// Read constant `name` back as `T`.
    pub fn constant<T: Pod>(&self, name: &str) -> Option<T> {
        let constant = self.layout.find_constant(name)?;
        if constant.size != std::mem::size_of::<T>() {
            return None;
        }
        let bytes = &self.constant_data[constant.offset..constant.offset + constant.size];
        Some(bytemuck::pod_read_unaligned(bytes))
    }

    /// Bind (or unbind, with `None`) image slot `name`.
    pub fn set_image(&mut self, name: &str, image: Option<ImageRef>) -> bool {
        let Some(slot) = self.layout.find_image(name) else {
            log::error!("Shader resource group has no image '{name}'.");
            return false;
        };
        self.images[slot] = image;
        true
    }

    pub fn image(&self, name: &str) -> Option<&ImageRef> {
        self.images[self.layout.find_image(name)?].as_ref()
    }
}
