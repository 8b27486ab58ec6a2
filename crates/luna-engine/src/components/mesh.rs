//! Geometry, material and light descriptors.
//!
//! These describe what to draw. The host renderer turns them into real GPU
//! meshes and materials.

use crate::assets::textures::TextureId;

/// Surface parameters for a sphere mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color_map: Option<TextureId>,
    /// Greyscale elevation used as bump and displacement source.
    pub bump_map: Option<TextureId>,
    pub bump_scale: f32,
    pub displacement_scale: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    /// 0 = mirror, 1 = fully diffuse.
    pub roughness: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color_map: None,
            bump_map: None,
            bump_scale: 0.0,
            displacement_scale: 0.0,
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            roughness: 1.0,
        }
    }
}

/// A UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDesc {
    pub radius: f32,
    /// Width and height segment count.
    pub segments: u32,
    pub material: MaterialDesc,
}

impl MeshDesc {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self {
            radius,
            segments,
            material: MaterialDesc::default(),
        }
    }

    pub fn with_material(mut self, material: MaterialDesc) -> Self {
        self.material = material;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDesc {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_opaque() {
        let m = MaterialDesc::default();
        assert_eq!(m.opacity, 1.0);
        assert!(!m.transparent);
        assert!(m.depth_write);
        assert!(m.color_map.is_none());
    }

    #[test]
    fn sphere_builder() {
        let mesh = MeshDesc::sphere(2.0, 32).with_material(MaterialDesc {
            opacity: 0.5,
            transparent: true,
            ..Default::default()
        });
        assert_eq!(mesh.radius, 2.0);
        assert_eq!(mesh.segments, 32);
        assert!(mesh.material.transparent);
    }
}
