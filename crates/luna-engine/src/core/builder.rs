//! Node factories for the bodies, lights and starfield.

use glam::{Quat, Vec3};

use crate::api::config::{LightConfig, StarfieldConfig};
use crate::assets::textures::{
    TextureRegistry, EARTH_CLOUDS_MAP, EARTH_COLOR_MAP, MOON_COLOR_MAP, MOON_ELEVATION_MAP,
};
use crate::components::mesh::{LightDesc, MaterialDesc, MeshDesc};
use crate::components::node::{BodyKind, Node, NodeKind, Renderable};
use crate::components::starfield;

/// Axis helper half-length relative to the body radius.
const AXIS_EXTENT: f32 = 1.33;

/// Produces detached nodes; the rig decides where they hang.
///
/// Implementations only describe geometry and materials. Nothing here talks
/// to a GPU.
pub trait SceneBuilder {
    /// A sphere for `kind`. `opacity` only matters for see-through shells.
    fn build_body(&mut self, kind: BodyKind, radius: f32, segments: u32, opacity: f32) -> Node;

    /// Carrier node tilted by `tilt_degrees` about X.
    fn build_orbit_pivot(&mut self, tilt_degrees: f32) -> Node;

    fn build_starfield(&mut self, params: &StarfieldConfig) -> Node;

    /// (point light, ambient light)
    fn build_lights(&mut self, light: &LightConfig) -> (Node, Node);

    /// Rotation-axis line for a body of `radius`.
    fn build_axis(&mut self, radius: f32) -> Node;
}

/// Textured spheres and a seeded starfield.
pub struct StandardBuilder {
    textures: TextureRegistry,
}

impl StandardBuilder {
    pub fn new() -> Self {
        Self {
            textures: TextureRegistry::new(),
        }
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    fn material(&mut self, kind: BodyKind, radius: f32, opacity: f32) -> MaterialDesc {
        match kind {
            BodyKind::Moon => {
                let elevation = self.textures.request(MOON_ELEVATION_MAP);
                // Relief is authored for a unit sphere.
                let relief = 1.0 / radius.max(f32::EPSILON);
                MaterialDesc {
                    color_map: Some(self.textures.request(MOON_COLOR_MAP)),
                    bump_map: Some(elevation),
                    bump_scale: 0.2 * relief,
                    displacement_scale: 0.05 * relief,
                    roughness: 0.7,
                    ..Default::default()
                }
            }
            BodyKind::Earth => MaterialDesc {
                color_map: Some(self.textures.request(EARTH_COLOR_MAP)),
                roughness: 0.6,
                ..Default::default()
            },
            BodyKind::Clouds => MaterialDesc {
                color_map: Some(self.textures.request(EARTH_CLOUDS_MAP)),
                opacity,
                transparent: true,
                depth_write: false,
                ..Default::default()
            },
        }
    }
}

impl Default for StandardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder for StandardBuilder {
    fn build_body(&mut self, kind: BodyKind, radius: f32, segments: u32, opacity: f32) -> Node {
        let material = self.material(kind, radius, opacity);
        let tag = match kind {
            BodyKind::Earth => "earth",
            BodyKind::Moon => "moon",
            BodyKind::Clouds => "clouds",
        };
        Node::new(NodeKind::Body(kind))
            .with_tag(tag)
            .with_renderable(Renderable::Mesh(
                MeshDesc::sphere(radius, segments).with_material(material),
            ))
    }

    fn build_orbit_pivot(&mut self, tilt_degrees: f32) -> Node {
        Node::new(NodeKind::OrbitPivot)
            .with_tag("orbit")
            .with_rotation(Quat::from_rotation_x(tilt_degrees.to_radians()))
    }

    fn build_starfield(&mut self, params: &StarfieldConfig) -> Node {
        let stars = starfield::generate(params);
        log::debug!("starfield: {} stars, seed {}", stars.len(), params.seed);
        Node::new(NodeKind::Starfield)
            .with_tag("starfield")
            .with_renderable(Renderable::Points(stars))
    }

    fn build_lights(&mut self, light: &LightConfig) -> (Node, Node) {
        let point = Node::new(NodeKind::PointLight)
            .with_tag("sun")
            .with_translation(Vec3::from_array(light.position))
            .with_renderable(Renderable::Light(LightDesc {
                color: light.color,
                intensity: light.intensity,
            }));
        let ambient = Node::new(NodeKind::AmbientLight)
            .with_tag("ambient")
            .with_renderable(Renderable::Light(LightDesc {
                color: light.ambient_color,
                intensity: light.ambient_intensity,
            }));
        (point, ambient)
    }

    fn build_axis(&mut self, radius: f32) -> Node {
        Node::new(NodeKind::Axis)
            .with_tag("axis")
            .with_renderable(Renderable::Line {
                length: radius * AXIS_EXTENT,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ViewerConfig;

    #[test]
    fn moon_requests_color_and_elevation() {
        let mut b = StandardBuilder::new();
        let node = b.build_body(BodyKind::Moon, 0.5, 32, 1.0);
        let mesh = node.mesh().copied().unwrap();
        assert_eq!(mesh.radius, 0.5);
        assert!(mesh.material.color_map.is_some());
        assert!(mesh.material.bump_map.is_some());
        assert!((mesh.material.bump_scale - 0.4).abs() < 1e-6);
        assert_eq!(b.textures().len(), 2);
    }

    #[test]
    fn rebuilding_reuses_texture_handles() {
        let mut b = StandardBuilder::new();
        let first = b.build_body(BodyKind::Earth, 1.0, 16, 1.0);
        let second = b.build_body(BodyKind::Earth, 2.0, 16, 1.0);
        assert_eq!(
            first.mesh().unwrap().material.color_map,
            second.mesh().unwrap().material.color_map
        );
        assert_eq!(b.textures().len(), 1);
    }

    #[test]
    fn clouds_are_see_through() {
        let mut b = StandardBuilder::new();
        let node = b.build_body(BodyKind::Clouds, 1.0, 16, 0.8);
        let material = node.mesh().unwrap().material;
        assert!(material.transparent);
        assert!(!material.depth_write);
        assert_eq!(material.opacity, 0.8);
    }

    #[test]
    fn pivot_is_tilted_about_x() {
        let mut b = StandardBuilder::new();
        let pivot = b.build_orbit_pivot(90.0);
        let up = pivot.transform.rotation * Vec3::Y;
        assert!((up - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn lights_follow_config() {
        let config = ViewerConfig::default();
        let mut b = StandardBuilder::new();
        let (point, ambient) = b.build_lights(&config.light);
        assert_eq!(point.transform.translation, Vec3::new(5.0, 2.0, 5.0));
        assert_eq!(
            point.renderable,
            Renderable::Light(LightDesc { color: config.light.color, intensity: 70.0 })
        );
        assert_eq!(ambient.kind, NodeKind::AmbientLight);
    }

    #[test]
    fn axis_overshoots_the_body() {
        let mut b = StandardBuilder::new();
        let axis = b.build_axis(2.0);
        assert_eq!(axis.renderable, Renderable::Line { length: 2.66 });
    }
}
