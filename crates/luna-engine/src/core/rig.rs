//! The body subtree for the selected variant and the spins that drive it.

use glam::Vec3;

use crate::api::config::{BodyLayout, ViewerConfig};
use crate::api::types::{NodeId, SceneVariant};
use crate::components::node::BodyKind;
use crate::core::builder::SceneBuilder;
use crate::core::scene::SceneGraph;
use crate::systems::spin::{OrbitPivot, SpinDriver, SpinSource};

pub struct BodyRig {
    variant: SceneVariant,
    layout: BodyLayout,
    /// Subtrees hung under the world root; removing these removes the rig.
    attached: Vec<NodeId>,
    primary: NodeId,
    spins: Vec<SpinDriver>,
    pivot: Option<OrbitPivot>,
}

impl BodyRig {
    /// Build the bodies for `config.selected` under `world`.
    /// Every spin starts at rest.
    pub fn build<B: SceneBuilder>(
        builder: &mut B,
        scene: &mut SceneGraph,
        world: NodeId,
        config: &ViewerConfig,
    ) -> Self {
        let variant = config.selected;
        let segments = config.segments;
        let mut attached = Vec::new();
        let mut spins = Vec::new();
        let mut pivot = None;

        let primary = match variant {
            SceneVariant::SingleBody => {
                let radius = config.single_body_radius();
                let moon = scene.insert(
                    Some(world),
                    builder.build_body(BodyKind::Moon, radius, segments, 1.0),
                );
                if config.show_axis {
                    scene.insert(Some(moon), builder.build_axis(radius));
                }
                spins.push(SpinDriver::new(moon, SpinSource::Moon, config));
                attached.push(moon);
                moon
            }
            SceneVariant::CompositeSystem => {
                let earth_radius = config.earth_radius();
                let earth = scene.insert(
                    Some(world),
                    builder.build_body(BodyKind::Earth, earth_radius, segments, 1.0),
                );
                let clouds = scene.insert(
                    Some(earth),
                    builder.build_body(
                        BodyKind::Clouds,
                        config.clouds_radius(),
                        segments,
                        config.clouds.clouds_opacity,
                    ),
                );

                let pivot_node = scene.insert(
                    Some(world),
                    builder.build_orbit_pivot(config.moon.moon_orbit_tilt),
                );
                let moon_radius = config.moon_radius();
                let moon = scene.insert(
                    Some(pivot_node),
                    builder
                        .build_body(BodyKind::Moon, moon_radius, segments, 1.0)
                        .with_translation(Vec3::new(config.moon_distance(), 0.0, 0.0)),
                );

                if config.show_axis {
                    scene.insert(Some(earth), builder.build_axis(earth_radius));
                    scene.insert(Some(moon), builder.build_axis(moon_radius));
                }

                spins.push(SpinDriver::new(earth, SpinSource::Earth, config));
                spins.push(SpinDriver::new(clouds, SpinSource::Clouds, config));
                spins.push(SpinDriver::new(moon, SpinSource::Moon, config));
                pivot = Some(OrbitPivot::new(pivot_node, config));
                attached.push(earth);
                attached.push(pivot_node);
                earth
            }
        };

        log::debug!(
            "built {} rig: {} spins, {} scene nodes",
            variant.as_str(),
            spins.len(),
            scene.len()
        );

        Self {
            variant,
            layout: config.body_layout(),
            attached,
            primary,
            spins,
            pivot,
        }
    }

    /// Remove every node this rig created.
    pub fn teardown(&self, scene: &mut SceneGraph) {
        for &id in &self.attached {
            scene.remove(id);
        }
    }

    /// Follow new rate targets. Current rates are kept and ease over.
    pub fn retarget(&mut self, config: &ViewerConfig) {
        for driver in &mut self.spins {
            driver.retarget(config);
        }
        if let Some(pivot) = &mut self.pivot {
            pivot.speed = config.moon.moon_orbit_speed;
        }
    }

    /// Continue from the spin rates and orbit angle of a rig this one replaces.
    pub fn carry_rates_from(&mut self, old: &BodyRig) {
        for driver in &mut self.spins {
            if let Some(prev) = old.spins.iter().find(|d| d.source == driver.source) {
                driver.spin.rate = prev.spin.rate;
            }
        }
        if let (Some(pivot), Some(prev)) = (&mut self.pivot, &old.pivot) {
            pivot.angle = prev.angle;
        }
    }

    /// One frame of self-rotation and orbital motion.
    pub fn animate(&mut self, scene: &mut SceneGraph) {
        for driver in &mut self.spins {
            let rate = driver.spin.step();
            if let Some(node) = scene.get_mut(driver.node) {
                node.transform.rotate_local_y(-rate);
            }
        }
        if let Some(pivot) = &mut self.pivot {
            pivot.advance();
            if let Some(node) = scene.get_mut(pivot.node) {
                node.transform.rotation = pivot.rotation();
            }
        }
    }

    pub fn variant(&self) -> SceneVariant {
        self.variant
    }

    pub fn layout(&self) -> &BodyLayout {
        &self.layout
    }

    pub fn primary(&self) -> NodeId {
        self.primary
    }

    pub fn spins(&self) -> &[SpinDriver] {
        &self.spins
    }

    pub fn pivot(&self) -> Option<&OrbitPivot> {
        self.pivot.as_ref()
    }

    /// Ids of the body nodes, spin order.
    pub fn body_nodes(&self) -> Vec<NodeId> {
        self.spins.iter().map(|d| d.node).collect()
    }
}
