use crate::components::node::Renderable;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{NodeInstance, RenderBuffer};

/// Pack the scene and camera into `buffer`.
///
/// Nodes are written parents first with their world matrices. Star data is
/// only copied when the starfield node changed since the last call.
pub fn build_render_buffer(scene: &SceneGraph, camera: &PerspectiveCamera, buffer: &mut RenderBuffer) {
    buffer.clear_nodes();
    buffer.camera = camera.uniform();

    let mut starfield = None;
    scene.walk(|node, world| {
        buffer.push(NodeInstance::from_node(node, world.to_cols_array()));
        if matches!(node.renderable, Renderable::Points(_)) {
            starfield = Some(node.id);
        }
    });

    if starfield != buffer.star_source {
        match starfield.and_then(|id| scene.get(id)).map(|n| &n.renderable) {
            Some(Renderable::Points(stars)) => buffer.replace_stars(stars),
            _ => buffer.replace_stars(&[]),
        }
        buffer.star_source = starfield;
    }

    let header = &mut buffer.header;
    header.node_count = buffer.nodes.len() as f32;
    header.star_count = buffer.stars.len() as f32;
    header.star_generation = buffer.star_generation as f32;
    header.viewport_width = camera.viewport[0];
    header.viewport_height = camera.viewport[1];
    header.camera_distance = camera.distance;
}
