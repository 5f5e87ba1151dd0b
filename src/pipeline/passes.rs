use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::context::RenderContext;
use crate::scene::scene_object::SceneObject;
use nalgebra::Vector3;

/// Clears the target and draws every object with the Phong shader.
///
/// Opaque objects go first so translucent ones blend over a complete
/// depth buffer.
pub fn render_main_pass(context: &RenderContext, renderer: &mut Renderer, background: Vector3<f32>) {
    renderer.clear(background);

    let view = context.camera.view_matrix();
    let projection = context
        .projection
        .matrix(renderer.framebuffer.aspect_ratio());
    let eye = context.camera.eye_position();

    let (opaque, translucent): (Vec<&SceneObject>, Vec<&SceneObject>) = context
        .scene_objects
        .iter()
        .partition(|obj| obj.material.is_opaque());

    for obj in opaque.into_iter().chain(translucent) {
        let shader = PhongShader::new(
            obj.transform,
            &view,
            &projection,
            eye,
            &context.light,
            &obj.material,
        );
        renderer.draw_mesh(&obj.mesh, &shader);
    }
}
