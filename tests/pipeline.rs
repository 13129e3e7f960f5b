use painter3d::prelude::*;

fn unit_cube_at(z: f32) -> Scene {
    let mut scene = Scene::new();
    let mut cube = Model::cube(1.0, Color::rgb(235, 98, 67));
    cube.transform_mut().set_position_xyz(0.0, 0.0, z);
    scene.add(cube);
    scene
}

fn origin_camera(width: u32, height: u32) -> Camera {
    Camera::new(
        Vec3::ZERO,
        Projection::from_degrees(70.0, width as f32 / height as f32, 0.1, 300.0),
    )
}

#[test]
fn cube_in_front_of_camera_draws_visible_faces() {
    let scene = unit_cube_at(4.0);
    let mut list = DrawList::new();
    let stats = Pipeline::new().render(
        &mut list,
        Viewport::full(800, 600),
        &scene,
        &origin_camera(800, 600),
        &DirectionalLight::default(),
        &RenderSettings {
            render_mode: RenderMode::Solid,
            backface_culling: true,
            draw_world_axes: false,
        },
    );

    assert_eq!(stats.object_count, 1);
    assert!((1..=3).contains(&stats.face_count));
    assert_eq!(list.fill_count(), stats.face_count);
    assert_eq!(list.stroke_count(), 0);
}

#[test]
fn projected_face_is_centered_on_screen() {
    let scene = unit_cube_at(4.0);
    let mut pipeline = Pipeline::new();
    pipeline.render(
        &mut DrawList::new(),
        Viewport::full(800, 600),
        &scene,
        &origin_camera(800, 600),
        &DirectionalLight::default(),
        &RenderSettings::default(),
    );

    let face = &pipeline.faces()[0];
    let cx = face.points.iter().map(|p| p.x).sum::<f32>() / face.points.len() as f32;
    let cy = face.points.iter().map(|p| p.y).sum::<f32>() / face.points.len() as f32;
    assert!((cx - 400.0).abs() < 1e-2);
    assert!((cy - 300.0).abs() < 1e-2);
    assert!((face.depth - 3.5).abs() < 1e-4);
}

#[test]
fn nearer_cube_is_painted_last() {
    let mut scene = Scene::new();
    let mut far = Model::cube(1.0, Color::rgb(0, 0, 200)).with_name("far");
    far.transform_mut().set_position_xyz(0.0, 0.0, 10.0);
    let mut near = Model::cube(1.0, Color::rgb(200, 0, 0)).with_name("near");
    near.transform_mut().set_position_xyz(0.0, 0.0, 3.0);
    // Insert near first so ordering comes from depth, not insertion.
    scene.add(near);
    scene.add(far);

    let mut frame = FrameBuffer::new(200, 200);
    let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), 1.0, 0.0);
    Pipeline::new().render(
        &mut frame,
        Viewport::full(200, 200),
        &scene,
        &origin_camera(200, 200),
        &light,
        &RenderSettings {
            draw_world_axes: false,
            ..RenderSettings::default()
        },
    );

    assert_eq!(frame.get_pixel(100, 100), Some(Color::rgb(200, 0, 0)));
    // Outside both cubes only the background remains.
    let corner = frame.get_pixel(0, 0).unwrap();
    assert_ne!(corner, Color::rgb(200, 0, 0));
    assert_ne!(corner, Color::rgb(0, 0, 200));
}

#[test]
fn removing_models_updates_stats() {
    let mut scene = Scene::with_default_models();
    let spawned = scene.add(Model::cube(1.0, Color::WHITE));
    let camera = origin_camera(320, 240);
    let mut pipeline = Pipeline::new();
    let mut render = |scene: &Scene| {
        pipeline.render(
            &mut DrawList::new(),
            Viewport::full(320, 240),
            scene,
            &camera,
            &DirectionalLight::default(),
            &RenderSettings::default(),
        )
    };

    assert_eq!(render(&scene).object_count, 5);
    assert!(scene.remove(spawned));
    assert_eq!(render(&scene).object_count, 4);
    assert!(!scene.remove(spawned));
    assert_eq!(render(&scene).object_count, 4);
}

#[test]
fn empty_scene_draws_background_and_axes_only() {
    let mut list = DrawList::new();
    let mut camera = origin_camera(320, 240);
    camera.set_position(Vec3::new(3.0, 2.0, -4.0));
    camera.look_at(Vec3::ZERO);

    let stats = Pipeline::new().render(
        &mut list,
        Viewport::full(320, 240),
        &Scene::new(),
        &camera,
        &DirectionalLight::default(),
        &RenderSettings::default(),
    );

    assert_eq!(stats, RenderStats::default());
    assert!(matches!(list.commands()[0], DrawCommand::Background { .. }));
    assert_eq!(list.line_count(), 3);
    assert_eq!(list.commands().len(), 4);
}

#[test]
fn headless_app_frame_is_exportable() {
    let mut app = App::new(&AppConfig {
        seed: Some(1),
        ..AppConfig::default()
    });
    let mut frame = FrameBuffer::new(160, 90);
    let stats = app.render(&mut frame, Viewport::full(160, 90));
    assert_eq!(stats.object_count, 4);
    assert!(stats.face_count > 0);

    let image = frame.to_image();
    assert_eq!(image.dimensions(), (160, 90));
}
