//! Flat, ordered collection of independent models.
//!
//! The [`Scene`] owns its models. Each insertion is tagged with a fresh
//! [`ModelId`], which is the identity used for removal. Iteration follows
//! insertion order, which the renderer relies on for stable tie-breaking.

use rand::Rng;
use tracing::debug;

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::model::Model;

/// Identity handle returned by [`Scene::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

#[derive(Debug, Default)]
pub struct Scene {
    models: Vec<(ModelId, Model)>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model and returns its identity.
    pub fn add(&mut self, model: Model) -> ModelId {
        let id = ModelId(self.next_id);
        self.next_id += 1;
        debug!(?id, name = model.name(), "model added");
        self.models.push((id, model));
        id
    }

    /// Removes the model with this identity. Returns `false` when it is not in
    /// the scene, leaving the scene untouched.
    pub fn remove(&mut self, id: ModelId) -> bool {
        match self.models.iter().position(|(other, _)| *other == id) {
            Some(index) => {
                let (_, model) = self.models.remove(index);
                debug!(?id, name = model.name(), "model removed");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.models.iter().any(|(other, _)| *other == id)
    }

    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, model)| model)
    }

    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.models
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, model)| model)
    }

    /// Models in insertion order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().map(|(_, model)| model)
    }

    pub fn models_mut(&mut self) -> impl Iterator<Item = &mut Model> {
        self.models.iter_mut().map(|(_, model)| model)
    }

    /// The startup scene: a ground plane and three slowly tumbling cubes.
    pub fn with_default_models() -> Self {
        let mut scene = Scene::new();

        let mut floor = Model::plane(16.0, 16.0, Color::rgb(160, 160, 160)).with_name("floor");
        floor.transform_mut().set_position_xyz(0.0, -0.2, 7.0);

        let mut cube_a = Model::cube(1.8, Color::rgb(235, 98, 67)).with_name("cube_a");
        cube_a
            .transform_mut()
            .set_position_xyz(0.2, 1.0, 4.6)
            .set_rotation_xyz(16.0, 25.0, 0.0)
            .set_rotation_velocity(Vec3::new(18.0, 35.0, 0.0));

        let mut cube_b = Model::cube(1.2, Color::rgb(63, 153, 233)).with_name("cube_b");
        cube_b
            .transform_mut()
            .set_position_xyz(-2.7, 0.7, 7.3)
            .set_rotation_xyz(0.0, -20.0, 6.0)
            .set_rotation_velocity(Vec3::new(9.0, -23.0, 17.0));

        let mut cube_c = Model::cube(1.0, Color::rgb(126, 205, 84)).with_name("cube_c");
        cube_c
            .transform_mut()
            .set_position_xyz(2.8, 0.55, 9.1)
            .set_rotation_xyz(8.0, 12.0, -7.0)
            .set_rotation_velocity(Vec3::new(15.0, 19.0, 12.0));

        scene.add(floor);
        scene.add(cube_a);
        scene.add(cube_b);
        scene.add(cube_c);
        scene
    }
}

/// A randomly sized, colored and spinning cube near `center`.
///
/// Position is jittered by up to 0.6 on each axis; edge length is in
/// `[0.6, 1.4)`; rotation velocity is within ±40 degrees per second.
pub fn random_cube<R: Rng + ?Sized>(rng: &mut R, center: Vec3) -> Model {
    let size = rng.gen_range(0.6..1.4);
    let color = Color::rgb(
        rng.gen_range(60..=255),
        rng.gen_range(60..=255),
        rng.gen_range(60..=255),
    );
    let jitter = Vec3::new(
        rng.gen_range(-0.6..=0.6),
        rng.gen_range(-0.6..=0.6),
        rng.gen_range(-0.6..=0.6),
    );

    let mut cube = Model::cube(size, color).with_name("spawned");
    cube.transform_mut()
        .set_position(center + jitter)
        .set_rotation_xyz(
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..360.0),
        )
        .set_rotation_velocity(Vec3::new(
            rng.gen_range(-40.0..=40.0),
            rng.gen_range(-40.0..=40.0),
            rng.gen_range(-40.0..=40.0),
        ));
    cube
}
