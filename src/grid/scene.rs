//! Scene collaborator interface and an in-memory instance scene.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::params::ElementShape;

/// Opaque handle to an object materialized in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Where grid elements get materialized.
///
/// The animator only ever adds, removes, and repositions objects; how they are
/// drawn is up to the implementation.
pub trait Scene {
    /// Create an object of the given shape, at the origin with unit scale
    fn add_object(&mut self, shape: ElementShape, size: f32) -> ObjectHandle;

    fn remove_object(&mut self, handle: ObjectHandle);

    fn set_local_position(&mut self, handle: ObjectHandle, position: Vec3);

    fn set_local_scale(&mut self, handle: ObjectHandle, scale: Vec3);
}

/// Per-instance data for instanced drawing (model matrix)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

/// One object held by an [`InstanceScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: ElementShape,
    pub size: f32,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl SceneObject {
    /// Model matrix; geometry size is folded into the scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale * self.size, Quat::IDENTITY, self.translation)
    }

    /// Largest distance from the center to the surface (world units)
    pub fn bounding_radius(&self) -> f32 {
        let extent = match self.shape {
            ElementShape::Box => self.size * 0.5,
            ElementShape::Sphere => self.size,
        };
        extent * self.scale.max_element()
    }
}

/// Slot-based scene keeping every object in memory.
///
/// Handles of removed objects are recycled by later adds.
#[derive(Debug, Default)]
pub struct InstanceScene {
    slots: Vec<Option<SceneObject>>,
    free: Vec<u32>,
    live: usize,
}

impl InstanceScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Live objects in handle order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|obj| (ObjectHandle(index as u32), obj)))
    }

    /// Instance buffer contents for one shape batch
    pub fn instance_data(&self, shape: ElementShape) -> Vec<InstanceRaw> {
        self.objects()
            .filter(|(_, obj)| obj.shape == shape)
            .map(|(_, obj)| InstanceRaw {
                model: obj.model_matrix().to_cols_array_2d(),
            })
            .collect()
    }

    fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.slots.get_mut(handle.0 as usize).and_then(Option::as_mut)
    }
}

impl Scene for InstanceScene {
    fn add_object(&mut self, shape: ElementShape, size: f32) -> ObjectHandle {
        let object = SceneObject {
            shape,
            size,
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        };
        self.live += 1;

        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(object);
                ObjectHandle(index)
            }
            None => {
                self.slots.push(Some(object));
                ObjectHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    fn remove_object(&mut self, handle: ObjectHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0 as usize) {
            if slot.take().is_some() {
                self.live -= 1;
                self.free.push(handle.0);
            }
        }
    }

    fn set_local_position(&mut self, handle: ObjectHandle, position: Vec3) {
        if let Some(obj) = self.get_mut(handle) {
            obj.translation = position;
        }
    }

    fn set_local_scale(&mut self, handle: ObjectHandle, scale: Vec3) {
        if let Some(obj) = self.get_mut(handle) {
            obj.scale = scale;
        }
    }
}
