//! Debug gizmos for visualizing chains.
//!
//! The library only emits line segments through [`DebugDraw`]; [`GizmoLines`]
//! collects them into a vertex list that can be uploaded to a GPU line pipeline
//! as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::TAU;

pub const SPHERE_SEGMENTS: u32 = 16;

pub type Color = [f32; 4];

pub const BONE_COLOR: Color = [0.9, 0.8, 0.2, 1.0];
pub const COLLISION_COLOR: Color = [0.2, 0.8, 0.9, 1.0];

pub trait DebugDraw {
    fn line(&mut self, start: Vec3, end: Vec3, color: Color);

    /// Three axis-aligned great circles.
    fn wire_sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        for (a, b) in circle_axes() {
            let mut previous = center + a * radius;
            for seg in 1..=SPHERE_SEGMENTS {
                let theta = TAU * seg as f32 / SPHERE_SEGMENTS as f32;
                let next = center + (a * theta.cos() + b * theta.sin()) * radius;
                self.line(previous, next, color);
                previous = next;
            }
        }
    }
}

fn circle_axes() -> [(Vec3, Vec3); 3] {
    [(Vec3::X, Vec3::Z), (Vec3::X, Vec3::Y), (Vec3::Y, Vec3::Z)]
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Line list: every two vertices form one segment.
#[derive(Debug, Clone, Default)]
pub struct GizmoLines {
    vertices: Vec<LineVertex>,
}

impl GizmoLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl DebugDraw for GizmoLines {
    fn line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.vertices.push(LineVertex::new(start, color));
        self.vertices.push(LineVertex::new(end, color));
    }
}
