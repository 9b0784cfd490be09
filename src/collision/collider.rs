use glam::Vec3;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { center: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
    Capsule { start: Vec3, end: Vec3, radius: f32 },
    Mesh { bounds: Aabb },
}

/// Axis-aligned bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        let q = (point - self.center()).abs() - self.half_extents();
        q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
    }

    /// Nearest point on the box surface, also for points inside the box.
    pub fn closest_surface_point(&self, point: Vec3) -> Vec3 {
        let clamped = point.clamp(self.min, self.max);
        if clamped != point {
            return clamped;
        }

        let p = point - self.center();
        let distances = self.half_extents() - p.abs();
        let mut result = point;
        if distances.x <= distances.y && distances.x <= distances.z {
            result.x = if p.x > 0.0 { self.max.x } else { self.min.x };
        } else if distances.y <= distances.z {
            result.y = if p.y > 0.0 { self.max.y } else { self.min.y };
        } else {
            result.z = if p.z > 0.0 { self.max.z } else { self.min.z };
        }
        result
    }
}

/// A shape the resolver can push bones out of.
pub trait Collider: Send + Sync + Debug {
    fn shape(&self) -> ColliderShape;
    /// Negative inside the shape.
    fn signed_distance(&self, point: Vec3) -> f32;
    /// Nearest point on the shape's surface.
    fn closest_point(&self, point: Vec3) -> Vec3;
    fn bounds(&self) -> Aabb;
    fn clone_box(&self) -> Box<dyn Collider>;

    fn is_mesh(&self) -> bool {
        matches!(self.shape(), ColliderShape::Mesh { .. })
    }
}

impl Clone for Box<dyn Collider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Collider for SphereCollider {
    fn shape(&self) -> ColliderShape {
        ColliderShape::Sphere {
            center: self.center,
            radius: self.radius,
        }
    }

    fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.center).length() - self.radius
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        let dir = (point - self.center).normalize_or_zero();
        if dir.length_squared() < 0.0001 {
            return self.center + Vec3::Y * self.radius;
        }
        self.center + dir * self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, Vec3::splat(self.radius))
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(*self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoxCollider {
    pub aabb: Aabb,
}

impl BoxCollider {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            aabb: Aabb::new(min, max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            aabb: Aabb::from_center_half_extents(center, half_extents),
        }
    }
}

impl Collider for BoxCollider {
    fn shape(&self) -> ColliderShape {
        ColliderShape::Box {
            center: self.aabb.center(),
            half_extents: self.aabb.half_extents(),
        }
    }

    fn signed_distance(&self, point: Vec3) -> f32 {
        self.aabb.signed_distance(point)
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.aabb.closest_surface_point(point)
    }

    fn bounds(&self) -> Aabb {
        self.aabb
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(*self)
    }
}

/// Segment swept by a sphere, the usual proxy for limbs and torsos.
#[derive(Debug, Clone, Copy)]
pub struct CapsuleCollider {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl CapsuleCollider {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    fn closest_on_segment(&self, point: Vec3) -> Vec3 {
        let segment = self.end - self.start;
        let length_sq = segment.length_squared();
        if length_sq < 1e-8 {
            return self.start;
        }
        let t = ((point - self.start).dot(segment) / length_sq).clamp(0.0, 1.0);
        self.start + segment * t
    }
}

impl Collider for CapsuleCollider {
    fn shape(&self) -> ColliderShape {
        ColliderShape::Capsule {
            start: self.start,
            end: self.end,
            radius: self.radius,
        }
    }

    fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.closest_on_segment(point)).length() - self.radius
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        let axis_point = self.closest_on_segment(point);
        let dir = (point - axis_point).normalize_or_zero();
        if dir.length_squared() < 0.0001 {
            return axis_point + Vec3::Y * self.radius;
        }
        axis_point + dir * self.radius
    }

    fn bounds(&self) -> Aabb {
        let pad = Vec3::splat(self.radius);
        Aabb::new(self.start.min(self.end) - pad, self.start.max(self.end) + pad)
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(*self)
    }
}

/// Triangle-soup collider. Only its bounds are modelled; the pushout resolver
/// skips it.
#[derive(Debug, Clone)]
pub struct MeshCollider {
    vertices: Vec<Vec3>,
    bounds: Aabb,
}

impl MeshCollider {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        let bounds = Aabb::from_points(&vertices).unwrap_or(Aabb {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        });
        Self { vertices, bounds }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}

impl Collider for MeshCollider {
    fn shape(&self) -> ColliderShape {
        ColliderShape::Mesh {
            bounds: self.bounds,
        }
    }

    fn signed_distance(&self, point: Vec3) -> f32 {
        self.bounds.signed_distance(point)
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.bounds.closest_surface_point(point)
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(self.clone())
    }
}
