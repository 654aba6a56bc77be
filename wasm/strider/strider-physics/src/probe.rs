use rapier3d::prelude::*;
use strider_gait::GroundProbe;

/// Ray-cast ground probe. Placement is free; the hit is refreshed by
/// [`RayProbe::sweep`] against the latest query pipeline.
#[derive(Clone, Debug)]
pub struct RayProbe {
    origin: Point<f32>,
    cast: Vector<f32>,
    contact: Option<Point<f32>>,
    normal: Option<Vector<f32>>,
}

impl Default for RayProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl RayProbe {
    pub fn new() -> Self {
        Self {
            origin: Point::origin(),
            cast: Vector::zeros(),
            contact: None,
            normal: None,
        }
    }

    pub fn origin(&self) -> Point<f32> {
        self.origin
    }

    pub fn cast(&self) -> Vector<f32> {
        self.cast
    }

    /// Surface normal at the last contact.
    pub fn normal(&self) -> Option<Vector<f32>> {
        self.normal
    }

    pub fn sweep(
        &mut self,
        queries: &QueryPipeline,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        filter: QueryFilter,
    ) {
        let length = self.cast.norm();
        let Some(dir) = self.cast.try_normalize(f32::EPSILON) else {
            self.contact = None;
            self.normal = None;
            return;
        };

        let ray = Ray::new(self.origin, dir);
        match queries.cast_ray_and_get_normal(bodies, colliders, &ray, length, true, filter) {
            Some((_, hit)) => {
                self.contact = Some(ray.point_at(hit.time_of_impact));
                self.normal = Some(hit.normal);
            }
            None => {
                self.contact = None;
                self.normal = None;
            }
        }
    }
}

impl GroundProbe for RayProbe {
    fn set_world_position(&mut self, position: Point<f32>) {
        self.origin = position;
    }

    fn set_cast_vector(&mut self, cast: Vector<f32>) {
        self.cast = cast;
    }

    fn is_colliding(&self) -> bool {
        self.contact.is_some()
    }

    fn contact_point(&self) -> Option<Point<f32>> {
        self.contact
    }
}
