//! Geographic projection for the map surface
//!
//! Equirectangular projection around the configured map center. Accurate
//! enough at city scale, and keeps world units small for the renderer.

use bevy::prelude::*;

use crate::simulation::{GeoPoint, Viewport};

/// World units per degree of latitude.
const UNITS_PER_DEGREE: f32 = 1000.0;

/// Camera height above the ground plane at the base zoom.
const BASE_CAMERA_HEIGHT: f32 = 70.0;

/// Zoom level the base camera height corresponds to.
const BASE_ZOOM: u8 = 12;

#[derive(Resource)]
pub struct GeoProjection {
    origin: GeoPoint,
    lng_scale: f32,
}

impl GeoProjection {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            lng_scale: origin.lat.to_radians().cos() as f32,
        }
    }

    /// Project a coordinate onto the ground plane (y = 0).
    pub fn to_world(&self, point: GeoPoint) -> Vec3 {
        let x = (point.lng - self.origin.lng) as f32 * UNITS_PER_DEGREE * self.lng_scale;
        let z = -((point.lat - self.origin.lat) as f32) * UNITS_PER_DEGREE;
        Vec3::new(x, 0.0, z)
    }

    /// Camera placement for a viewport: directly above the center, with the
    /// height halving for each zoom level above the base.
    pub fn camera_transform(&self, viewport: Viewport) -> Transform {
        let target = self.to_world(viewport.center);
        let height =
            BASE_CAMERA_HEIGHT * 0.5_f32.powi(viewport.zoom as i32 - BASE_ZOOM as i32);
        Transform::from_xyz(target.x, height, target.z).looking_at(target, Vec3::Z)
    }
}
