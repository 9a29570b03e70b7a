/// A detector hit: global position plus timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpacePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub t: f32,
}

impl SpacePoint {
    pub fn new(x: f32, y: f32, z: f32, t: f32) -> Self {
        Self { x, y, z, t }
    }

    /// Transverse radius.
    pub fn r(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Azimuthal angle in `(-pi, pi]`.
    pub fn phi(&self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// One `[r, phi, z, t]` feature row per hit, the input layout expected
/// by embedding models trained on cylindrical coordinates.
pub fn cylindrical_features(points: &[SpacePoint]) -> Vec<Vec<f32>> {
    points
        .iter()
        .map(|p| vec![p.r(), p.phi(), p.z, p.t])
        .collect()
}

/// One `[x, y, z, t]` feature row per hit.
pub fn cartesian_features(points: &[SpacePoint]) -> Vec<Vec<f32>> {
    points.iter().map(|p| vec![p.x, p.y, p.z, p.t]).collect()
}
