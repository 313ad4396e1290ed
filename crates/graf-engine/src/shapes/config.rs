/// Shape generation settings consumed by [`ShapeFactoryManager`](super::ShapeFactoryManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeConfig {
    /// Degrees between adjacent circle rim vertices. Must divide 360.
    pub circle_angle_step: u32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self { circle_angle_step: 10 }
    }
}
