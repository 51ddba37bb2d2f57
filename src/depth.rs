/// Nearest distance drawn so far, one entry per screen column.
///
/// Cleared to infinity at the start of every frame. Within a frame an entry
/// only ever decreases.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(columns: usize) -> Self {
        Self {
            depths: vec![f32::INFINITY; columns],
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    /// Depth at `column`; out-of-range columns read as infinitely far.
    #[inline]
    pub fn get(&self, column: usize) -> f32 {
        self.depths.get(column).copied().unwrap_or(f32::INFINITY)
    }

    /// Whether something at distance `z` is visible in `column`. Ties pass.
    #[inline]
    pub fn passes(&self, column: usize, z: f32) -> bool {
        column < self.depths.len() && self.depths[column] >= z
    }

    /// Records `z` if it is at least as near as the stored value.
    #[inline]
    pub fn write_nearer(&mut self, column: usize, z: f32) -> bool {
        if z.is_nan() || z < 0.0 || !self.passes(column, z) {
            return false;
        }
        self.depths[column] = z;
        true
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_infinite_and_clears() {
        let mut depth = DepthBuffer::new(4);
        assert!(depth.as_slice().iter().all(|d| d.is_infinite()));
        assert!(depth.write_nearer(2, 3.0));
        depth.clear();
        assert_eq!(depth.get(2), f32::INFINITY);
    }

    #[test]
    fn only_decreases() {
        let mut depth = DepthBuffer::new(1);
        assert!(depth.write_nearer(0, 5.0));
        assert!(!depth.write_nearer(0, 6.0));
        assert_eq!(depth.get(0), 5.0);
        assert!(depth.write_nearer(0, 5.0));
        assert!(depth.write_nearer(0, 1.0));
        assert_eq!(depth.get(0), 1.0);
    }

    #[test]
    fn rejects_negative_nan_and_out_of_range() {
        let mut depth = DepthBuffer::new(2);
        assert!(!depth.write_nearer(0, -1.0));
        assert!(!depth.write_nearer(0, f32::NAN));
        assert!(!depth.write_nearer(5, 1.0));
        assert_eq!(depth.get(5), f32::INFINITY);
        assert!(!depth.passes(5, 1.0));
    }
}
