//! Capacities of the batching subsystem, fixed for the lifetime of a context.

use crate::errors::{Error, Result};

/// Configuration of a `Context`. All capacities are allocated once at
/// creation time; there is no partial reinitialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum number of line primitives per flush cycle.
    pub max_lines: usize,
    /// Maximum number of triangle primitives per flush cycle.
    pub max_triangles: usize,
    /// Maximum number of quad primitives per flush cycle.
    pub max_quads: usize,
    /// Maximum number of texture-grouped draw descriptors per flush cycle.
    pub max_draws: usize,
    /// Maximum number of matrices saved on the transform stack.
    pub max_matrix_depth: usize,
    /// Capacity of the deferred-transform vertex buffer, in vertices.
    pub temp_vertex_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_lines: 8192,
            max_triangles: 4096,
            max_quads: 8192,
            max_draws: 256,
            max_matrix_depth: 16,
            temp_vertex_capacity: 4096,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0
            || self.max_triangles == 0
            || self.max_quads == 0
            || self.max_draws == 0
            || self.max_matrix_depth == 0
            || self.temp_vertex_capacity == 0
        {
            return Err(Error::SettingsInvalid("capacities must be non-zero".into()).into());
        }

        // Quads are indexed with u16, which addresses at most 65536 vertices.
        if self.max_quads * 4 > 65536 {
            return Err(Error::SettingsInvalid(format!(
                "max_quads {} needs more than 65536 vertices",
                self.max_quads
            ))
            .into());
        }

        Ok(())
    }
}
