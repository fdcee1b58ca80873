use crate::error::Error;

/// The classical tension of the modified Butterfly scheme.
pub const DEFAULT_TENSION: f32 = 1.0 / 16.0;

/// Parameters for Butterfly subdivision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterflyParams {
    /// Weight `w` of the edge stencil. The two wing tips are weighted `2w`
    /// and the four outer vertices `-w`. Zero gives plain midpoint
    /// subdivision.
    pub tension: f32,

    /// Number of subdivision passes.
    pub iterations: usize,
}

impl Default for ButterflyParams {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            iterations: 1,
        }
    }
}

impl ButterflyParams {
    #[must_use]
    pub const fn new(tension: f32, iterations: usize) -> Self {
        Self {
            tension,
            iterations,
        }
    }

    #[must_use]
    pub const fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// The tension must be a finite number. Any finite value is accepted,
    /// including zero and negative values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tension.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidTension(self.tension))
        }
    }

    /// Number of vertices, edges and faces after subdividing a closed mesh
    /// with the given counts.
    ///
    /// Every pass adds one vertex per edge, splits every edge in two, adds
    /// three edges inside every face, and splits every face into four.
    #[must_use]
    pub const fn expected_counts(
        &self,
        nverts: usize,
        nedges: usize,
        nfaces: usize,
    ) -> (usize, usize, usize) {
        let (mut nv, mut ne, mut nf) = (nverts, nedges, nfaces);
        let mut i = 0;
        while i < self.iterations {
            nv += ne;
            ne = 2 * ne + 3 * nf;
            nf *= 4;
            i += 1;
        }
        (nv, ne, nf)
    }
}
