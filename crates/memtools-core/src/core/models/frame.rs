use super::particle::Particle;
use super::simulation_box::SimulationBox;
use nalgebra::{Point3, Vector3};

/// Represents one molecular configuration snapshot.
///
/// A frame owns its title line, its simulation box and the ordered list of particles.
/// The particle order is canonical: it is the order used for output and the order that
/// all index sets returned by the selection functions refer to.
///
/// Frames are immutable once constructed. Operations that need a different frame
/// (subsets, merges, translations) build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Free-text title line, kept verbatim.
    header: String,
    /// Box vectors declared by the snapshot.
    sim_box: SimulationBox,
    /// Particle records in file order.
    particles: Vec<Particle>,
}

impl Frame {
    /// Creates a new frame from its parts.
    ///
    /// # Arguments
    ///
    /// * `header` - The title line of the snapshot.
    /// * `sim_box` - The simulation box.
    /// * `particles` - The particles in canonical order.
    pub fn new(header: impl Into<String>, sim_box: SimulationBox, particles: Vec<Particle>) -> Self {
        Self {
            header: header.into(),
            sim_box,
            particles,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sim_box(&self) -> &SimulationBox {
        &self.sim_box
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Retrieves a particle by its index in the frame.
    ///
    /// # Return
    ///
    /// Returns `Some(&Particle)` if the index is in range, otherwise `None`.
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Returns an iterator over all particle positions in canonical order.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.particles.iter().map(|p| &p.position)
    }

    /// Returns `true` if the frame is non-empty and every particle carries a velocity.
    pub fn has_velocities(&self) -> bool {
        !self.particles.is_empty() && self.particles.iter().all(Particle::has_velocity)
    }

    /// Consumes the frame and returns its parts.
    pub fn into_parts(self) -> (String, SimulationBox, Vec<Particle>) {
        (self.header, self.sim_box, self.particles)
    }

    /// Returns a copy of this frame in which no particle carries a velocity.
    ///
    /// Writing such a frame produces records without velocity columns.
    pub fn without_velocities(&self) -> Frame {
        self.map_particles(|mut p| {
            p.velocity = None;
            p
        })
    }

    /// Returns a copy of this frame in which every particle carries a zero velocity.
    ///
    /// Writing such a frame produces uniform records with all three velocity columns.
    pub fn with_zero_velocities(&self) -> Frame {
        self.map_particles(|mut p| {
            p.velocity = Some(Vector3::zeros());
            p
        })
    }

    pub(crate) fn map_particles(&self, f: impl FnMut(Particle) -> Particle) -> Frame {
        Frame {
            header: self.header.clone(),
            sim_box: self.sim_box,
            particles: self.particles.iter().cloned().map(f).collect(),
        }
    }
}
