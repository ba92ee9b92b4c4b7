use nalgebra::{Point3, Vector3};

/// Represents one atom or coarse-grained bead in a configuration snapshot.
///
/// Particles carry no back-reference to their frame; they are addressed by their
/// position in [`Frame::particles`](super::frame::Frame::particles). Residue and atom
/// numbers are only locally unique because the file format wraps them at a fixed
/// maximum, so any grouping by residue number must be combined with sequence position.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The residue number as written in the file (e.g., `1`, `128`).
    pub residue_number: isize,
    /// The residue name (e.g., "POPC", "SOL").
    pub residue_name: String,
    /// The atom name (e.g., "P", "OW").
    pub atom_name: String,
    /// The atom number as written in the file.
    pub atom_number: usize,
    /// The Cartesian coordinates of the particle in nanometers.
    pub position: Point3<f64>,
    /// The velocity in nm/ps, present only if the source record carried velocity columns.
    pub velocity: Option<Vector3<f64>>,
}

impl Particle {
    /// Creates a new `Particle` without a velocity.
    ///
    /// # Arguments
    ///
    /// * `residue_number` - The residue number of the particle.
    /// * `residue_name` - The name of the parent residue.
    /// * `atom_name` - The name of the atom.
    /// * `atom_number` - The atom number of the particle.
    /// * `position` - The 3D coordinates of the particle.
    pub fn new(
        residue_number: isize,
        residue_name: &str,
        atom_name: &str,
        atom_number: usize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            residue_number,
            residue_name: residue_name.to_string(),
            atom_name: atom_name.to_string(),
            atom_number,
            position,
            velocity: None,
        }
    }

    /// Returns the same particle carrying the given velocity.
    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn has_velocity(&self) -> bool {
        self.velocity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_has_expected_fields_and_no_velocity() {
        let particle = Particle::new(12, "POPC", "P", 34, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(particle.residue_number, 12);
        assert_eq!(particle.residue_name, "POPC");
        assert_eq!(particle.atom_name, "P");
        assert_eq!(particle.atom_number, 34);
        assert_eq!(particle.position, Point3::new(1.0, 2.0, 3.0));
        assert!(particle.velocity.is_none());
        assert!(!particle.has_velocity());
    }

    #[test]
    fn with_velocity_attaches_velocity() {
        let particle = Particle::new(1, "SOL", "OW", 1, Point3::origin())
            .with_velocity(Vector3::new(0.1, -0.2, 0.3));

        assert!(particle.has_velocity());
        assert_eq!(particle.velocity, Some(Vector3::new(0.1, -0.2, 0.3)));
    }

    #[test]
    fn particle_equality_and_clone_works() {
        let particle1 = Particle::new(1, "SOL", "HW1", 2, Point3::new(0.5, 0.5, 0.5));
        let particle2 = particle1.clone();
        assert_eq!(particle1, particle2);
    }
}
