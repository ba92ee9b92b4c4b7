//! # Core Models Module
//!
//! Data structures describing one molecular configuration snapshot.
//!
//! ## Key Components
//!
//! - [`particle`] - A single atom/bead record with identity fields, position and optional velocity
//! - [`frame`] - A complete snapshot: title line, simulation box and ordered particles
//! - [`simulation_box`] - Rectangular or triclinic box vectors as declared by the file
//!
//! ## Usage
//!
//! ```
//! use memtools::core::models::frame::Frame;
//! use memtools::core::models::particle::Particle;
//! use memtools::core::models::simulation_box::SimulationBox;
//! use nalgebra::Point3;
//!
//! let particle = Particle::new(1, "POPC", "P", 1, Point3::new(1.0, 2.0, 3.0));
//! let frame = Frame::new("Bilayer", SimulationBox::rectangular(5.0, 5.0, 10.0), vec![particle]);
//! assert_eq!(frame.len(), 1);
//! ```

pub mod frame;
pub mod particle;
pub mod simulation_box;
