//! Element record shared by the container and view tests
#![allow(dead_code)]

use soavec::StructOfArray;

#[derive(Debug, Clone, PartialEq, StructOfArray)]
#[soa_derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub name: String,
    pub mass: f64,
}

impl Particle {
    pub fn new(name: &str, mass: f64) -> Self {
        Particle {
            name: name.to_string(),
            mass,
        }
    }
}

/// Sodium, chlorine and zinc, in that order
pub fn sample() -> ParticleVec {
    let mut particles = ParticleVec::new();
    particles.push(Particle::new("Na", 22.99));
    particles.push(Particle::new("Cl", 35.45));
    particles.push(Particle::new("Zn", 65.38));
    particles
}

pub fn names(particles: &ParticleVec) -> Vec<&str> {
    particles.name.iter().map(String::as_str).collect()
}
