//! Tests for code written against `SoASlice`, `SoASliceMut` and `SoAVec`

mod particles;

use particles::{names, sample, Particle, ParticleSlice, ParticleVec};
use pretty_assertions::assert_eq;
use soavec::{SoAError, SoASlice, SoASliceMut, SoAVec, StructOfArray};

fn fill<V: SoAVec<Particle>>(elements: Vec<Particle>) -> V {
    let mut container = V::with_capacity(elements.len());
    for element in elements {
        container.push(element);
    }
    container
}

fn count<V: SoASlice<Particle>>(view: &V) -> usize {
    view.iter().count()
}

fn reverse<V: SoASliceMut<Particle>>(view: &mut V) -> soavec::Result<()> {
    let indices = (0..view.len()).rev().collect::<Vec<_>>();
    view.apply_index(&indices)
}

fn largest<'a, V>(view: &'a V) -> Option<V::Ref<'a>>
where
    V: SoASlice<Score>,
    V::Ref<'a>: Ord,
{
    view.iter().max()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, StructOfArray)]
#[soa_derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub points: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// Containers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_fill_through_the_trait() {
    let particles: ParticleVec = fill(vec![Particle::new("He", 4.0), Particle::new("Ne", 20.18)]);

    assert_eq!(SoASlice::len(&particles), 2);
    assert!(SoAVec::capacity(&particles) >= 2);
    assert_eq!(names(&particles), vec!["He", "Ne"]);
}

#[test]
fn test_structural_operations_return_errors() {
    let mut particles = sample();

    let err = SoAVec::insert(&mut particles, 4, Particle::new("Ar", 39.95)).unwrap_err();
    assert_eq!(err, SoAError::position(4, 3));
    assert!(SoAVec::remove(&mut particles, 3).is_err());

    let removed = SoAVec::swap_remove(&mut particles, 0).unwrap();
    assert_eq!(removed, Particle::new("Na", 22.99));
    assert_eq!(names(&particles), vec!["Zn", "Cl"]);

    let mut other = ParticleVec {
        name: vec!["Kr".into()],
        mass: Vec::new(),
    };
    assert!(SoAVec::append(&mut particles, &mut other)
        .unwrap_err()
        .is_length_mismatch());

    let tail = SoAVec::split_off(&mut particles, 1);
    assert_eq!(names(&tail), vec!["Cl"]);
    SoAVec::clear(&mut particles);
    assert!(SoASlice::is_empty(&particles));
}

#[test]
fn test_first_and_last_defaults() {
    let particles = sample();
    assert_eq!(SoASlice::first(&particles).unwrap().name, "Na");
    assert_eq!(SoASlice::last(&particles).unwrap().name, "Zn");

    let empty = ParticleVec::new();
    assert!(SoASlice::last(&empty).is_none());
}

// ═══════════════════════════════════════════════════════════════════════
// Views
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_same_function_for_container_and_views() {
    let mut particles = sample();

    assert_eq!(count(&particles), 3);
    assert_eq!(count(&particles.slice(1..)), 2);
    assert_eq!(count(&particles.slice_mut(..1)), 1);
}

#[test]
fn test_slice_and_index_through_the_trait() {
    let particles = sample();
    let view: ParticleSlice<'_> = particles.as_slice();

    let tail = SoASlice::slice(&view, 1..);
    assert_eq!(tail.mass, &[35.45, 65.38]);
    assert_eq!(SoASlice::index(&view, 2).name, "Zn");
    assert!(SoASlice::get(&view, 3).is_none());
}

#[test]
fn test_mutation_through_the_trait() {
    let mut particles = sample();
    {
        let mut view = particles.slice_mut(1..);
        *SoASliceMut::index_mut(&mut view, 0).mass = 0.0;
        for particle in SoASliceMut::iter_mut(&mut view) {
            particle.name.push('*');
        }
    }
    assert_eq!(names(&particles), vec!["Na", "Cl*", "Zn*"]);
    assert_eq!(particles.mass, vec![22.99, 0.0, 65.38]);
}

#[test]
fn test_reverse_generic() {
    let mut particles = sample();
    reverse(&mut particles).unwrap();
    assert_eq!(names(&particles), vec!["Zn", "Cl", "Na"]);

    reverse(&mut particles.slice_mut(1..)).unwrap();
    assert_eq!(names(&particles), vec!["Zn", "Na", "Cl"]);
}

#[test]
fn test_largest_generic() {
    let scores = [3, 9, 4]
        .into_iter()
        .map(|points| Score { points })
        .collect::<ScoreVec>();

    let best = largest(&scores).unwrap();
    assert_eq!(*best.points, 9);
    assert_eq!(*largest(&scores.slice(2..)).unwrap().points, 4);
    assert!(largest(&ScoreVec::new()).is_none());
}
