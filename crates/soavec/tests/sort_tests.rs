//! Tests for sorting and reordering exclusive views

mod particles;

use particles::{names, sample, Particle, ParticleVec};
use pretty_assertions::assert_eq;
use soavec::{Permutation, SoAError, StructOfArray};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, StructOfArray)]
#[soa_derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Task {
    pub priority: u8,
    pub label: String,
}

fn tasks() -> TaskVec {
    [(2, "write"), (1, "read"), (2, "review"), (0, "plan")]
        .into_iter()
        .map(|(priority, label)| Task {
            priority,
            label: label.to_string(),
        })
        .collect()
}

fn labels(tasks: &TaskVec) -> Vec<&str> {
    tasks.label.iter().map(String::as_str).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Sorting
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sort_by_keeps_columns_together() {
    let mut particles = sample();
    particles
        .as_mut_slice()
        .sort_by(|a, b| b.mass.total_cmp(a.mass));

    assert_eq!(names(&particles), vec!["Zn", "Cl", "Na"]);
    assert_eq!(particles.mass, vec![65.38, 35.45, 22.99]);
}

#[test]
fn test_sort_by_key_is_stable() {
    let mut tasks = tasks();
    tasks.as_mut_slice().sort_by_key(|task| *task.priority);

    assert_eq!(labels(&tasks), vec!["plan", "read", "write", "review"]);
    assert_eq!(tasks.priority, vec![0, 1, 2, 2]);
}

#[test]
fn test_sort_uses_reference_order() {
    let mut tasks = tasks();
    tasks.as_mut_slice().sort();

    assert_eq!(labels(&tasks), vec!["plan", "read", "review", "write"]);
}

#[test]
fn test_sort_sub_view_only() {
    let mut particles = sample();
    particles
        .slice_mut(1..)
        .sort_by(|a, b| a.name.cmp(b.name));
    assert_eq!(names(&particles), vec!["Na", "Cl", "Zn"]);

    particles
        .slice_mut(..2)
        .sort_by_key(|particle| particle.name.clone());
    assert_eq!(names(&particles), vec!["Cl", "Na", "Zn"]);
    assert_eq!(particles.mass, vec![35.45, 22.99, 65.38]);
}

#[test]
fn test_sort_empty_view() {
    let mut particles = ParticleVec::new();
    particles.as_mut_slice().sort_by(|a, b| a.mass.total_cmp(b.mass));
    assert!(particles.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Reordering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_apply_index() {
    let mut particles = sample();
    particles.as_mut_slice().apply_index(&[2, 0, 1]).unwrap();

    assert_eq!(names(&particles), vec!["Zn", "Na", "Cl"]);
    assert_eq!(particles.mass, vec![65.38, 22.99, 35.45]);
}

#[test]
fn test_apply_index_rejects_bad_orders_without_moving() {
    let mut particles = sample();
    let mut view = particles.as_mut_slice();

    assert_eq!(
        view.apply_index(&[0, 1, 3]).unwrap_err(),
        SoAError::IndexOutOfRange {
            start: 3,
            end: 4,
            len: 3
        }
    );
    assert_eq!(
        view.apply_index(&[0, 0, 1]).unwrap_err(),
        SoAError::DuplicateIndex { index: 0 }
    );
    assert!(view.apply_index(&[1, 0]).unwrap_err().is_length_mismatch());

    assert_eq!(particles, sample());
}

#[test]
fn test_apply_permutation_and_inverse() {
    let mut particles = sample();
    let permutation = Permutation::from_order(vec![1, 2, 0]).unwrap();

    particles.as_mut_slice().apply_permutation(&permutation).unwrap();
    assert_eq!(names(&particles), vec!["Cl", "Zn", "Na"]);

    particles
        .as_mut_slice()
        .apply_permutation(&permutation.inverse())
        .unwrap();
    assert_eq!(particles, sample());
}

#[test]
fn test_apply_permutation_length_mismatch() {
    let mut particles = sample();
    let err = particles
        .slice_mut(1..)
        .apply_permutation(&Permutation::identity(3))
        .unwrap_err();

    assert_eq!(
        err,
        SoAError::LengthMismatch {
            field: "permutation",
            expected: 2,
            got: 3
        }
    );
    assert_eq!(particles.index(0).to_record(), Particle::new("Na", 22.99));
}
