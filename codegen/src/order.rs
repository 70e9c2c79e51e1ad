//! Emission order of generated classes.

use crate::{error::Error, ir::GeneratedClass};
use std::collections::{BTreeSet, HashMap};

/// Orders `classes` so that every class comes after the classes it depends on.
///
/// Classes without a dependency relation keep their input order. Dependencies on
/// names that are not part of `classes` are supplied elsewhere and ignored.
pub fn sort_by_dependencies(classes: Vec<GeneratedClass>) -> Result<Vec<GeneratedClass>, Error> {
    let index: HashMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| (class.name.as_str(), idx))
        .collect();

    let mut pending = vec![0usize; classes.len()];
    let mut dependents = vec![Vec::new(); classes.len()];

    for (idx, class) in classes.iter().enumerate() {
        for dependency in &class.dependencies {
            if let Some(&dependency) = index.get(dependency.as_str()) {
                pending[idx] += 1;
                dependents[dependency].push(idx);
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..classes.len()).filter(|&idx| pending[idx] == 0).collect();
    let mut order = Vec::with_capacity(classes.len());

    while let Some(idx) = ready.iter().next().copied() {
        ready.remove(&idx);
        order.push(idx);

        for &dependent in &dependents[idx] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() != classes.len() {
        let blocked: Vec<bool> = pending.iter().map(|&count| count > 0).collect();
        let cycle = classes
            .iter()
            .enumerate()
            .filter(|(idx, _)| blocked[*idx] && reaches_itself(*idx, &dependents, &blocked))
            .map(|(_, class)| class.name.clone())
            .collect();

        return Err(Error::DependencyCycle(cycle));
    }

    let mut slots: Vec<Option<GeneratedClass>> = classes.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect())
}

/// Whether `start` lies on a cycle. Only classes left over by the sort can be part of one.
fn reaches_itself(start: usize, dependents: &[Vec<usize>], blocked: &[bool]) -> bool {
    let mut visited = BTreeSet::new();
    let mut stack = dependents[start].clone();

    while let Some(idx) = stack.pop() {
        if idx == start {
            return true;
        }

        if blocked[idx] && visited.insert(idx) {
            stack.extend(&dependents[idx]);
        }
    }

    false
}
