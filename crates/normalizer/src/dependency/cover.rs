//! Minimal cover reduction.

use super::closure::is_derivable;
use super::fd::Dependency;

/// Reduce `fds` to an equivalent set without redundant dependencies or
/// redundant determinant attributes.
///
/// Dependencies are removed left to right, each one tested against the
/// set as it stands at that moment, so removing one never makes a later
/// removal unsound. Determinant reduction then tries each attribute in
/// sorted order and applies the first one that can go. A reduced
/// determinant can make another dependency derivable, so the removal pass
/// runs once more at the end.
///
/// The result is closure-equivalent to the input. It can still be
/// non-minimal when two determinant attributes are only jointly redundant.
pub fn minimal_cover(fds: &[Dependency]) -> Vec<Dependency> {
    let mut working = drop_redundant(dedup(fds.iter().cloned()));

    for i in 0..working.len() {
        if working[i].determinant.len() < 2 {
            continue;
        }
        let reduced = working[i].determinant.iter().find_map(|attr| {
            let smaller = Dependency::new_unchecked(
                working[i].determinant.without(attr),
                working[i].dependent.clone(),
            );
            is_derivable(&smaller, &working).then_some(smaller)
        });
        if let Some(smaller) = reduced {
            tracing::trace!(from = %working[i], to = %smaller, "reduced determinant");
            working[i] = smaller;
        }
    }

    let cover = drop_redundant(dedup(working));
    tracing::debug!(input = fds.len(), cover = cover.len(), "computed minimal cover");
    cover
}

/// Remove, left to right, each dependency derivable from the rest.
fn drop_redundant(mut working: Vec<Dependency>) -> Vec<Dependency> {
    let mut i = 0;
    while i < working.len() {
        let candidate = working.remove(i);
        if is_derivable(&candidate, &working) {
            tracing::trace!(fd = %candidate, "dropped redundant dependency");
        } else {
            working.insert(i, candidate);
            i += 1;
        }
    }
    working
}

/// Drop exact duplicates, keeping the first occurrence.
fn dedup(fds: impl IntoIterator<Item = Dependency>) -> Vec<Dependency> {
    let mut out: Vec<Dependency> = Vec::new();
    for fd in fds {
        if !out.contains(&fd) {
            out.push(fd);
        }
    }
    out
}
