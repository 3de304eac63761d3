//! Attribute closure under a set of functional dependencies.

use super::fd::Dependency;
use super::set::AttributeSet;

/// All attributes derivable from `attrs` by repeatedly applying `fds`.
///
/// Each pass either adds at least one attribute or reaches the fixed point,
/// so the loop runs at most once per attribute named in `fds`, plus one.
pub fn closure(attrs: &AttributeSet, fds: &[Dependency]) -> AttributeSet {
    let mut result = attrs.clone();

    loop {
        let mut changed = false;
        for fd in fds {
            if !result.contains(&fd.dependent) && fd.determinant.is_subset(&result) {
                result.insert(fd.dependent.clone());
                changed = true;
            }
        }
        if !changed {
            return result;
        }
    }
}

/// Whether `fd` follows from `fds`.
pub fn is_derivable(fd: &Dependency, fds: &[Dependency]) -> bool {
    closure(&fd.determinant, fds).contains(&fd.dependent)
}

/// Whether `attrs` determines every attribute of `universe` under `fds`.
pub fn is_superkey(attrs: &AttributeSet, universe: &AttributeSet, fds: &[Dependency]) -> bool {
    universe.is_subset(&closure(attrs, fds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fd(det: &[&str], dep: &str) -> Dependency {
        Dependency::new(det.iter().copied(), dep).unwrap()
    }

    fn set(attrs: &[&str]) -> AttributeSet {
        attrs.iter().copied().collect()
    }

    #[test]
    fn test_transitive_closure() {
        let fds = vec![fd(&["a"], "b"), fd(&["b"], "c"), fd(&["c", "d"], "e")];

        assert_eq!(closure(&set(&["a"]), &fds), set(&["a", "b", "c"]));
        assert_eq!(closure(&set(&["a", "d"]), &fds), set(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_closure_order_independent() {
        // Dependencies listed in reverse application order still reach the fixed point.
        let fds = vec![fd(&["c"], "d"), fd(&["b"], "c"), fd(&["a"], "b")];
        assert_eq!(closure(&set(&["a"]), &fds), set(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_empty_fds() {
        assert_eq!(closure(&set(&["x"]), &[]), set(&["x"]));
    }

    #[test]
    fn test_is_derivable() {
        let fds = vec![fd(&["a"], "b"), fd(&["b"], "c")];
        assert!(is_derivable(&fd(&["a"], "c"), &fds));
        assert!(!is_derivable(&fd(&["c"], "a"), &fds));
    }

    #[test]
    fn test_is_superkey() {
        let fds = vec![fd(&["a"], "b"), fd(&["b"], "c")];
        let universe = set(&["a", "b", "c"]);
        assert!(is_superkey(&set(&["a"]), &universe, &fds));
        assert!(!is_superkey(&set(&["b"]), &universe, &fds));
    }
}
