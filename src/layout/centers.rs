//! Center and boundary computation.
//!
//! Each merge attaches to its parent at the midpoint of its children's
//! positions (a leaf's position is its index, a sub-merge's position is its
//! own center). The boundary range is the inclusive leaf span of the merge.
//!
//! Evaluation is a dependency-ordered fill over an explicit work stack, so
//! large dendrograms never hit call-stack limits: an entry whose sub-merge is
//! still unresolved is pushed back underneath that sub-merge and retried
//! once the dependency has been filled in.

use crate::linkage::{LayoutEntry, LinkageEntry, LinkageError};

/// Resolved position and span of one child.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    position: f64,
    lower: usize,
    upper: usize,
    leaves: usize,
}

enum Lookup {
    Ready(Resolved),
    Pending(usize),
}

fn lookup(
    entry: usize,
    target: usize,
    from_list: bool,
    filled: &[Option<(LayoutEntry, usize)>],
) -> Result<Lookup, LinkageError> {
    if !from_list {
        return Ok(Lookup::Ready(Resolved {
            position: target as f64,
            lower: target,
            upper: target,
            leaves: 1,
        }));
    }
    match filled.get(target) {
        Some(Some((child, leaves))) => Ok(Lookup::Ready(Resolved {
            position: child.center,
            lower: child.left_boundary,
            upper: child.right_boundary,
            leaves: *leaves,
        })),
        Some(None) => Ok(Lookup::Pending(target)),
        None => Err(LinkageError::DanglingReference {
            entry,
            target,
            len: filled.len(),
        }),
    }
}

/// Populate `center`, `left_boundary` and `right_boundary` for every entry.
///
/// The output preserves the input order. Each entry is resolved exactly
/// once; re-pushes only happen while a dependency is outstanding.
pub fn compute_centers(entries: &[LinkageEntry]) -> Result<Vec<LayoutEntry>, LinkageError> {
    let len = entries.len();
    // Filled entries together with their leaf counts.
    let mut filled: Vec<Option<(LayoutEntry, usize)>> = vec![None; len];
    // Entries parked on the stack waiting for a dependency.
    let mut waiting = vec![false; len];
    let mut to_process: Vec<usize> = (0..len).collect();
    let mut stack: Vec<usize> = Vec::new();

    loop {
        let index = match stack.pop() {
            Some(index) => index,
            None => match to_process.pop() {
                Some(index) => index,
                None => break,
            },
        };
        if filled[index].is_some() {
            continue;
        }

        let entry = entries[index];
        let left = lookup(index, entry.left, entry.is_left_from_list, &filled)?;
        let right = lookup(index, entry.right, entry.is_right_from_list, &filled)?;

        let (left, right) = match (left, right) {
            (Lookup::Ready(left), Lookup::Ready(right)) => (left, right),
            (Lookup::Pending(dependency), _) | (_, Lookup::Pending(dependency)) => {
                if waiting[dependency] || dependency == index {
                    return Err(LinkageError::Cycle { entry: dependency });
                }
                waiting[index] = true;
                stack.push(index);
                stack.push(dependency);
                continue;
            }
        };

        let lower = left.lower.min(right.lower);
        let upper = left.upper.max(right.upper);
        let leaves = left.leaves + right.leaves;
        if upper - lower + 1 != leaves {
            return Err(LinkageError::NonContiguousSubtree {
                entry: index,
                leaves,
                left_boundary: lower,
                right_boundary: upper,
            });
        }

        waiting[index] = false;
        filled[index] = Some((
            LayoutEntry {
                left: entry.left,
                is_left_from_list: entry.is_left_from_list,
                right: entry.right,
                is_right_from_list: entry.is_right_from_list,
                height: entry.height,
                center: (left.position + right.position) / 2.0,
                left_boundary: lower,
                right_boundary: upper,
            },
            leaves,
        ));
    }

    Ok(filled
        .into_iter()
        .flatten()
        .map(|(entry, _)| entry)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_leaf_scenario() {
        let entries = vec![
            LinkageEntry::leaves(0, 1, 1.0),
            LinkageEntry::new(0, true, 2, false, 2.0),
        ];
        let layout = compute_centers(&entries).unwrap();

        assert_eq!(layout[0].center, 0.5);
        assert_eq!((layout[0].left_boundary, layout[0].right_boundary), (0, 1));
        assert_eq!(layout[1].center, 1.25);
        assert_eq!((layout[1].left_boundary, layout[1].right_boundary), (0, 2));
    }

    #[test]
    fn test_dependency_at_index_zero_is_resolved() {
        // Entry 0 is pushed onto the stack as a dependency of entry 2.
        let entries = vec![
            LinkageEntry::leaves(2, 3, 0.5),
            LinkageEntry::leaves(0, 1, 0.5),
            LinkageEntry::new(1, true, 0, true, 1.0),
        ];
        let layout = compute_centers(&entries).unwrap();

        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0].center, 2.5);
        assert_eq!(layout[1].center, 0.5);
        assert_eq!(layout[2].center, 1.5);
        assert_eq!((layout[2].left_boundary, layout[2].right_boundary), (0, 3));
    }

    #[test]
    fn test_forward_references_resolve() {
        // Parent listed before its children.
        let entries = vec![
            LinkageEntry::new(1, true, 2, true, 2.0),
            LinkageEntry::leaves(0, 1, 1.0),
            LinkageEntry::leaves(2, 3, 1.0),
        ];
        let layout = compute_centers(&entries).unwrap();
        assert_eq!(layout[0].center, 1.5);
        assert_eq!((layout[0].left_boundary, layout[0].right_boundary), (0, 3));
    }

    #[test]
    fn test_cycle_is_detected() {
        let entries = vec![
            LinkageEntry::new(1, true, 0, false, 1.0),
            LinkageEntry::new(0, true, 1, false, 2.0),
        ];
        assert!(matches!(
            compute_centers(&entries),
            Err(LinkageError::Cycle { .. })
        ));

        let self_loop = vec![LinkageEntry::new(0, true, 1, false, 1.0)];
        assert_eq!(
            compute_centers(&self_loop),
            Err(LinkageError::Cycle { entry: 0 })
        );
    }

    #[test]
    fn test_non_contiguous_subtree_rejected() {
        let entries = vec![
            LinkageEntry::leaves(0, 2, 1.0),
            LinkageEntry::new(0, true, 1, false, 2.0),
        ];
        assert_eq!(
            compute_centers(&entries),
            Err(LinkageError::NonContiguousSubtree {
                entry: 0,
                leaves: 2,
                left_boundary: 0,
                right_boundary: 2,
            })
        );
    }

    #[test]
    fn test_long_chain_is_iterative() {
        // Root last, every entry waiting on the one before it.
        let n = 100_000;
        let mut entries = Vec::with_capacity(n);
        entries.push(LinkageEntry::leaves(0, 1, 1.0));
        for i in 1..n {
            entries.push(LinkageEntry::new(i - 1, true, i + 1, false, (i + 1) as f64));
        }

        let layout = compute_centers(&entries).unwrap();
        assert_eq!(layout.len(), n);
        assert_eq!((layout[n - 1].left_boundary, layout[n - 1].right_boundary), (0, n));
    }
}
