//! Ordering of migration steps and version-chain resolution.
//!
//! A path from `from` to `to` is an unbroken run of steps with versions
//! `from, from + 1, ..., to - 1` in the ordered sequence. Resolution either
//! produces that exact contiguous run or nothing; a gap anywhere inside the
//! candidate range fails fast rather than skipping over it.

use super::step::{Migration, Version};

/// Stably sort migration steps ascending by version.
///
/// Returns a new ordered sequence; equal versions keep their original
/// relative order. Which duplicate "wins" during path resolution is the
/// caller's responsibility, the engine does not enforce uniqueness.
pub fn normalize(migrations: Vec<Migration>) -> Vec<Migration> {
    let mut ordered = migrations;
    ordered.sort_by_key(|migration| migration.version);
    ordered
}

/// Whether `ordered` contains an unbroken version chain from `from` to `to`.
///
/// `ordered` must already be sorted ascending by version (see [`normalize`]).
/// `from == to` never yields a path; callers should not ask for a path when
/// no version change is required.
pub fn has_path(ordered: &[Migration], from: Version, to: Version) -> bool {
    if ordered.is_empty() {
        return false;
    }

    let Some(start) = ordered.iter().position(|m| m.version == from) else {
        return false;
    };

    let Some(finish) = to.checked_sub(1) else {
        return false;
    };

    let mut expected = from;

    for migration in &ordered[start..] {
        if migration.version != expected {
            // chain is broken
            return false;
        }

        if migration.version == finish {
            return true;
        }

        expected = match expected.checked_add(1) {
            Some(next) => next,
            None => return false,
        };
    }

    false
}

/// Resolve the ordered sub-sequence spanning `from` to `to`.
///
/// Normalizes the input and returns the inclusive run of steps with versions
/// `from ..= to - 1`, or `None` when no unbroken chain exists. The caller's
/// input is left untouched.
pub fn resolve_path(
    migrations: &[Migration],
    from: Version,
    to: Version,
) -> Option<Vec<Migration>> {
    let ordered = normalize(migrations.to_vec());
    let (start, end) = path_bounds(&ordered, from, to)?;
    Some(ordered[start..=end].to_vec())
}

/// Inclusive slice bounds of the resolved path within an ordered sequence.
///
/// The index lookups after `has_path` are defensive; they cannot miss once a
/// path is known to exist.
pub(crate) fn path_bounds(
    ordered: &[Migration],
    from: Version,
    to: Version,
) -> Option<(usize, usize)> {
    if !has_path(ordered, from, to) {
        return None;
    }

    let finish = to.checked_sub(1)?;
    let start = ordered.iter().position(|m| m.version == from)?;
    let end = ordered.iter().position(|m| m.version == finish)?;

    Some((start, end))
}
