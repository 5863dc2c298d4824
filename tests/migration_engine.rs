/// Migration engine tests
///
/// This suite validates the engine end to end:
/// - normalization is a stable, non-mutating permutation
/// - path resolution is exact (contiguous runs only, first match wins)
/// - execution is atomic and validator-gated
/// - the `migrate` entry point collapses every failure into an error with
///   no partial value
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use quickcheck::quickcheck;
use serde_json::json;
use versioned_store::envelope::Envelope;
use versioned_store::errors::{ConfigError, MigrateError};
use versioned_store::migration::{
    has_path, migrate, normalize, resolve_path, Migration, MigrationSet, Version,
};

/// A migration whose transform appends a suffix to a string value.
fn append(version: Version, suffix: &'static str) -> Migration {
    Migration::new(version, move |value| {
        let text = value.as_str().ok_or_else(|| anyhow!("expected a string"))?;
        Ok(json!(format!("{text}{suffix}")))
    })
}

/// A migration tagged with an id recoverable by running its transform.
fn tagged(version: Version, id: usize) -> Migration {
    Migration::new(version, move |_| Ok(json!(id)))
}

fn tag_of(migration: &Migration) -> usize {
    let steps = [migration.clone()];
    let out = versioned_store::migration::execute(&steps, json!(null)).unwrap();
    out.as_u64().unwrap() as usize
}

#[test]
fn test_three_step_chain_success() {
    let migrations = vec![append(1, "A"), append(2, "B"), append(3, "C")];
    let record = Envelope::new(1, json!("start"));

    let value = migrate(&migrations, record, 4).unwrap();
    assert_eq!(value, json!("startABC"));
}

#[test]
fn test_gap_in_chain_fails() {
    let migrations = vec![append(1, "A"), append(3, "C")];
    let record = Envelope::new(1, json!("start"));

    let err = migrate(&migrations, record, 4).unwrap_err();
    assert!(matches!(err, MigrateError::NoPath { from: 1, to: 4 }));
}

#[test]
fn test_validator_rejects_pre_existing_value() {
    let migrations = vec![Migration::new(5, |value| {
        Ok(json!(format!("{}pong", value.as_str().unwrap_or_default())))
    })
    .with_validate(|value| Ok(value == &json!("ping")))];
    let record = Envelope::new(5, json!("pong"));

    let err = migrate(&migrations, record, 6).unwrap_err();
    assert!(matches!(err, MigrateError::StepValidation { version: 5 }));
}

#[test]
fn test_empty_migration_list_fails() {
    let record = Envelope::new(1, json!("x"));
    let err = migrate(&[], record, 2).unwrap_err();
    assert!(matches!(
        err,
        MigrateError::Config(ConfigError::EmptyMigrations)
    ));
}

#[test]
fn test_resolve_path_composes_normalize_and_slice() {
    let migrations = vec![tagged(2, 20), tagged(1, 10), tagged(3, 30)];

    let slice = resolve_path(&migrations, 1, 4).unwrap();
    let versions: Vec<Version> = slice.iter().map(|m| m.version).collect();
    let tags: Vec<usize> = slice.iter().map(tag_of).collect();

    assert_eq!(versions, vec![1, 2, 3]);
    assert_eq!(tags, vec![10, 20, 30]);
}

#[test]
fn test_fault_mid_chain_discards_accumulator() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let migrations = vec![
        append(1, "A"),
        append(2, "B"),
        Migration::new(3, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("schema drift"))
        }),
    ];
    let record = Envelope::new(1, json!("start"));

    let err = migrate(&migrations, record, 4).unwrap_err();
    // the faulting step ran exactly once and the "startAB" accumulator is gone
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(err, MigrateError::StepExecution { version: 3, .. }));
}

#[test]
fn test_no_step_runs_when_gating_fails() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let counting = Migration::new(2, move |v| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(v)
    })
    .with_validate({
        let seen = calls.clone();
        move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    });

    // record version 5 has no entry point into [2]
    let record = Envelope::new(5, json!("x"));
    let err = migrate(&[counting], record, 6).unwrap_err();

    assert!(matches!(err, MigrateError::NoPath { from: 5, to: 6 }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_migration_set_reusable_across_calls() {
    let set = MigrationSet::new(vec![append(1, "A"), append(2, "B")]).unwrap();

    let first = set.migrate(Envelope::new(1, json!("x")), 3).unwrap();
    let second = set.migrate(Envelope::new(2, json!("y")), 3).unwrap();

    assert_eq!(first, json!("xAB"));
    assert_eq!(second, json!("yB"));
}

#[test]
fn test_set_resolve_path_reports_without_executing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let set = MigrationSet::new(vec![
        Migration::new(1, move |v| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(v)
        }),
        tagged(2, 2),
    ])
    .unwrap();

    let path = set.resolve_path(1, 3).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

quickcheck! {
    // normalize returns the same multiset of steps, sorted ascending, with
    // equal versions keeping their original relative order
    fn prop_normalize_stable_permutation(versions: Vec<u8>) -> bool {
        let input: Vec<Migration> = versions
            .iter()
            .enumerate()
            .map(|(id, &v)| tagged(v as Version, id))
            .collect();

        let ordered = normalize(input);

        if ordered.len() != versions.len() {
            return false;
        }

        let mut ids_seen = vec![false; versions.len()];
        for pair in ordered.windows(2) {
            if pair[0].version > pair[1].version {
                return false;
            }
            if pair[0].version == pair[1].version && tag_of(&pair[0]) > tag_of(&pair[1]) {
                return false;
            }
        }
        for migration in &ordered {
            let id = tag_of(migration);
            if versions[id] as Version != migration.version {
                return false;
            }
            ids_seen[id] = true;
        }
        ids_seen.into_iter().all(|seen| seen)
    }

    // a contiguous run always has a path across its own span, and dropping
    // any interior step breaks every path that crossed it
    fn prop_contiguous_run_has_path(start: u8, len: u8) -> bool {
        let start = start as Version;
        let len = (len % 16) as Version + 1;
        let run: Vec<Migration> = (start..start + len).map(|v| tagged(v, v as usize)).collect();

        if !has_path(&run, start, start + len) {
            return false;
        }

        if len >= 3 {
            let mut broken = run.clone();
            broken.remove(len as usize / 2);
            if has_path(&broken, start, start + len) {
                return false;
            }
        }

        true
    }

    // resolution over a superset still yields exactly the requested span
    fn prop_resolved_slice_is_minimal(start: u8, len: u8, extra: u8) -> bool {
        let start = start.min(200) as Version;
        let len = (len % 8) as Version + 1;
        let mut migrations: Vec<Migration> =
            (start..start + len).map(|v| tagged(v, v as usize)).collect();
        // an entry far outside the span must never appear in the slice
        let outlier = start + len + 2 + extra as Version;
        migrations.push(tagged(outlier, outlier as usize));

        match resolve_path(&migrations, start, start + len) {
            Some(slice) => {
                let versions: Vec<Version> = slice.iter().map(|m| m.version).collect();
                versions == (start..start + len).collect::<Vec<_>>()
            }
            None => false,
        }
    }
}
