use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use obfmap_config::ResolverConfig;
use obfmap_resolve::{
    AliasTable, ClassMembers, Direction, MappingSnapshot, MappingSource, NameDomain,
    NameResolver, RawMemberMaps, ResolveError, Resolver, ResolverCell, RESOLVE_TARGET,
};
use pretty_assertions::assert_eq;
use tracing::Level;

use crate::support::{capture, snapshot};

/// Fails the first `failures` builds, then serves the fixture snapshot.
struct Flaky {
    failures: usize,
    builds: AtomicUsize,
    inner: MappingSnapshot,
}

impl Flaky {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            builds: AtomicUsize::new(0),
            inner: snapshot(),
        }
    }
}

impl MappingSource for Flaky {
    fn class_table(&self) -> obfmap_resolve::Result<Vec<(String, String)>> {
        let attempt = self.builds.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(ResolveError::Source("mapping data unavailable".to_string()));
        }
        self.inner.class_table()
    }

    fn method_groups(&self) -> obfmap_resolve::Result<Vec<ClassMembers>> {
        self.inner.method_groups()
    }

    fn field_groups(&self) -> obfmap_resolve::Result<Vec<ClassMembers>> {
        self.inner.field_groups()
    }

    fn method_aliases(&self) -> obfmap_resolve::Result<AliasTable> {
        self.inner.method_aliases()
    }

    fn field_aliases(&self) -> obfmap_resolve::Result<AliasTable> {
        self.inner.field_aliases()
    }

    fn raw_method_maps(&self) -> obfmap_resolve::Result<RawMemberMaps> {
        self.inner.raw_method_maps()
    }

    fn raw_field_maps(&self) -> obfmap_resolve::Result<RawMemberMaps> {
        self.inner.raw_field_maps()
    }
}

#[test]
fn failed_creation_is_logged_and_leaves_the_cell_empty() {
    let cell = ResolverCell::new();
    let source = Flaky::new(1);

    let (resolver, events) = capture(|| cell.get_or_create(true, &source));
    assert!(resolver.is_none());
    assert!(cell.get().is_none());
    assert_eq!(
        events
            .iter()
            .filter(|event| event.level == Level::ERROR)
            .count(),
        1,
        "events: {events:?}"
    );

    let resolver = cell.get_or_create(true, &source).expect("second attempt succeeds");
    assert!(resolver.is_obfuscated());
    assert!(Arc::ptr_eq(&resolver, &cell.get().unwrap()));
}

#[test]
fn created_resolver_is_never_rebuilt() {
    let cell = ResolverCell::new();
    let source = Flaky::new(0);

    let first = cell.get_or_create(true, &source).unwrap();
    // A later request for the other variant still sees the original instance.
    let second = cell.get_or_create(false, &source).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(second.is_obfuscated());
    assert_eq!(source.builds.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_callers_share_one_build() {
    let cell = ResolverCell::new();
    let source = Flaky::new(0);

    let resolvers: Vec<Arc<Resolver>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cell.get_or_create(true, &source).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(source.builds.load(Ordering::SeqCst), 1);
    for resolver in &resolvers {
        assert!(Arc::ptr_eq(resolver, &resolvers[0]));
        assert_eq!(
            resolver.method_name("net/Foo", "run", "()V", NameDomain::Runtime),
            "b"
        );
    }
}

#[test]
fn resolver_builds_from_config_and_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.json");
    std::fs::write(&path, serde_json::to_string(&snapshot()).unwrap()).unwrap();

    let cell = ResolverCell::new();
    let resolver = cell
        .get_or_create_from_config(&ResolverConfig {
            obfuscated: true,
            mappings: Some(path),
        })
        .unwrap();
    assert_eq!(resolver.class_name("net/Foo", Direction::ToRuntime), "a");
}

#[test]
fn obfuscated_config_without_mappings_is_an_error() {
    let err = Resolver::from_config(&ResolverConfig::default()).unwrap_err();
    assert!(matches!(err, ResolveError::MissingMappings), "unexpected error: {err}");
}

#[test]
fn unobfuscated_config_needs_no_mappings() {
    let resolver = Resolver::from_config(&ResolverConfig {
        obfuscated: false,
        mappings: None,
    })
    .unwrap();
    assert!(!resolver.is_obfuscated());
}

#[test]
fn non_bijective_snapshot_fails_to_build() {
    let mut snapshot = snapshot();
    snapshot.classes.push(obfmap_resolve::ClassPair {
        human: "net/Other".to_string(),
        runtime: "a".to_string(),
    });
    let err = Resolver::build(true, &snapshot).unwrap_err();
    assert!(
        matches!(err, ResolveError::NonBijectiveClassTable { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn each_build_announces_its_variant_once() {
    for obfuscated in [true, false] {
        let (resolver, events) = capture(|| Resolver::build(obfuscated, &snapshot()).unwrap());
        assert_eq!(resolver.is_obfuscated(), obfuscated);

        let infos: Vec<_> = events
            .iter()
            .filter(|event| event.level == Level::INFO && event.target == RESOLVE_TARGET)
            .collect();
        assert_eq!(infos.len(), 1, "events: {events:?}");
        let message = &infos[0].fields["message"];
        assert_eq!(message.contains("without obfuscation"), !obfuscated, "{message}");
    }
}
