/* tests/scope_tests.rs */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use flagscope::{
	FeatureSystem, FlagError, FlagPatch, FlagValue, MemorySource, ResolvePolicy,
};

fn system_with(source: Arc<MemorySource>, policy: ResolvePolicy) -> FeatureSystem {
	FeatureSystem::builder(["darkMode", "betaSearch"])
		.shared_source(source)
		.resolve(policy)
		.build()
		.unwrap()
}

#[test]
fn test_enter_scope_fills_unknown() {
	let system = FeatureSystem::new(["darkMode", "betaSearch"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();

	assert_eq!(scope.version(), 0);
	assert_eq!(*scope.snapshot(), system.unknown_flags());
}

#[test]
fn test_enter_scope_rejects_unknown_name() {
	let system = FeatureSystem::new(["darkMode"]).unwrap();
	let err = system
		.enter_scope(&FlagPatch::new().set("ghost", true))
		.unwrap_err();
	assert_eq!(err, FlagError::UnknownFlag { name: "ghost".to_string() });
}

#[test]
fn test_set_flags_publishes_new_snapshot() {
	let system = FeatureSystem::new(["darkMode", "betaSearch"]).unwrap();
	let scope = system
		.enter_scope(&FlagPatch::new().set("betaSearch", true))
		.unwrap();
	let before = scope.snapshot();

	let after = scope
		.set_flags(&FlagPatch::new().set("darkMode", false))
		.unwrap();

	assert!(!Arc::ptr_eq(&before, &after));
	assert!(Arc::ptr_eq(&after, &scope.snapshot()));
	assert_eq!(before.get("darkMode").unwrap(), FlagValue::Unknown);
	assert_eq!(after.get("darkMode").unwrap(), FlagValue::Disabled);
	assert_eq!(after.get("betaSearch").unwrap(), FlagValue::Enabled);
	assert_eq!(scope.version(), 1);
}

#[test]
fn test_invalid_write_publishes_nothing() {
	let system = FeatureSystem::new(["darkMode"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let _sub = scope.on_change(move |_| {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	let patch = FlagPatch::new().set("darkMode", true).set("ghost", true);
	assert!(matches!(scope.set_flags(&patch), Err(FlagError::UnknownFlag { .. })));
	assert_eq!(scope.flag("darkMode").unwrap(), FlagValue::Unknown);
	assert_eq!(scope.version(), 0);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_override_wins_over_write() {
	let source = Arc::new(MemorySource::new());
	let system = system_with(Arc::clone(&source), ResolvePolicy::OnWrite);
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();

	source.insert("darkMode", "false");
	scope
		.set_flags(&FlagPatch::new().set("darkMode", true))
		.unwrap();
	assert_eq!(scope.flag("darkMode").unwrap(), FlagValue::Disabled);

	source.remove("darkMode");
	scope
		.set_flags(&FlagPatch::new().set("darkMode", true))
		.unwrap();
	assert_eq!(scope.flag("darkMode").unwrap(), FlagValue::Enabled);
}

#[test]
fn test_on_mount_policy_resolves_once() {
	let source = Arc::new(MemorySource::new());
	source.insert("darkMode", "true");
	let system = system_with(Arc::clone(&source), ResolvePolicy::OnMount);
	let scope = system
		.enter_scope(&FlagPatch::new().set("darkMode", false))
		.unwrap();
	assert_eq!(scope.flag("darkMode").unwrap(), FlagValue::Enabled);

	// Writes merge as given; the source is not consulted again.
	source.insert("betaSearch", "true");
	scope
		.set_flags(&FlagPatch::new().set("darkMode", false))
		.unwrap();
	assert_eq!(scope.flag("darkMode").unwrap(), FlagValue::Disabled);
	assert_eq!(scope.flag("betaSearch").unwrap(), FlagValue::Unknown);
}

#[test]
fn test_listeners_see_published_snapshot() {
	let system = FeatureSystem::new(["darkMode", "betaSearch"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();

	let seen = Arc::new(Mutex::new(Vec::new()));
	let first = Arc::clone(&seen);
	let second = Arc::clone(&seen);
	let _a = scope.on_change(move |snapshot| first.lock().unwrap().push(Arc::clone(snapshot)));
	let _b = scope.on_change(move |snapshot| second.lock().unwrap().push(Arc::clone(snapshot)));

	let published = scope
		.set_flags(&FlagPatch::new().set("betaSearch", true))
		.unwrap();

	let seen = seen.lock().unwrap();
	assert_eq!(seen.len(), 2);
	assert!(seen.iter().all(|snapshot| Arc::ptr_eq(snapshot, &published)));
}

#[test]
fn test_dropping_subscription_unsubscribes() {
	let system = FeatureSystem::new(["darkMode"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);

	let sub = scope.on_change(move |_| {
		counter.fetch_add(1, Ordering::SeqCst);
	});
	assert_eq!(scope.listener_count(), 1);
	scope.set_flags(&FlagPatch::new().set("darkMode", true)).unwrap();

	sub.cancel();
	assert_eq!(scope.listener_count(), 0);
	scope.set_flags(&FlagPatch::new().set("darkMode", false)).unwrap();

	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_listener_may_write_back() {
	let system = FeatureSystem::new(["darkMode", "betaSearch"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();
	let writer = scope.writer();

	// Mirror darkMode into betaSearch once.
	let _sub = scope.on_change(move |snapshot| {
		let dark = snapshot.get("darkMode").unwrap();
		if snapshot.get("betaSearch").unwrap() != dark {
			writer.write(&FlagPatch::new().set("betaSearch", dark)).unwrap();
		}
	});

	scope.set_flags(&FlagPatch::new().set("darkMode", true)).unwrap();
	assert_eq!(scope.flag("betaSearch").unwrap(), FlagValue::Enabled);
	assert_eq!(scope.version(), 2);
}

#[test]
fn test_writer_after_teardown() {
	let system = FeatureSystem::new(["darkMode"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();
	let writer = scope.writer();
	assert!(writer.is_open());

	drop(scope);
	assert!(!writer.is_open());
	assert_eq!(
		writer.write(&FlagPatch::new().set("darkMode", true)).unwrap_err(),
		FlagError::ScopeClosed
	);
}

#[test]
fn test_flags_reads_one_snapshot() {
	let system = FeatureSystem::new(["a", "b"]).unwrap();
	let scope = system
		.enter_scope(&FlagPatch::new().set("a", true).set("b", false))
		.unwrap();

	let values = scope.flags(&["b", "a", "b"]).unwrap();
	assert_eq!(values, [FlagValue::Disabled, FlagValue::Enabled, FlagValue::Disabled]);
}

#[test]
fn test_write_back_is_delivered_in_order() {
	let system = FeatureSystem::new(["darkMode", "betaSearch"]).unwrap();
	let scope = system.enter_scope(&FlagPatch::new()).unwrap();
	let writer = scope.writer();

	// The first listener mirrors darkMode into betaSearch.
	let _mirror = scope.on_change(move |snapshot| {
		let dark = snapshot.get("darkMode").unwrap();
		if snapshot.get("betaSearch").unwrap() != dark {
			writer.write(&FlagPatch::new().set("betaSearch", dark)).unwrap();
		}
	});

	// The second one records every snapshot it is handed.
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let _recorder = scope.on_change(move |snapshot| {
		sink.lock().unwrap().push(Arc::clone(snapshot));
	});

	scope.set_flags(&FlagPatch::new().set("darkMode", true)).unwrap();

	let seen = seen.lock().unwrap();
	let beta: Vec<FlagValue> = seen
		.iter()
		.map(|snapshot| snapshot.get("betaSearch").unwrap())
		.collect();
	assert_eq!(beta, [FlagValue::Unknown, FlagValue::Enabled]);
	assert!(Arc::ptr_eq(seen.last().unwrap(), &scope.snapshot()));
	assert_eq!(scope.version(), 2);
}
