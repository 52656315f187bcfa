//! End-to-end lifecycle tests: lazy creation, adoption, persistence across
//! scene loads, shutdown latching, and concurrent first access.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record};
use sl_core::{Error, Result};
use sl_host::{
    ContainerId, HostEnvironment, LifecycleHook, SceneHost, SharedComponent, TypeKey,
};
use sl_singleton::{SingletonAccessor, SingletonRegistry};

// ── Component types under test ────────────────────────────────────────────────

#[derive(Default)]
struct AudioMixer {
    _volume: f32,
}

#[derive(Default)]
struct SaveSystem;

#[derive(Default)]
struct WorldClock;

#[derive(Default)]
struct Telemetry;

#[derive(Default)]
struct InputRouter;

fn fresh() -> (Arc<SceneHost>, Arc<SingletonRegistry>) {
    let host = Arc::new(SceneHost::new());
    let registry = SingletonRegistry::new(host.clone());
    (host, registry)
}

// ── Warning capture ───────────────────────────────────────────────────────────

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CapturingLogger;

static LOGGER: CapturingLogger = CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() <= Level::Warn {
            CAPTURED.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn install_logger() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Warn);
}

// ── Lazy creation and reuse ───────────────────────────────────────────────────

#[test]
fn repeated_access_returns_the_identical_instance() {
    let (_host, registry) = fresh();
    let accessor = SingletonAccessor::<AudioMixer>::with_default(registry);

    let first = accessor.instance().unwrap();
    let second = accessor.instance().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn creation_names_and_persists_the_container() {
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<SaveSystem>::with_default(registry.clone());

    accessor.instance().unwrap();

    let container = registry.container_of::<SaveSystem>().unwrap();
    assert_eq!(
        host.container_name(container).unwrap(),
        "SaveSystem (Singleton)"
    );
    assert_eq!(host.is_persistent(container), Some(true));
}

#[test]
fn preexisting_instance_is_adopted_not_duplicated() {
    let host = Arc::new(SceneHost::new());
    let id = host.spawn("Audio Root").unwrap();
    let placed = host.attach(id, AudioMixer::default()).unwrap();

    let registry = SingletonRegistry::new(host.clone());
    let accessor = SingletonAccessor::<AudioMixer>::with_default(registry.clone());

    let adopted = accessor.instance().unwrap();
    assert!(Arc::ptr_eq(&adopted, &placed));
    assert_eq!(host.container_count(), 1);
    assert_eq!(registry.container_of::<AudioMixer>(), Some(id));
}

// ── Shutdown behavior ─────────────────────────────────────────────────────────

#[test]
fn no_instance_is_created_after_shutdown() {
    let (host, registry) = fresh();
    host.quit();

    let accessor = SingletonAccessor::<AudioMixer>::with_default(registry);
    assert!(accessor.instance().is_none());
    assert_eq!(host.container_count(), 0);
    assert!(matches!(
        accessor.try_instance(),
        Err(Error::PostShutdownAccess {
            type_name: "AudioMixer"
        })
    ));
}

#[test]
fn shutdown_signal_is_idempotent() {
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<AudioMixer>::with_default(registry.clone());
    accessor.instance().unwrap();

    registry.on_shutdown_signal();
    registry.on_shutdown_signal();
    host.quit();
    host.quit();

    assert!(registry.is_shutting_down());
    assert!(accessor.instance().is_none());
}

#[test]
fn post_shutdown_access_logs_a_warning_naming_the_type() {
    install_logger();
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<Telemetry>::with_default(registry.clone());

    let instance = accessor.instance().unwrap();
    let container = registry.container_of::<Telemetry>().unwrap();
    assert_eq!(
        host.container_name(container).unwrap(),
        "Telemetry (Singleton)"
    );
    assert_eq!(host.is_persistent(container), Some(true));

    host.quit();
    assert!(accessor.instance().is_none());
    assert!(CAPTURED
        .lock()
        .unwrap()
        .iter()
        .any(|warning| warning.contains("Telemetry")));
    drop(instance);
}

#[test]
fn destroying_the_backing_container_latches_shutdown() {
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<WorldClock>::with_default(registry.clone());
    accessor.instance().unwrap();

    let container = registry.container_of::<WorldClock>().unwrap();
    host.destroy(container).unwrap();

    assert!(registry.is_shutting_down());
    assert!(accessor.instance().is_none());
}

#[test]
fn destroying_an_unrelated_container_changes_nothing() {
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<WorldClock>::with_default(registry.clone());
    let before = accessor.instance().unwrap();

    let prop = host.spawn("Prop").unwrap();
    host.destroy(prop).unwrap();

    assert!(!registry.is_shutting_down());
    let after = accessor.instance().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

// ── Scene transitions ─────────────────────────────────────────────────────────

#[test]
fn instance_survives_scene_loads() {
    let (host, registry) = fresh();
    let accessor = SingletonAccessor::<SaveSystem>::with_default(registry.clone());
    let before = accessor.instance().unwrap();

    let enemy = host.spawn("Enemy").unwrap();
    host.load_scene("level-2");
    host.load_scene("level-3");

    assert!(!host.contains(enemy));
    assert!(!registry.is_shutting_down());
    let after = accessor.instance().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[test]
fn concurrent_first_access_creates_exactly_one_instance() {
    let (host, registry) = fresh();
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let accessor = SingletonAccessor::new(registry, move || {
        counted.fetch_add(1, Ordering::Relaxed);
        WorldClock
    });

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let accessor = accessor.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                barrier.wait();
                accessor.instance().unwrap()
            })
        })
        .collect();
    let instances: Vec<Arc<WorldClock>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(host.container_count(), 1);
    for pair in instances.windows(2) {
        assert!(Arc::ptr_eq(&pair[0], &pair[1]));
    }
}

// ── Host faults ───────────────────────────────────────────────────────────────

/// Delegates to a `SceneHost` but refuses container creation while the
/// flag is raised.
struct FlakyHost {
    inner: SceneHost,
    refuse_creation: AtomicBool,
}

impl FlakyHost {
    fn new() -> Self {
        Self {
            inner: SceneHost::new(),
            refuse_creation: AtomicBool::new(true),
        }
    }

    fn recover(&self) {
        self.refuse_creation.store(false, Ordering::Release);
    }
}

impl HostEnvironment for FlakyHost {
    fn find_existing(&self, key: TypeKey) -> Option<(ContainerId, SharedComponent)> {
        self.inner.find_existing(key)
    }

    fn create_container(&self, name: &str) -> Result<ContainerId> {
        if self.refuse_creation.load(Ordering::Acquire) {
            return Err(Error::Host("object creation refused".into()));
        }
        self.inner.create_container(name)
    }

    fn attach_component(
        &self,
        container: ContainerId,
        key: TypeKey,
        component: SharedComponent,
    ) -> Result<()> {
        self.inner.attach_component(container, key, component)
    }

    fn mark_persistent(&self, container: ContainerId) -> Result<()> {
        self.inner.mark_persistent(container)
    }

    fn register_shutdown_hook(&self, hook: LifecycleHook) {
        self.inner.register_shutdown_hook(hook)
    }
}

#[test]
fn a_failed_creation_is_not_cached() {
    let host = Arc::new(FlakyHost::new());
    let registry = SingletonRegistry::new(host.clone());
    let accessor = SingletonAccessor::<InputRouter>::with_default(registry);

    assert!(matches!(accessor.try_instance(), Err(Error::Host(_))));
    assert!(accessor.instance().is_none());

    host.recover();
    assert!(accessor.instance().is_some());
    assert_eq!(host.inner.container_count(), 1);
}
