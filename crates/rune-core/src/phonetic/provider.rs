use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::source::{BundledSource, HttpSource, PhoneticSource};
use super::{PhoneticError, PhoneticForms, PinyinTable, Romanize};
use crate::settings::{settings, PhoneticSettings};

/// Lifecycle of the pinyin table. `Loaded` and `Unavailable` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneticState {
    Unloaded,
    Loading,
    Loaded,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(u64) + Send + Sync>;

/// Lazily loaded pinyin romanizer with a process-wide cache.
///
/// Only one load runs per provider: callers arriving while it is in flight
/// wait for the same outcome. A failed load is not retried.
pub struct PhoneticProvider {
    sources: Vec<Arc<dyn PhoneticSource>>,
    timeout: Duration,
    state: Mutex<PhoneticState>,
    settled: Condvar,
    table: OnceLock<Arc<PinyinTable>>,
    cache: RwLock<HashMap<String, Option<PhoneticForms>>>,
    ready_version: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
    load_attempts: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PhoneticProvider {
    /// `sources` are tried in order; each attempt gets `timeout`.
    pub fn new(sources: Vec<Arc<dyn PhoneticSource>>, timeout: Duration) -> Self {
        Self {
            sources,
            timeout,
            state: Mutex::new(PhoneticState::Unloaded),
            settled: Condvar::new(),
            table: OnceLock::new(),
            cache: RwLock::new(HashMap::new()),
            ready_version: AtomicU64::new(0),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Remote source first (when configured), then the bundled table.
    pub fn from_settings(s: &PhoneticSettings) -> Self {
        let mut sources: Vec<Arc<dyn PhoneticSource>> = Vec::new();
        let url = s.remote_url.trim();
        if !url.is_empty() {
            sources.push(Arc::new(HttpSource::new(url)));
        }
        if s.use_bundled {
            sources.push(Arc::new(BundledSource));
        }
        Self::new(sources, s.timeout())
    }

    /// A provider that starts out `Loaded` with `table`.
    pub fn preloaded(table: PinyinTable) -> Self {
        let provider = Self::new(Vec::new(), Duration::ZERO);
        let _ = provider.table.set(Arc::new(table));
        provider.ready_version.store(1, Ordering::SeqCst);
        *lock(&provider.state) = PhoneticState::Loaded;
        provider
    }

    /// Get or initialize the global provider.
    pub fn global() -> &'static Arc<PhoneticProvider> {
        static INSTANCE: OnceLock<Arc<PhoneticProvider>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(Self::from_settings(&settings().phonetic)))
    }

    pub fn state(&self) -> PhoneticState {
        *lock(&self.state)
    }

    /// Bumped once when the table becomes available.
    pub fn ready_version(&self) -> u64 {
        self.ready_version.load(Ordering::SeqCst)
    }

    /// Number of loads actually started (0 or 1).
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }

    /// Load the table if needed and block until the outcome is known.
    ///
    /// Returns `true` iff phonetic data is available.
    pub fn ensure_loaded(&self) -> bool {
        let mut state = lock(&self.state);
        loop {
            match *state {
                PhoneticState::Loaded => return true,
                PhoneticState::Unavailable => return false,
                PhoneticState::Loading => {
                    state = self
                        .settled
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                PhoneticState::Unloaded => {
                    *state = PhoneticState::Loading;
                    drop(state);
                    return self.run_load();
                }
            }
        }
    }

    /// Start loading on a background thread without waiting.
    pub fn request_load(self: &Arc<Self>) {
        if self.state() != PhoneticState::Unloaded {
            return;
        }
        let provider = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("rune-phonetic-load".into())
            .spawn(move || {
                provider.ensure_loaded();
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn pinyin loader");
        }
    }

    /// Register a callback invoked with the new ready version.
    pub fn subscribe(&self, observer: impl Fn(u64) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        lock(&self.observers).push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() < before
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn run_load(&self) -> bool {
        let attempt = self.load_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        info!(attempt, sources = self.sources.len(), "loading pinyin table");

        let table = self.sources.iter().find_map(|source| {
            match load_with_timeout(Arc::clone(source), self.timeout) {
                Ok(table) => {
                    info!(source = source.name(), readings = table.len(), "pinyin table loaded");
                    Some(table)
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "pinyin source failed");
                    None
                }
            }
        });

        let loaded = match table {
            Some(table) => {
                let _ = self.table.set(Arc::new(table));
                true
            }
            None => {
                warn!("no pinyin source available; phonetic matching disabled");
                false
            }
        };
        let version = if loaded {
            self.ready_version.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.ready_version()
        };

        *lock(&self.state) = if loaded {
            PhoneticState::Loaded
        } else {
            PhoneticState::Unavailable
        };
        self.settled.notify_all();

        if loaded {
            // Snapshot so observers may (un)subscribe from inside the callback.
            let observers: Vec<Observer> = lock(&self.observers)
                .iter()
                .map(|(_, o)| Arc::clone(o))
                .collect();
            debug!(version, observers = observers.len(), "publishing phonetic ready version");
            for observer in observers {
                observer(version);
            }
        }
        loaded
    }
}

impl Romanize for PhoneticProvider {
    fn romanize(&self, text: &str) -> Option<PhoneticForms> {
        let table = self.table.get()?;
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
        {
            return hit.clone();
        }
        let forms = table.romanize(text);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(text.to_string(), forms.clone());
        forms
    }
}

/// Run `source.load()` on its own thread, giving up after `timeout`.
///
/// A load that outlives the timeout keeps running detached; its result is
/// dropped.
fn load_with_timeout(
    source: Arc<dyn PhoneticSource>,
    timeout: Duration,
) -> Result<PinyinTable, PhoneticError> {
    let name = source.name().to_string();
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name(format!("rune-phonetic-{name}"))
        .spawn(move || {
            let _ = tx.send(source.load());
        })?;
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(PhoneticError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(PhoneticError::SourcePanicked(name)),
    }
}
