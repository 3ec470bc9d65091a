//! In-memory [`BusRegistry`] used by the unit tests of this crate.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use whrelay_domain::bus::BusValue;
use whrelay_domain::error::RegistryError;

use crate::ports::BusRegistry;

type Key = (String, String);

#[derive(Default)]
struct Inner {
    values: HashMap<Key, BusValue>,
    scripts: HashMap<Key, VecDeque<Option<BusValue>>>,
    failing: HashSet<Key>,
    reads: Vec<Key>,
    writes: Vec<(String, BusValue)>,
}

/// Cloneable handle; clones share the same store.
#[derive(Clone, Default)]
pub(crate) struct FakeRegistry {
    inner: Arc<Mutex<Inner>>,
}

fn key(service: &str, path: &str) -> Key {
    (service.to_string(), path.to_string())
}

impl FakeRegistry {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub(crate) fn insert(&self, service: &str, path: &str, value: BusValue) {
        self.lock().values.insert(key(service, path), value);
    }

    /// Make every call on this object fail.
    pub(crate) fn fail(&self, service: &str, path: &str) {
        self.lock().failing.insert(key(service, path));
    }

    /// Queue successive read results; `None` means "service unavailable".
    /// Once the script runs out, reads fall back to the stored value.
    pub(crate) fn script(&self, service: &str, path: &str, readings: Vec<Option<BusValue>>) {
        self.lock()
            .scripts
            .insert(key(service, path), readings.into_iter().collect());
    }

    pub(crate) fn value(&self, service: &str, path: &str) -> Option<BusValue> {
        self.lock().values.get(&key(service, path)).cloned()
    }

    pub(crate) fn reads(&self) -> Vec<(String, String)> {
        self.lock().reads.clone()
    }

    /// Every write attempted, successful or not, as `(path, value)`.
    pub(crate) fn writes(&self) -> Vec<(String, BusValue)> {
        self.lock().writes.clone()
    }
}

impl BusRegistry for FakeRegistry {
    async fn get_value(&self, service: &str, path: &str) -> Result<BusValue, RegistryError> {
        let mut inner = self.lock();
        let k = key(service, path);
        inner.reads.push(k.clone());

        if inner.failing.contains(&k) {
            return Err(RegistryError::Call {
                service: service.to_string(),
                path: path.to_string(),
                source: "injected failure".into(),
            });
        }

        if let Some(next) = inner.scripts.get_mut(&k).and_then(VecDeque::pop_front) {
            return match next {
                Some(value) => {
                    inner.values.insert(k, value.clone());
                    Ok(value)
                }
                None => Err(RegistryError::ServiceUnavailable {
                    service: service.to_string(),
                }),
            };
        }

        inner
            .values
            .get(&k)
            .cloned()
            .ok_or_else(|| RegistryError::ObjectNotFound {
                service: service.to_string(),
                path: path.to_string(),
            })
    }

    async fn set_value(
        &self,
        service: &str,
        path: &str,
        value: BusValue,
    ) -> Result<(), RegistryError> {
        let mut inner = self.lock();
        let k = key(service, path);
        inner.writes.push((path.to_string(), value.clone()));

        if inner.failing.contains(&k) {
            return Err(RegistryError::Call {
                service: service.to_string(),
                path: path.to_string(),
                source: "injected failure".into(),
            });
        }
        if !inner.values.contains_key(&k) {
            return Err(RegistryError::ObjectNotFound {
                service: service.to_string(),
                path: path.to_string(),
            });
        }
        inner.values.insert(k, value);
        Ok(())
    }
}
