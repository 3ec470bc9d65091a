//! # whrelay-adapter-virtual
//!
//! Virtual/demo registry that keeps every bus value in memory, for testing
//! and demonstration purposes.
//!
//! ## Provided layout ([`VirtualRegistry::demo`])
//!
//! | Slot | Label | State |
//! |------|-------|-------|
//! | 0 | Bilge Pump | off |
//! | 1 | AC Water Heater | off |
//! | 2 | Cabin Lights | off |
//!
//! The AC input source starts on grid power (`1`).
//!
//! Beyond plain values the registry can take a whole service offline and
//! inject call failures on single objects, and it journals every write.
//!
//! ## Dependency rule
//!
//! Depends on `whrelay-app` (port traits) and `whrelay-domain` only.

mod demo;

pub use demo::{DEMO_AC_SOURCE, DEMO_RELAYS};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use whrelay_app::ports::BusRegistry;
use whrelay_domain::bus::{BusLayout, BusValue};
use whrelay_domain::error::RegistryError;

/// Error carried by injected call failures.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// The object was configured to fail with [`VirtualRegistry::fail`].
    #[error("injected failure")]
    Injected,
}

/// One write attempt seen by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub service: String,
    pub path: String,
    pub value: BusValue,
    /// Whether the write was applied.
    pub accepted: bool,
}

type Key = (String, String);

#[derive(Default)]
struct Store {
    values: HashMap<Key, BusValue>,
    offline: HashSet<String>,
    failing: HashSet<Key>,
    writes: Vec<RecordedWrite>,
}

/// In-memory registry. Clones share the same store.
#[derive(Clone)]
pub struct VirtualRegistry {
    layout: Arc<BusLayout>,
    store: Arc<Mutex<Store>>,
}

fn key(service: &str, path: &str) -> Key {
    (service.to_string(), path.to_string())
}

impl VirtualRegistry {
    /// An empty registry using `layout` for its relay helpers.
    #[must_use]
    pub fn new(layout: BusLayout) -> Self {
        Self {
            layout: Arc::new(layout),
            store: Arc::new(Mutex::new(Store::default())),
        }
    }

    /// The layout used by the relay helpers.
    #[must_use]
    pub fn layout(&self) -> &BusLayout {
        &self.layout
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set a value, creating the object if needed.
    pub fn set(&self, service: &str, path: &str, value: BusValue) {
        self.lock().values.insert(key(service, path), value);
    }

    /// Current value of an object, ignoring offline services and failures.
    #[must_use]
    pub fn get(&self, service: &str, path: &str) -> Option<BusValue> {
        self.lock().values.get(&key(service, path)).cloned()
    }

    /// Take a whole service off (or back on) the bus.
    pub fn set_online(&self, service: &str, online: bool) {
        let mut store = self.lock();
        if online {
            store.offline.remove(service);
        } else {
            store.offline.insert(service.to_string());
        }
    }

    /// Make every call on an object fail until [`heal`](Self::heal).
    pub fn fail(&self, service: &str, path: &str) {
        self.lock().failing.insert(key(service, path));
    }

    /// Undo [`fail`](Self::fail).
    pub fn heal(&self, service: &str, path: &str) {
        self.lock().failing.remove(&key(service, path));
    }

    /// Every write attempt so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.lock().writes.clone()
    }

    fn check(store: &Store, service: &str, path: &str) -> Result<(), RegistryError> {
        if store.offline.contains(service) {
            return Err(RegistryError::ServiceUnavailable {
                service: service.to_string(),
            });
        }
        if store.failing.contains(&key(service, path)) {
            return Err(RegistryError::Call {
                service: service.to_string(),
                path: path.to_string(),
                source: Box::new(VirtualError::Injected),
            });
        }
        Ok(())
    }
}

impl BusRegistry for VirtualRegistry {
    async fn get_value(&self, service: &str, path: &str) -> Result<BusValue, RegistryError> {
        let store = self.lock();
        Self::check(&store, service, path)?;
        store
            .values
            .get(&key(service, path))
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
        let mut store = self.lock();
        let result = Self::check(&store, service, path).and_then(|()| {
            if store.values.contains_key(&key(service, path)) {
                Ok(())
            } else {
                Err(RegistryError::ObjectNotFound {
                    service: service.to_string(),
                    path: path.to_string(),
                })
            }
        });

        store.writes.push(RecordedWrite {
            service: service.to_string(),
            path: path.to_string(),
            value: value.clone(),
            accepted: result.is_ok(),
        });
        if result.is_ok() {
            tracing::debug!(service, path, %value, "virtual value written");
            store.values.insert(key(service, path), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "com.victronenergy.system";

    fn registry() -> VirtualRegistry {
        let registry = VirtualRegistry::new(BusLayout::default());
        registry.set(SYSTEM, "/Relay/0/State", BusValue::Int(0));
        registry
    }

    #[tokio::test]
    async fn should_read_stored_value() {
        let registry = registry();
        let value = registry.get_value(SYSTEM, "/Relay/0/State").await.unwrap();
        assert_eq!(value, BusValue::Int(0));
    }

    #[tokio::test]
    async fn should_report_missing_object() {
        let registry = registry();
        let result = registry.get_value(SYSTEM, "/Relay/9/State").await;
        assert!(matches!(result, Err(RegistryError::ObjectNotFound { .. })));
    }

    #[tokio::test]
    async fn should_report_offline_service() {
        let registry = registry();
        registry.set_online(SYSTEM, false);
        let result = registry.get_value(SYSTEM, "/Relay/0/State").await;
        assert!(matches!(
            result,
            Err(RegistryError::ServiceUnavailable { .. })
        ));

        registry.set_online(SYSTEM, true);
        assert!(registry.get_value(SYSTEM, "/Relay/0/State").await.is_ok());
    }

    #[tokio::test]
    async fn should_fail_injected_object_until_healed() {
        let registry = registry();
        registry.fail(SYSTEM, "/Relay/0/State");
        let result = registry.get_value(SYSTEM, "/Relay/0/State").await;
        assert!(matches!(result, Err(RegistryError::Call { .. })));

        registry.heal(SYSTEM, "/Relay/0/State");
        assert!(registry.get_value(SYSTEM, "/Relay/0/State").await.is_ok());
    }

    #[tokio::test]
    async fn should_apply_and_journal_write() {
        let registry = registry();
        registry
            .set_value(SYSTEM, "/Relay/0/State", BusValue::Int(1))
            .await
            .unwrap();

        assert_eq!(
            registry.get(SYSTEM, "/Relay/0/State"),
            Some(BusValue::Int(1))
        );
        assert_eq!(
            registry.writes(),
            vec![RecordedWrite {
                service: SYSTEM.to_string(),
                path: "/Relay/0/State".to_string(),
                value: BusValue::Int(1),
                accepted: true,
            }]
        );
    }

    #[tokio::test]
    async fn should_journal_rejected_write_without_applying_it() {
        let registry = registry();
        registry.fail(SYSTEM, "/Relay/0/State");
        let result = registry
            .set_value(SYSTEM, "/Relay/0/State", BusValue::Int(1))
            .await;

        assert!(result.is_err());
        assert_eq!(
            registry.get(SYSTEM, "/Relay/0/State"),
            Some(BusValue::Int(0))
        );
        assert!(!registry.writes()[0].accepted);
    }

    #[tokio::test]
    async fn should_not_create_objects_on_write() {
        let registry = registry();
        let result = registry
            .set_value(SYSTEM, "/Relay/5/State", BusValue::Int(1))
            .await;
        assert!(matches!(result, Err(RegistryError::ObjectNotFound { .. })));
        assert_eq!(registry.get(SYSTEM, "/Relay/5/State"), None);
    }

    #[tokio::test]
    async fn should_share_store_between_clones() {
        let registry = registry();
        let clone = registry.clone();
        clone.set(SYSTEM, "/Ac/ActiveIn/Source", BusValue::Int(3));
        assert_eq!(
            registry.get(SYSTEM, "/Ac/ActiveIn/Source"),
            Some(BusValue::Int(3))
        );
    }
}
