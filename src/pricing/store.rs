//! Shared pricing configuration store.
//!
//! # Responsibilities
//! - Hold the current base price and tax rate
//! - Serve consistent snapshots to concurrent readers
//! - Apply single-field updates from concurrent writers
//!
//! # Design Decisions
//! - A single RwLock around the whole pair, so a snapshot is never torn
//! - Poisoning is ignored: the guarded value is two plain floats and is
//!   always valid, so a panicking writer cannot leave it half-updated

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::pricing::types::PriceSettings;

/// Process-wide pricing configuration, shared between handlers via Arc.
#[derive(Debug, Default)]
pub struct ConfigStore {
    settings: RwLock<PriceSettings>,
}

impl ConfigStore {
    /// Create a store with zeroed base price and tax rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given settings.
    pub fn with_settings(settings: PriceSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Current snapshot of the configuration.
    pub fn get(&self) -> PriceSettings {
        *self.read()
    }

    /// Replace the base price.
    pub fn set_base_price(&self, base_price: f64) {
        self.write().base_price = base_price;
    }

    /// Replace the tax rate.
    pub fn set_tax_rate(&self, tax_rate: f64) {
        self.write().tax_rate = tax_rate;
    }

    fn read(&self) -> RwLockReadGuard<'_, PriceSettings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PriceSettings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_defaults_to_zero() {
        let store = ConfigStore::new();
        assert_eq!(store.get(), PriceSettings { base_price: 0.0, tax_rate: 0.0 });
    }

    #[test]
    fn test_setters_touch_one_field() {
        let store = ConfigStore::new();
        store.set_base_price(100.0);
        assert_eq!(store.get(), PriceSettings { base_price: 100.0, tax_rate: 0.0 });

        store.set_tax_rate(20.0);
        assert_eq!(store.get(), PriceSettings { base_price: 100.0, tax_rate: 20.0 });
    }

    #[test]
    fn test_setting_same_value_twice_is_idempotent() {
        let store = ConfigStore::new();
        store.set_tax_rate(7.5);
        let first = store.get();
        store.set_tax_rate(7.5);
        assert_eq!(store.get(), first);
    }

    #[test]
    fn test_concurrent_writers_last_write_wins() {
        let store = Arc::new(ConfigStore::new());
        let values: Vec<f64> = (1..=64).map(|i| i as f64 * 1.25).collect();

        let handles: Vec<_> = values
            .iter()
            .copied()
            .map(|v| {
                let store = store.clone();
                thread::spawn(move || store.set_base_price(v))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let final_price = store.get().base_price;
        assert!(
            values.contains(&final_price),
            "final base price {final_price} was never written"
        );
        assert_eq!(store.get().tax_rate, 0.0);
    }

    #[test]
    fn test_readers_never_see_torn_pair() {
        // Writers keep both fields equal; any reader seeing them differ saw a torn update.
        let store = Arc::new(ConfigStore::new());
        let writer_store = store.clone();
        let writer = thread::spawn(move || {
            for i in 0..10_000 {
                let v = i as f64;
                let mut guard = writer_store.write();
                guard.base_price = v;
                guard.tax_rate = v;
            }
        });

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        let snapshot = store.get();
                        assert_eq!(snapshot.base_price, snapshot.tax_rate);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let store = Arc::new(ConfigStore::with_settings(PriceSettings {
            base_price: 5.0,
            tax_rate: 1.0,
        }));
        let poisoner = store.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(store.get().base_price, 5.0);
        store.set_base_price(6.0);
        assert_eq!(store.get().base_price, 6.0);
    }
}
