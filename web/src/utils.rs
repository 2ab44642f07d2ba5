use chrono::{DateTime, Utc};
use connections_core::{Clock, SnapshotStore, StoreError};
use gloo::storage::{LocalStorage, Storage};

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        utc_now()
    }
}

/// Keeps the snapshot text in `window.localStorage`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalSnapshotStore;

impl SnapshotStore for LocalSnapshotStore {
    fn read(&self) -> Option<String> {
        match LocalStorage::raw().get_item(Self::KEY) {
            Ok(data) => data,
            Err(err) => {
                log::error!("failed to read snapshot: {:?}", err);
                None
            }
        }
    }

    fn write(&self, data: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(Self::KEY, data)
            .map_err(|err| StoreError::Write(format!("{:?}", err)))
    }

    fn remove(&self) {
        LocalStorage::delete(Self::KEY);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_store_keeps_and_forgets_snapshot() {
        let store = LocalSnapshotStore;
        store.write("{\"words\":[]}").unwrap();
        assert_eq!(store.read().as_deref(), Some("{\"words\":[]}"));

        store.remove();
        assert_eq!(store.read(), None);
    }

    #[wasm_bindgen_test]
    fn browser_clock_is_past_the_epoch() {
        assert!(BrowserClock.now().timestamp_millis() > 0);
    }
}
