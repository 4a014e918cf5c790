use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced key a value is persisted under in the browser's local storage.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("no usable {}, using default: {:?}", T::KEY, err);
            Default::default()
        })
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("could not save {}: {:?}", T::KEY, err);
        }
    }
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

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    impl StorageKey for Counter {
        const KEY: &'static str = "shellgame:test:counter";
    }

    #[wasm_bindgen_test]
    fn saved_value_is_loaded_back() {
        LocalStorage::delete(Counter::KEY);
        assert_eq!(Counter::local_or_default(), Counter::default());

        Counter { value: 7 }.local_save();
        assert_eq!(Counter::local_or_default(), Counter { value: 7 });

        LocalStorage::delete(Counter::KEY);
    }

    #[wasm_bindgen_test]
    fn corrupt_value_falls_back_to_default() {
        LocalStorage::set(Counter::KEY, "not a counter").unwrap();
        assert_eq!(Counter::local_or_default(), Counter::default());
        LocalStorage::delete(Counter::KEY);
    }
}
