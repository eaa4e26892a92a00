#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use chainkit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache against a recency model
//
// Front of the model is most recently used. After every operation the cache
// must agree with the model entry for entry and keep its key/node bijection.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = 1 + usize::from(data[0] % 16);
    let mut cache: LruCache<u8, u8> = match LruCache::new(capacity) {
        Ok(cache) => cache,
        Err(_) => return,
    };
    let mut model: VecDeque<(u8, u8)> = VecDeque::new();

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 5;
        let key = data[idx + 1] % 32;
        let value = data[idx + 2];
        let pos = model.iter().position(|(k, _)| *k == key);

        match op {
            0 => {
                let evicted = cache.put(key, value);
                if let Some(p) = pos {
                    model.remove(p);
                }
                model.push_front((key, value));
                let expected = if model.len() > capacity { model.pop_back() } else { None };
                assert_eq!(evicted, expected);
            }
            1 => {
                let got = cache.get(&key).copied();
                let expected = pos.and_then(|p| model.remove(p)).map(|entry| {
                    model.push_front(entry);
                    entry.1
                });
                assert_eq!(got, expected);
            }
            2 => {
                let expected = pos.and_then(|p| model.remove(p)).map(|(_, v)| v);
                assert_eq!(cache.remove(&key), expected);
            }
            3 => {
                assert_eq!(cache.pop_lru(), model.pop_back());
            }
            4 => {
                assert_eq!(cache.recency_rank(&key), pos);
                assert_eq!(cache.peek(&key).copied(), pos.map(|p| model[p].1));
            }
            _ => unreachable!(),
        }

        assert_eq!(cache.len(), model.len());
        assert!(cache.iter().map(|(k, v)| (*k, *v)).eq(model.iter().copied()));
        assert!(cache.check_invariants().is_ok());
        idx += 3;
    }
});
