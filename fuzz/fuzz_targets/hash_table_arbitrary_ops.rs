#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use chainkit::error::TableError;
use chainkit::store::table::HashTable;

// Fuzz arbitrary put/update/remove/get sequences on HashTable
//
// The first byte picks a hash function so both well-spread and
// collision-heavy tables are covered.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let hash: fn(&u8) -> u64 = match data[0] % 3 {
        0 => |k| u64::from(*k),
        1 => |k| u64::from(*k % 4),
        _ => |_| 0,
    };
    let mut table = HashTable::with_config(2 + usize::from(data[0] % 8), 0.75, hash);
    let mut model: HashMap<u8, u8> = HashMap::new();

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 5;
        let key = data[idx + 1];
        let value = data[idx + 2];

        match op {
            0 => {
                let result = table.put(key, value);
                if model.contains_key(&key) {
                    assert_eq!(result, Err(TableError::KeyAlreadyExists));
                } else {
                    assert_eq!(result, Ok(()));
                    model.insert(key, value);
                }
            }
            1 => {
                let result = table.update(&key, value);
                match model.insert(key, value) {
                    Some(old) => assert_eq!(result, Ok(old)),
                    None => {
                        model.remove(&key);
                        assert_eq!(result, Err(TableError::KeyNotFound));
                    }
                }
            }
            2 => {
                let result = table.remove(&key);
                match model.remove(&key) {
                    Some(old) => assert_eq!(result, Ok(old)),
                    None => assert_eq!(result, Err(TableError::KeyNotFound)),
                }
            }
            3 => {
                assert_eq!(table.get(&key), model.get(&key));
                assert_eq!(table.contains(&key), model.contains_key(&key));
            }
            4 => {
                assert_eq!(table.insert(key, value), model.insert(key, value));
            }
            _ => unreachable!(),
        }

        assert_eq!(table.len(), model.len());
        idx += 3;
    }

    assert!(table.check_invariants().is_ok());
});
