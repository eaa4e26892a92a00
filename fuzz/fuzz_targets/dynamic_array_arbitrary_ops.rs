#![no_main]

use libfuzzer_sys::fuzz_target;
use chainkit::ds::DynamicArray;
use chainkit::error::ArrayError;

// Fuzz arbitrary operation sequences on DynamicArray against a Vec model
//
// Indexes are drawn from a signed byte so negative and out-of-range
// positions are exercised as often as valid ones.
fuzz_target!(|data: &[u8]| {
    let mut array: DynamicArray<u8> = DynamicArray::new();
    let mut model: Vec<u8> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let arg = data[idx + 1];
        let index = isize::from(arg as i8);
        let len = model.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        let in_range = resolved >= 0 && resolved < len;

        match op {
            0 => {
                array.push(arg);
                model.push(arg);
            }
            1 => {
                let got = array.get(index).copied();
                if in_range {
                    assert_eq!(got, Ok(model[resolved as usize]));
                } else {
                    assert_eq!(got, Err(ArrayError::IndexOutOfRange { index, len: model.len() }));
                }
            }
            2 => {
                let result = array.set(index, arg);
                if in_range {
                    assert!(result.is_ok());
                    model[resolved as usize] = arg;
                } else {
                    assert!(result.is_err());
                }
            }
            3 => {
                let pos = usize::from(arg) % (model.len() + 2);
                let result = array.insert_at(pos, arg);
                if pos <= model.len() {
                    assert!(result.is_ok());
                    model.insert(pos, arg);
                } else {
                    assert!(result.is_err());
                }
            }
            4 => {
                let result = array.remove_at(index);
                if model.is_empty() {
                    assert_eq!(result, Err(ArrayError::EmptyContainer));
                } else if in_range {
                    assert_eq!(result, Ok(model.remove(resolved as usize)));
                } else {
                    assert!(result.is_err());
                }
            }
            5 => {
                assert_eq!(array.pop().ok(), model.pop());
            }
            6 => {
                if arg % 16 == 0 {
                    array.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(array.len(), model.len());
        assert!(array.len() <= array.capacity());
        idx += 2;
    }

    assert!(array.iter().eq(model.iter()));
});
