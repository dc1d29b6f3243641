use fnv::FnvHasher;
use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// A hash map sized for `capacity` entries using the FNV hasher, which beats the default
/// SipHash on small keys such as grid coordinates. It is not collision attack resistant.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Encode a number in base 36 (0-9 then lowercase a-z).
pub fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut encoded = vec![];
    loop {
        encoded.push(DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    encoded.reverse();
    String::from_utf8_lossy(&encoded).into_owned()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn base36_encoding() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(9), "9");
        assert_eq!(base36(10), "a");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1295), "zz");
    }

    #[test]
    fn fnv_map_capacity() {
        let map: FnvHashMap<u32, u32> = fnv_hashmap(16);
        assert!(map.capacity() >= 16);
    }
}
