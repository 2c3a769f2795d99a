//! Search helpers for the sorted `u8` key arrays used by the narrow node
//! mappings. Width 4 is always scanned linearly; width 16 uses an SSE2
//! equality probe where available and falls back to binary search elsewhere.

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16_up_to(key: u8, keys: [u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        // Mask out the slots past the populated range, which may hold stale
        // bytes equal to the probe.
        let mask = (1 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[allow(dead_code)]
fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    let mut left = 0;
    let mut right = num_children;
    while left < right {
        let mid = (left + right) / 2;
        match keys[mid].cmp(&key) {
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

/// Position of `key` within the first `num_children` entries of a sorted key
/// array, or `None` when absent.
#[allow(unreachable_code)]
pub fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> Option<usize> {
    // Width 4 and under, just use linear search.
    if WIDTH <= 4 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
    if WIDTH == 16 {
        return x86_64_sse_find_key_16_up_to(key, keys.try_into().unwrap(), num_children);
    }

    binary_find_key(key, keys, num_children)
}

/// Position at which `key` must be inserted to keep the first `num_children`
/// entries of the key array sorted ascending.
pub fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> usize {
    if WIDTH <= 4 {
        return (0..num_children)
            .find(|&i| key <= keys[i])
            .unwrap_or(num_children);
    }

    // Lower bound by binary search.
    let mut left = 0;
    let mut right = num_children;
    while left < right {
        let mid = (left + right) / 2;
        if keys[mid] < key {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sorted_narrow() {
        let keys = [3u8, 7, 9, 0];
        assert_eq!(u8_keys_find_key_position_sorted::<4>(7, &keys, 3), Some(1));
        assert_eq!(u8_keys_find_key_position_sorted::<4>(9, &keys, 3), Some(2));
        assert_eq!(u8_keys_find_key_position_sorted::<4>(0, &keys, 3), None);
        assert_eq!(u8_keys_find_key_position_sorted::<4>(4, &keys, 3), None);
    }

    #[test]
    fn test_find_sorted_wide() {
        let mut keys = [0u8; 16];
        for (i, k) in (0..32u8).step_by(2).enumerate() {
            keys[i] = k;
        }
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(
                u8_keys_find_key_position_sorted::<16>(*k, &keys, 16),
                Some(i)
            );
        }
        assert_eq!(u8_keys_find_key_position_sorted::<16>(5, &keys, 16), None);
        // Entries past num_children must not match even if the bytes do.
        assert_eq!(u8_keys_find_key_position_sorted::<16>(14, &keys, 7), None);
    }

    #[test]
    fn test_find_sorted_high_bytes() {
        let mut keys = [0u8; 16];
        for (i, k) in keys.iter_mut().enumerate() {
            *k = 240 + i as u8;
        }
        assert_eq!(
            u8_keys_find_key_position_sorted::<16>(255, &keys, 16),
            Some(15)
        );
        assert_eq!(u8_keys_find_key_position_sorted::<16>(239, &keys, 16), None);
    }

    #[test]
    fn test_insert_position() {
        let keys = [2u8, 4, 6, 0];
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(1, &keys, 3), 0);
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(3, &keys, 3), 1);
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(7, &keys, 3), 3);

        let mut wide = [0u8; 16];
        for i in 0..10 {
            wide[i] = (i as u8) * 10;
        }
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(35, &wide, 10), 4);
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(0, &wide, 10), 0);
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(95, &wide, 10), 10);
    }
}
