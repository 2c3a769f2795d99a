use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::u8_keys::{
    u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
};

/// Maps a key byte to a node using parallel `keys`/`children` arrays kept
/// sorted ascending by key. Used for the 4- and 16-wide node layouts.
///
/// The first `num_children` positions of both arrays are populated;
/// `keys[i]` always corresponds to `children[i]`. Insertion and removal
/// shift the tail to preserve the sort, so iteration in array order is
/// iteration in key order.
pub struct SortedKeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[Option<N>; WIDTH]>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for SortedKeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> SortedKeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: Box::new([const { None }; WIDTH]),
            num_children: 0,
        }
    }

    /// Copy all entries out of a narrower mapping, preserving order.
    pub fn from_resized_grow<const OLD_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, OLD_WIDTH>,
    ) -> Self {
        debug_assert!(WIDTH > OLD_WIDTH);
        let mut new = Self::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = km.children[i].take();
        }
        new.num_children = km.num_children;
        km.num_children = 0;
        new
    }

    /// Copy all entries out of a wider mapping. The source must already have
    /// shrunk to at most `WIDTH` entries.
    pub fn from_resized_shrink<const OLD_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, OLD_WIDTH>,
    ) -> Self {
        debug_assert!(WIDTH < OLD_WIDTH);
        assert!(km.num_children as usize <= WIDTH);
        let mut new = Self::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = km.children[i].take();
        }
        new.num_children = km.num_children;
        km.num_children = 0;
        new
    }

    /// Drain an indexed mapping in ascending byte order, which yields the
    /// entries already sorted.
    pub(crate) fn from_indexed(im: &mut IndexedMapping<N>) -> Self {
        assert!(im.num_children() <= WIDTH);
        let mut new = Self::new();
        let mut cnt = 0;
        for byte in 0..=255u8 {
            let Some(child) = im.delete_child(byte) else {
                continue;
            };
            new.keys[cnt] = byte;
            new.children[cnt] = Some(child);
            cnt += 1;
        }
        new.num_children = cnt as u8;
        new
    }

    /// Remove and return the only remaining entry.
    pub fn take_single_child(&mut self) -> (u8, N) {
        assert!(self.num_children == 1);
        let key = self.keys[0];
        let child = self.children[0].take().unwrap();
        self.num_children = 0;
        (key, child)
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize)
            .filter_map(move |i| self.children[i].as_ref().map(|c| (self.keys[i], c)))
    }

    pub(crate) fn first_child(&self) -> Option<&N> {
        self.children[0].as_ref()
    }

    pub(crate) fn last_child(&self) -> Option<&N> {
        match self.num_children {
            0 => None,
            n => self.children[n as usize - 1].as_ref(),
        }
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for SortedKeyedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let num_children = self.num_children as usize;
        assert!(num_children < WIDTH);
        let idx = u8_keys_find_insert_position_sorted::<WIDTH>(key, &self.keys, num_children);

        // Shift the tail right to open the slot.
        for i in (idx..num_children).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = self.children[i].take();
        }
        self.keys[idx] = key;
        self.children[idx] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        self.children[idx].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        self.children[idx].as_mut()
    }

    fn child_slot_mut(&mut self, key: u8) -> Option<&mut Option<N>> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        Some(&mut self.children[idx])
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let num_children = self.num_children as usize;
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, num_children)?;
        let node = self.children[idx].take();

        // Shift the tail left and zero the vacated trailing slot.
        for i in idx..num_children - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = self.children[i + 1].take();
        }
        self.keys[num_children - 1] = 0;
        self.children[num_children - 1] = None;
        self.num_children -= 1;

        node
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::NodeMapping;
    use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;

    #[test]
    fn test_add_seek_delete() {
        let mut node = SortedKeyedMapping::<u8, 4>::new();
        node.add_child(1, 1);
        node.add_child(2, 2);
        node.add_child(3, 3);
        node.add_child(4, 4);
        assert_eq!(node.num_children(), 4);
        assert_eq!(node.seek_child(1), Some(&1));
        assert_eq!(node.seek_child(2), Some(&2));
        assert_eq!(node.seek_child(3), Some(&3));
        assert_eq!(node.seek_child(4), Some(&4));
        assert_eq!(node.seek_child(5), None);
        assert_eq!(node.seek_child_mut(2), Some(&mut 2));
        assert_eq!(node.delete_child(1), Some(1));
        assert_eq!(node.delete_child(2), Some(2));
        assert_eq!(node.delete_child(3), Some(3));
        assert_eq!(node.delete_child(4), Some(4));
        assert_eq!(node.delete_child(5), None);
        assert_eq!(node.num_children(), 0);
    }

    #[test]
    fn test_keys_stay_sorted() {
        let mut node = SortedKeyedMapping::<u8, 16>::new();
        for key in [200u8, 3, 250, 17, 128, 1, 99] {
            node.add_child(key, key);
        }
        let keys: Vec<u8> = node.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 3, 17, 99, 128, 200, 250]);

        node.delete_child(99);
        node.delete_child(1);
        let keys: Vec<u8> = node.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![3, 17, 128, 200, 250]);
    }

    #[test]
    fn test_resize_preserves_order() {
        let mut small = SortedKeyedMapping::<u8, 4>::new();
        for key in [9u8, 1, 7, 4] {
            small.add_child(key, key);
        }
        let grown = SortedKeyedMapping::<u8, 16>::from_resized_grow(&mut small);
        assert_eq!(small.num_children(), 0);
        assert_eq!(grown.num_children(), 4);
        let keys: Vec<u8> = grown.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 4, 7, 9]);

        let mut wide = SortedKeyedMapping::<u8, 16>::new();
        for key in [5u8, 3, 8] {
            wide.add_child(key, key);
        }
        let shrunk = SortedKeyedMapping::<u8, 4>::from_resized_shrink(&mut wide);
        assert_eq!(shrunk.num_children(), 3);
        assert_eq!(shrunk.seek_child(3), Some(&3));
        assert_eq!(shrunk.seek_child(8), Some(&8));
    }

    #[test]
    fn test_take_single_child() {
        let mut node = SortedKeyedMapping::<u8, 4>::new();
        node.add_child(42, 7);
        assert_eq!(node.take_single_child(), (42, 7));
        assert_eq!(node.num_children(), 0);
    }
}
