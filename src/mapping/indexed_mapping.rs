use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;

/// Number of child slots, one more than the 48 usable ones: slot 0 is never
/// occupied so that 0 can mean "absent" in `slot_index`.
const SLOT_COUNT: usize = 49;

/// Maps a key byte to a node through a 256-entry slot directory. Used for
/// the 48-wide node layout.
///
/// `slot_index[b]` holds the position of the child for byte `b` inside
/// `children`, or 0 when there is none. Slots are handed out first-free and
/// never compacted, so ordered iteration walks the directory, not the slots.
pub struct IndexedMapping<N> {
    pub(crate) slot_index: Box<[u8; 256]>,
    pub(crate) children: Box<[Option<N>; SLOT_COUNT]>,
    pub(crate) num_children: u8,
}

impl<N> Default for IndexedMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> IndexedMapping<N> {
    pub fn new() -> Self {
        Self {
            slot_index: Box::new([0; 256]),
            children: Box::new([const { None }; SLOT_COUNT]),
            num_children: 0,
        }
    }

    /// Drain a sorted mapping into fresh slots. Entries arrive in key order,
    /// so slots are handed out sequentially from 1.
    pub(crate) fn from_sorted_keyed<const KM_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, KM_WIDTH>,
    ) -> Self {
        let mut im = IndexedMapping::new();
        for i in 0..km.num_children as usize {
            let child = km.children[i].take().unwrap();
            im.add_child(km.keys[i], child);
        }
        km.num_children = 0;
        im
    }

    /// Drain a direct mapping in ascending byte order.
    pub(crate) fn from_direct(dm: &mut DirectMapping<N>) -> Self {
        let mut im = IndexedMapping::new();
        for byte in 0..=255u8 {
            let Some(child) = dm.delete_child(byte) else {
                continue;
            };
            im.add_child(byte, child);
        }
        im
    }

    /// Iterate children in ascending key-byte order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..=255u8).filter_map(move |byte| {
            let slot = self.slot_index[byte as usize];
            if slot == 0 {
                return None;
            }
            self.children[slot as usize].as_ref().map(|c| (byte, c))
        })
    }

    pub(crate) fn first_child(&self) -> Option<&N> {
        self.iter().next().map(|(_, c)| c)
    }

    pub(crate) fn last_child(&self) -> Option<&N> {
        (0..=255u8).rev().find_map(|byte| {
            let slot = self.slot_index[byte as usize];
            if slot == 0 {
                return None;
            }
            self.children[slot as usize].as_ref()
        })
    }
}

impl<N> NodeMapping<N, 48> for IndexedMapping<N> {
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert_eq!(self.slot_index[key as usize], 0);
        // First free slot; slot 0 stays reserved as the absence marker.
        let slot = (1..SLOT_COUNT)
            .find(|&i| self.children[i].is_none())
            .expect("add_child on a full indexed mapping");
        self.children[slot] = Some(node);
        self.slot_index[key as usize] = slot as u8;
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        match self.slot_index[key as usize] {
            0 => None,
            slot => self.children[slot as usize].as_ref(),
        }
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        match self.slot_index[key as usize] {
            0 => None,
            slot => self.children[slot as usize].as_mut(),
        }
    }

    fn child_slot_mut(&mut self, key: u8) -> Option<&mut Option<N>> {
        match self.slot_index[key as usize] {
            0 => None,
            slot => Some(&mut self.children[slot as usize]),
        }
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let slot = self.slot_index[key as usize];
        if slot == 0 {
            return None;
        }
        let node = self.children[slot as usize].take();
        self.slot_index[key as usize] = 0;
        if node.is_some() {
            self.num_children -= 1;
        }
        node
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}
