/// A binary min-heap over densely numbered items (e.g. row-major cell indices) that keeps an
/// item to heap position index, so a queued item's key can be lowered in O(log n) without a
/// search through the heap.
///
/// Items with equal keys come out smallest item number first.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K> {
    heap: Vec<(K, usize)>,
    positions: Vec<Option<usize>>,
}

impl<K: Ord + Copy> IndexedMinHeap<K> {
    /// An empty heap with room for the items `0..items` without reallocating.
    pub fn with_capacity(items: usize) -> IndexedMinHeap<K> {
        IndexedMinHeap {
            heap: Vec::with_capacity(items),
            positions: vec![None; items],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, item: usize) -> bool {
        self.position(item).is_some()
    }

    pub fn key_of(&self, item: usize) -> Option<K> {
        self.position(item).map(|pos| self.heap[pos].0)
    }

    /// Queue `item` with `key`. Returns false, leaving the heap untouched, if the item is
    /// already queued.
    pub fn push(&mut self, item: usize, key: K) -> bool {
        if self.contains(item) {
            return false;
        }
        if item >= self.positions.len() {
            self.positions.resize(item + 1, None);
        }

        let pos = self.heap.len();
        self.heap.push((key, item));
        self.positions[item] = Some(pos);
        self.sift_up(pos);
        true
    }

    /// Remove and return the item with the smallest key.
    pub fn pop(&mut self) -> Option<(usize, K)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (key, item) = self.heap.pop()?;
        self.positions[item] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((item, key))
    }

    /// Lower the key of a queued item, restoring the heap order in place.
    ///
    /// Returns false if the item is not queued or `key` is larger than its current key.
    pub fn decrease_key(&mut self, item: usize, key: K) -> bool {
        match self.position(item) {
            Some(pos) if key <= self.heap[pos].0 => {
                self.heap[pos].0 = key;
                self.sift_up(pos);
                true
            }
            _ => false,
        }
    }

    #[inline]
    fn position(&self, item: usize) -> Option<usize> {
        self.positions.get(item).cloned().unwrap_or(None)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a] < self.heap[b]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].1] = Some(a);
        self.positions[self.heap[b].1] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;

    fn drain(heap: &mut IndexedMinHeap<u32>) -> Vec<(usize, u32)> {
        let mut popped = vec![];
        while let Some(entry) = heap.pop() {
            popped.push(entry);
        }
        popped
    }

    #[test]
    fn pops_smallest_key_first() {
        let mut heap = IndexedMinHeap::with_capacity(4);
        assert!(heap.push(0, 30));
        assert!(heap.push(1, 10));
        assert!(heap.push(2, 40));
        assert!(heap.push(3, 20));
        assert_eq!(heap.len(), 4);
        assert_eq!(drain(&mut heap), vec![(1, 10), (3, 20), (0, 30), (2, 40)]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn equal_keys_pop_in_item_order() {
        let mut heap = IndexedMinHeap::with_capacity(5);
        for &item in &[4, 2, 0, 3, 1] {
            let _ = heap.push(item, u32::max_value());
        }
        let items = drain(&mut heap).into_iter().map(|(item, _)| item).collect::<Vec<_>>();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn duplicate_push_rejected() {
        let mut heap = IndexedMinHeap::with_capacity(2);
        assert!(heap.push(1, 5));
        assert!(!heap.push(1, 1));
        assert_eq!(heap.key_of(1), Some(5));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn push_beyond_initial_capacity() {
        let mut heap = IndexedMinHeap::with_capacity(1);
        assert!(heap.push(7, 3));
        assert!(heap.push(0, 9));
        assert_eq!(drain(&mut heap), vec![(7, 3), (0, 9)]);
    }

    #[test]
    fn decrease_key_reorders_in_place() {
        let mut heap = IndexedMinHeap::with_capacity(4);
        for item in 0..4 {
            let _ = heap.push(item, 100 + item as u32);
        }
        assert!(heap.decrease_key(3, 1));
        assert_eq!(heap.key_of(3), Some(1));
        assert!(heap.decrease_key(2, 50));
        assert_eq!(drain(&mut heap), vec![(3, 1), (2, 50), (0, 100), (1, 101)]);
    }

    #[test]
    fn decrease_key_rejects_increase_and_unknown_items() {
        let mut heap = IndexedMinHeap::with_capacity(3);
        let _ = heap.push(0, 10);
        assert!(!heap.decrease_key(0, 11));
        assert_eq!(heap.key_of(0), Some(10));
        assert!(!heap.decrease_key(1, 0));
        assert!(!heap.decrease_key(99, 0));

        let _ = heap.pop();
        assert!(!heap.contains(0));
        assert!(!heap.decrease_key(0, 0));
        assert_eq!(heap.key_of(0), None);
    }

    #[test]
    fn quickcheck_pops_sorted_after_decreases() {

        fn prop(keys: Vec<u32>, decreases: Vec<(usize, u32)>) -> bool {
            let mut heap = IndexedMinHeap::with_capacity(keys.len());
            let mut expected = keys.clone();
            for (item, key) in keys.iter().enumerate() {
                let _ = heap.push(item, *key);
            }
            if !keys.is_empty() {
                for (item, key) in decreases {
                    let item = item % keys.len();
                    if heap.decrease_key(item, key) {
                        expected[item] = key;
                    }
                }
            }

            let mut expected = expected.into_iter().enumerate().map(|(item, key)| (key, item))
                .collect::<Vec<_>>();
            expected.sort();

            let mut popped = vec![];
            while let Some((item, key)) = heap.pop() {
                popped.push((key, item));
            }
            popped == expected
        }
        quickcheck(prop as fn(Vec<u32>, Vec<(usize, u32)>) -> bool)
    }
}
