/// Binary min-heap stored in a flat array.
///
/// The parent of index `i` lives at `(i - 1) / 2`, its children at `2i + 1`
/// and `2i + 2`. Every element is less than or equal to its children after
/// each operation. Equal elements come out in no particular order, callers
/// that need a stable order must make their ordering total.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> MinHeap<T> {
        MinHeap::with_capacity(0)
    }
    pub fn with_capacity(capacity: usize) -> MinHeap<T> {
        MinHeap {
            elements: Vec::with_capacity(capacity),
        }
    }
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let last = self.elements.len() - 1;
        self.sift_up(last);
    }
    pub fn extract_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let min = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i);
            if self.elements[i] >= self.elements[p] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }
    fn sift_down(&mut self, mut i: usize) {
        let len = self.elements.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < len && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < len && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.elements.len()).all(|i| self.elements[parent(i)] <= self.elements[i])
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> MinHeap<T> {
        MinHeap::new()
    }
}

#[cfg(test)]
mod test {
    use super::MinHeap;

    #[test]
    fn empty() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert_eq!(heap.extract_min(), None);
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn extracts_in_order() {
        let mut heap = MinHeap::with_capacity(5);
        for &v in &[5, 3, 8, 1, 3] {
            heap.insert(v);
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Some(&1));
        let mut out = vec![];
        while let Some(v) = heap.extract_min() {
            out.push(v);
        }
        assert_eq!(out, [1, 3, 3, 5, 8]);
    }

    #[test]
    fn stable_with_sequence_key() {
        let mut heap = MinHeap::new();
        for (seq, &weight) in [2u64, 1, 2, 1].iter().enumerate() {
            heap.insert((weight, seq));
        }
        let order: Vec<_> = (0..4).filter_map(|_| heap.extract_min()).map(|(_, s)| s).collect();
        assert_eq!(order, [1, 3, 0, 2]);
    }

    quickcheck! {
        fn heap_sort(values: Vec<i32>) -> bool {
            let mut heap = MinHeap::new();
            for &v in &values {
                heap.insert(v);
                if !heap.is_valid() {
                    return false;
                }
            }
            let mut sorted = values.clone();
            sorted.sort();
            let mut extracted = vec![];
            while let Some(v) = heap.extract_min() {
                if !heap.is_valid() {
                    return false;
                }
                extracted.push(v);
            }
            extracted == sorted
        }
    }
}
