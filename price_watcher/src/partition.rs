//! Contiguous symbol partitioning.
//!
//! `L` items over `W` workers: every shard gets `L / W` items and the first `L % W`
//! shards get one more. Shards are cut in list order, so concatenating them gives the
//! input back. Empty shards (only possible when `L < W`) are dropped.

/// Split `items` into at most `workers` contiguous, non-empty shards.
///
/// `workers == 0` yields no shards; callers validate the worker count first.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if workers == 0 {
        return Vec::new();
    }

    let base = items.len() / workers;
    let extra = items.len() % workers;
    let mut shards = Vec::with_capacity(workers.min(items.len()));
    let mut start = 0;

    for index in 0..workers {
        let size = base + usize::from(index < extra);
        if size == 0 {
            continue;
        }
        shards.push(&items[start..start + size]);
        start += size;
    }
    shards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_symbols_two_workers() {
        let symbols = ["A", "B", "C", "D", "E"];
        let shards = partition(&symbols, 2);
        assert_eq!(shards, vec![&["A", "B", "C"][..], &["D", "E"][..]]);
    }

    #[test]
    fn test_shards_reconstruct_input() {
        for len in 0..40usize {
            let items: Vec<usize> = (0..len).collect();
            for workers in 1..12usize {
                let shards = partition(&items, workers);

                let sizes: Vec<usize> = shards.iter().map(|s| s.len()).collect();
                assert_eq!(sizes.iter().sum::<usize>(), len);
                assert!(shards.len() <= workers);
                for size in &sizes {
                    assert!(*size == len / workers || *size == len / workers + 1);
                    assert!(*size > 0);
                }
                // Larger shards come first.
                assert!(sizes.windows(2).all(|w| w[0] >= w[1]));

                let joined: Vec<usize> = shards.concat();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn test_fewer_symbols_than_workers_drops_empty_shards() {
        let symbols = ["A", "B", "C"];
        let shards = partition(&symbols, 8);
        assert_eq!(shards.len(), 3);
        assert!(shards.iter().all(|s| s.len() == 1));
    }

    #[test]
    fn test_duplicates_are_independent_entries() {
        let symbols = ["A", "A", "B", "A"];
        let shards = partition(&symbols, 2);
        assert_eq!(shards, vec![&["A", "A"][..], &["B", "A"][..]]);
    }

    #[test]
    fn test_zero_workers_or_empty_list() {
        assert!(partition(&["A"], 0).is_empty());
        assert!(partition::<&str>(&[], 4).is_empty());
    }
}
