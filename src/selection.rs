//! Order-statistic selection shared by the windowed filters.

/// Lomuto partition of `values[low..=high]` around `values[high]`.
///
/// Returns the final index of the pivot; everything left of it is `<=` the
/// pivot, everything right of it is `>`.
fn partition<T: PartialOrd + Copy>(values: &mut [T], low: usize, high: usize) -> usize {
    let pivot = values[high];
    let mut store = low;
    for j in low..high {
        if values[j] <= pivot {
            values.swap(store, j);
            store += 1;
        }
    }
    values.swap(store, high);
    store
}

/// Return the `k`-th smallest element (0-based) of `values`, reordering the
/// slice in the process.
///
/// Runs in a loop rather than recursing, so sorted or reverse-sorted input
/// costs time but never stack depth.
///
/// # Panics
///
/// Panics if `k >= values.len()`.
pub fn select_nth<T: PartialOrd + Copy>(values: &mut [T], k: usize) -> T {
    assert!(k < values.len(), "order statistic {k} out of range");
    let (mut low, mut high) = (0, values.len() - 1);
    while low < high {
        let pivot = partition(values, low, high);
        if pivot == k {
            return values[pivot];
        } else if pivot > k {
            high = pivot - 1;
        } else {
            low = pivot + 1;
        }
    }
    values[low]
}

/// Upper median (`len / 2`-th order statistic) of a non-empty neighbourhood.
pub fn median<T: PartialOrd + Copy>(values: &mut [T]) -> T {
    let k = values.len() / 2;
    select_nth(values, k)
}

/// Lower median of a 256-bin histogram: the first bin where the running
/// count reaches half the total.
///
/// A single-sample histogram (half rounds down to zero) still needs one hit.
pub fn histogram_median(histogram: &[u32; 256], total: u32) -> u8 {
    let half = (total / 2).max(1);
    let mut cumulative = 0;
    for (value, &count) in histogram.iter().enumerate() {
        cumulative += count;
        if cumulative >= half {
            return value as u8;
        }
    }
    0
}
