//! Default registry of the sorting algorithm units.

use crate::engine::{Catalog, Descriptor, Stability};
use crate::error::Result;
use crate::sorting::algorithms::{
    BubbleSort, CountingSort, HeapSort, InsertionSort, MergeSort, QuickSort, RadixSort,
    SelectionSort, ShellSort,
};
use crate::sorting::{SortOp, SortingState};

pub type SortDescriptor = Descriptor<SortingState, SortOp>;
pub type SortCatalog = Catalog<SortingState, SortOp>;

/// Descriptors for every sorting unit, in presentation order.
pub fn default_descriptors() -> Result<Vec<SortDescriptor>> {
    Ok(vec![
        SortDescriptor::builder(BubbleSort::ID, "Bubble Sort")
            .description("Stable bubble sort with early exit when no swaps occur.")
            .complexity("O(n^2)", "O(n)", "O(n^2)")
            .stability(Stability::Stable)
            .factory(|| Box::new(BubbleSort))
            .build()?,
        SortDescriptor::builder(InsertionSort::ID, "Insertion Sort (Stable)")
            .description("Stable insertion sort that tracks comparisons and insert operations.")
            .complexity("O(n^2)", "O(n)", "O(n^2)")
            .stability(Stability::Stable)
            .factory(|| Box::new(InsertionSort))
            .build()?,
        SortDescriptor::builder(SelectionSort::ID, "Selection Sort")
            .description("Classic selection sort that highlights minimum selection before swapping.")
            .complexity("O(n^2)", "O(n^2)", "O(n^2)")
            .stability(Stability::Unstable)
            .factory(|| Box::new(SelectionSort))
            .build()?,
        SortDescriptor::builder(MergeSort::ID, "Merge Sort (Stable)")
            .description(
                "Stable merge sort that merges sorted partitions while preserving order of equals.",
            )
            .complexity("O(n log n)", "O(n log n)", "O(n log n)")
            .stability(Stability::Stable)
            .factory(|| Box::new(MergeSort))
            .build()?,
        SortDescriptor::builder(HeapSort::ID, "Heap Sort")
            .description("In-place heap sort using a max-heap built from the input sequence.")
            .complexity("O(n log n)", "O(n log n)", "O(n log n)")
            .stability(Stability::Unstable)
            .factory(|| Box::new(HeapSort))
            .build()?,
        SortDescriptor::builder(ShellSort::ID, "Shell Sort")
            .description("Shell sort using halved gap sequence and in-place element shifting.")
            .complexity("O(n^(3/2))", "O(n log n)", "O(n^(3/2))")
            .stability(Stability::Unstable)
            .factory(|| Box::new(ShellSort))
            .build()?,
        SortDescriptor::builder(CountingSort::ID, "Counting Sort")
            .description("Stable counting sort for integer keys using prefix sums.")
            .complexity("O(n + k)", "O(n + k)", "O(n + k)")
            .stability(Stability::Stable)
            .factory(|| Box::new(CountingSort))
            .build()?,
        SortDescriptor::builder(QuickSort::ID, "Quick Sort")
            .description("Quick sort using Lomuto partitioning with pivot highlighting.")
            .complexity("O(n log n)", "O(n log n)", "O(n^2)")
            .stability(Stability::Unstable)
            .factory(|| Box::new(QuickSort))
            .build()?,
        SortDescriptor::builder(RadixSort::ID, "Radix Sort")
            .description("Stable least-significant-digit radix sort for non-negative integers.")
            .complexity("O(d·(n + b))", "O(d·(n + b))", "O(d·(n + b))")
            .stability(Stability::Stable)
            .factory(|| Box::new(RadixSort))
            .build()?,
    ])
}

pub fn default_catalog() -> Result<SortCatalog> {
    Catalog::new(default_descriptors()?)
}
