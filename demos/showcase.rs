//! Walkthrough of the heap's surface: insertion under the natural and a
//! reversed order, forest rendering, O(1) merge, and a sorted drain.
//!
//! Run with `cargo run --example showcase`.

use compare::Compare;
use fibonacci_heap::{FibonacciHeap, Heap};
use std::cmp::Ordering;

#[derive(Clone, Copy, Default)]
struct ReverseOrder;

impl Compare<String> for ReverseOrder {
    fn compare(&self, l: &String, r: &String) -> Ordering {
        r.cmp(l)
    }
}

fn main() {
    let mut shortlist = FibonacciHeap::new();
    for word in ["pear", "apple", "quince", "fig"] {
        shortlist.push(word.to_string());
    }

    println!("shortlist under the natural order:");
    print!("{shortlist}");

    let mut extras = FibonacciHeap::new();
    for word in ["banana", "cherry"] {
        extras.push(word.to_string());
    }

    shortlist.merge(&mut extras);
    println!("\nafter merging two more entries (donor now has {}):", extras.len());
    print!("{shortlist}");

    let first = shortlist.minimum().expect("six entries are queued");
    println!(
        "\nminimum entry reads {:?}",
        shortlist.element(&first).unwrap()
    );

    // A pop consolidates the root list into ranked trees.
    shortlist.pop();
    println!("\nafter one extraction:");
    print!("{shortlist}");

    print!("\ndraining the rest:");
    while let Some(word) = shortlist.pop() {
        print!(" {word}");
    }
    println!();

    // The same elements under a caller-provided order come out reversed.
    let mut reversed = FibonacciHeap::with_comparator(ReverseOrder);
    for word in ["apple", "banana", "cherry"] {
        reversed.push(word.to_string());
    }

    println!("\nreversed order drains:");
    while let Some(word) = reversed.pop() {
        println!("  {word}");
    }
}
