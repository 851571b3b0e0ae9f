//! Example: a small lookup table with a default, queried from the command line.
//!
//! Prints the table's values in slot order, then resolves every argument,
//! falling back to the default for unknown keys and counting hits per slot.
//! Also shows that values which cannot be cloned are moved into the table.
//!
//! Run with: cargo run --example lookup -- AA AB AC

use libctrie::array_map;
use libctrie::ctrie::{ArrayMap, BuildError};

fn main() -> Result<(), BuildError<char>> {
    let m: ArrayMap<u32> = array_map! {
        "AA" => 0xAA,
        "BA" => 0xBA,
        "A" => 0xA,
        "AB" => 0xAB,
        default => 0xBEEF,
    }?;

    let values: Vec<String> = m.iter().map(|v| format!("{v}")).collect();
    println!("m = [{}]", values.join(", "));

    for (key, value) in m.entries() {
        let key: String = key.into_iter().collect();
        println!("  slot {} : {key} -> 0x{value:X}", m.index_of(key.as_str()));
    }

    // same keys, one counter per slot; unknown arguments count against the default
    let mut hits: ArrayMap<u32> = ArrayMap::from_index(m.trie().clone());

    for txt in std::env::args().skip(1) {
        if let Some(count) = hits.get_or_default_mut(&txt) {
            *count += 1;
        }
        match m.find(&txt) {
            Some(value) => println!("m.find('{txt}') -> 0x{value:X}"),
            None => {
                println!("m.find('{txt}') == None");
                println!("m[{txt}] -> 0x{:X}", m[txt.as_str()]);
            }
        }
    }

    for (key, count) in hits.entries() {
        let key: String = key.into_iter().collect();
        println!("hits[{key}] = {count}");
    }
    if let Some(misses) = hits.get_default() {
        println!("misses = {misses}");
    }

    let owned: ArrayMap<Box<u32>> = array_map! {
        "*1" => Box::new(1),
        "*2" => Box::new(2),
    }?;
    println!("owned = [*1 -> {}, *2 -> {}]", owned["*1"], owned["*2"]);

    Ok(())
}
