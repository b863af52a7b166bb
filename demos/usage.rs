use bytemap_rs::ByteMap;
use bytemuck::{Pod, Zeroable};
use std::cell::Cell;
use std::rc::Rc;

fn string_keys() {
    println!("=== String keys ===");
    let mut map = ByteMap::new();

    map.insert(b"apple", "red").unwrap();
    map.insert(b"banana", "yellow").unwrap();
    map.insert(b"grape", "purple").unwrap();
    map.insert(b"orange", "orange").unwrap();
    println!("size: {}", map.len());

    println!("apple -> {}", map.get(b"apple").unwrap());
    println!("banana -> {}", map.get(b"banana").unwrap());
    println!("contains 'apple': {}", map.contains_key(b"apple"));
    println!("contains 'mango': {}", map.contains_key(b"mango"));

    map.insert(b"apple", "green").unwrap();
    println!("apple -> {} (after update)", map.get(b"apple").unwrap());

    map.remove(b"banana");
    println!("size after removing 'banana': {}", map.len());
    println!();
}

fn integer_keys() {
    println!("=== Integer keys ===");
    let mut map = ByteMap::new();

    // Any fixed-size type works through its byte representation.
    for (key, val) in [(10u32, 100u32), (20, 200), (30, 300)] {
        map.insert(&key.to_ne_bytes(), val).unwrap();
    }
    println!("size: {}", map.len());

    for key in [20u32, 10] {
        if let Some(val) = map.get(&key.to_ne_bytes()) {
            println!("key {key} -> value {val}");
        }
    }
    println!();
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Point {
    x: i32,
    y: i32,
}

fn struct_keys() {
    println!("=== Struct keys ===");
    let mut map = ByteMap::new();

    let p1 = Point { x: 1, y: 2 };
    let p2 = Point { x: 3, y: 4 };
    map.insert(bytemuck::bytes_of(&p1), "origin").unwrap();
    map.insert(bytemuck::bytes_of(&p2), "target").unwrap();

    let lookup = Point { x: 1, y: 2 };
    if let Some(label) = map.get(bytemuck::bytes_of(&lookup)) {
        println!("point (1,2) -> {label}");
    }
    println!();
}

fn release_hook() {
    println!("=== Release hook ===");
    let released = Rc::new(Cell::new(0u32));
    let counter = released.clone();
    let mut map = ByteMap::new().on_release(move |val: String| {
        counter.set(counter.get() + 1);
        println!("released: {val}");
    });

    map.insert(b"name", String::from("John")).unwrap();
    map.insert(b"city", String::from("New York")).unwrap();
    map.insert(b"name", String::from("Jane")).unwrap();

    drop(map);
    println!("values released: {}", released.get());
}

fn main() {
    string_keys();
    integer_keys();
    struct_keys();
    release_hook();
}
