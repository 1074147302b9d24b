use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde::Deserialize;
use shape_qs::{Config, ListDecoding, MapDecoding};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
struct SimpleStruct {
    id: u32,
    name: String,
    active: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct Address {
    city: String,
    street: String,
    postcode: String,
}

#[derive(Debug, Clone, Deserialize)]
struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    address: Address,
    user_ids: Vec<u8>,
}

fn flat_pairs(n: usize) -> Vec<(String, Option<String>)> {
    (0..n)
        .map(|i| (format!("key{i}"), Some(format!("value%20{i}"))))
        .collect()
}

fn name_value_pairs(n: usize) -> Vec<(String, Option<String>)> {
    (1..=n)
        .flat_map(|i| {
            [
                (format!("map.{i}.Name"), Some(format!("id{i}"))),
                (format!("map.{i}.Value"), Some(format!("value{i}"))),
            ]
        })
        .collect()
}

fn borrowed(
    pairs: &[(String, Option<String>)],
) -> impl Iterator<Item = (&String, Option<&String>)> {
    pairs.iter().map(|(k, v)| (k, v.as_ref()))
}

// Shape building benchmarks
fn parse_flat(c: &mut Criterion) {
    let pairs = flat_pairs(100);
    let config = Config::new();

    c.bench_function("parse_flat", |b| {
        b.iter(|| shape_qs::parse(borrowed(black_box(&pairs)), &config).unwrap())
    });
}

fn parse_nested(c: &mut Criterion) {
    let pairs: Vec<(String, Option<String>)> = (0..100)
        .map(|i| (format!("a{}.b{}.c{i}", i % 5, i % 3), Some(i.to_string())))
        .collect();
    let config = Config::new();

    c.bench_function("parse_nested", |b| {
        b.iter(|| shape_qs::parse(borrowed(black_box(&pairs)), &config).unwrap())
    });
}

fn parse_name_value_pairs(c: &mut Criterion) {
    let pairs = name_value_pairs(50);
    let config = Config::new().map_decoding(MapDecoding::name_value_pairs());

    c.bench_function("parse_name_value_pairs", |b| {
        b.iter(|| shape_qs::parse(borrowed(black_box(&pairs)), &config).unwrap())
    });
}

fn parse_indexed_list(c: &mut Criterion) {
    let pairs: Vec<(String, Option<String>)> = (1..=100)
        .map(|i| (format!("items.member.{i}"), Some(i.to_string())))
        .collect();
    let config = Config::new().list_decoding(ListDecoding::Indexed);

    c.bench_function("parse_indexed_list", |b| {
        b.iter(|| shape_qs::parse(borrowed(black_box(&pairs)), &config).unwrap())
    });
}

// Deserialization benchmarks
fn deserialize_simple_struct(c: &mut Criterion) {
    let query = "id=42&name=test_user&active=true";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| shape_qs::from_str::<SimpleStruct>(black_box(query)).unwrap())
    });
}

fn deserialize_nested_struct(c: &mut Criterion) {
    let query = "id=42&name=Acme&phone=12345&address.city=Carrot%20City&\
                 address.street=Special-Street*%20No.%2011&address.postcode=12345&\
                 user_ids.0=1&user_ids.1=2&user_ids.2=3&user_ids.3=4";

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| shape_qs::from_str::<QueryParams>(black_box(query)).unwrap())
    });
}

fn deserialize_name_value_map(c: &mut Criterion) {
    let pairs = name_value_pairs(50);
    let config = Config::new().map_decoding(MapDecoding::name_value_pairs());

    c.bench_function("deserialize_name_value_map", |b| {
        b.iter(|| {
            config
                .deserialize_pairs::<HashMap<String, HashMap<String, String>>, _, _, _>(
                    borrowed(black_box(&pairs)),
                )
                .unwrap()
        })
    });
}

criterion_group!(
    parse,
    parse_flat,
    parse_nested,
    parse_name_value_pairs,
    parse_indexed_list
);

criterion_group!(
    deserialize,
    deserialize_simple_struct,
    deserialize_nested_struct,
    deserialize_name_value_map
);

criterion_main!(parse, deserialize);
