use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cairn_core::catalog::meta_table_descriptor;
use cairn_core::{ColumnFamilyDescriptor, ServerAddress, TableDescriptor};

fn wide_descriptor() -> TableDescriptor {
    let mut desc = TableDescriptor::new("bench_table").unwrap();
    for i in 0..16 {
        desc.add_family(ColumnFamilyDescriptor::new(format!("cf{i:02}")).with_max_versions(i + 1))
            .unwrap();
    }
    for i in 0..32 {
        desc.set_value_str(&format!("attr_{i:02}"), Some(format!("value_{i}").as_str()));
    }
    desc.set_servers(Some((0..5).map(|i| ServerAddress::new(format!("rs{i}"), 60020))))
        .unwrap();
    desc
}

fn bench_encode(c: &mut Criterion) {
    let desc = wide_descriptor();
    c.bench_function("encode_wide", |b| {
        b.iter(|| black_box(desc.encode()));
    });
}

fn bench_decode(c: &mut Criterion) {
    let encoded = wide_descriptor().encode();
    c.bench_function("decode_wide", |b| {
        b.iter(|| TableDescriptor::decode(black_box(&encoded)).unwrap());
    });

    let meta = meta_table_descriptor().encode();
    c.bench_function("decode_meta", |b| {
        b.iter(|| TableDescriptor::decode(black_box(&meta)).unwrap());
    });
}

fn bench_derived_flags(c: &mut Criterion) {
    let desc = wide_descriptor();
    c.bench_function("is_meta_region_cached", |b| {
        b.iter(|| black_box(desc.is_meta_region()));
    });
    c.bench_function("servers_cached", |b| {
        b.iter(|| black_box(desc.servers()));
    });
}

fn bench_compare(c: &mut Criterion) {
    let a = wide_descriptor();
    let b_desc = a.clone();
    c.bench_function("compare_equal", |b| {
        b.iter(|| black_box(a.compare_to(&b_desc)));
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_derived_flags,
    bench_compare
);
criterion_main!(benches);
