use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_dotbar::tools::{GridLayout, run_for_char};
use rust_dotbar::{BinaryRun, DecoderConfig, Region, decode_regions};
use rust_dotbar::decoder::symbol::SymbolDecoder;
use rust_dotbar::pipeline;

fn fixture(text: &str) -> Vec<Region> {
    let runs: Vec<BinaryRun> = text.chars().filter_map(run_for_char).collect();
    GridLayout::default().regions(&runs)
}

fn bench_decode_block(c: &mut Criterion) {
    let regions = fixture("FX1WOWK");
    c.bench_function("decode_regions_28_marks", |b| {
        b.iter(|| decode_regions(black_box(&regions)))
    });
}

fn bench_decode_many_blocks(c: &mut Criterion) {
    let regions = fixture("FX1WOWK");
    let blocks: Vec<&[Region]> = vec![regions.as_slice(); 64];
    let sequential = DecoderConfig::default();
    let parallel = DecoderConfig::default().with_parallel(true);

    c.bench_function("decode_64_blocks_sequential", |b| {
        b.iter(|| pipeline::decode_blocks(black_box(&blocks), &sequential))
    });
    c.bench_function("decode_64_blocks_parallel", |b| {
        b.iter(|| pipeline::decode_blocks(black_box(&blocks), &parallel))
    });
}

fn bench_symbol_decode(c: &mut Criterion) {
    let runs: Vec<BinaryRun> = "AZaz09".chars().filter_map(run_for_char).collect();
    c.bench_function("symbol_decode_6_runs", |b| {
        b.iter(|| {
            for run in &runs {
                black_box(SymbolDecoder::decode(black_box(run)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_decode_block,
    bench_decode_many_blocks,
    bench_symbol_decode
);
criterion_main!(benches);
