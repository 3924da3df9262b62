use criterion::{Criterion, black_box, criterion_group, criterion_main};
use soup_core::model::card::parse_cards;
use soup_core::play::classify;

fn classify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (label, text) in [
        ("single", "KH"),
        ("pairs_run", "4H 4C 5D 5D 6S 6H"),
        ("full_houses", "KH KS KD QH QS QD JH JS 10H 10S"),
        ("straight", "3H 4C 5D 6S 7H 8C 9D 10S JH QC KD AS"),
        ("junk", "3H 9S LJ 2C 2D QH"),
    ] {
        let cards = parse_cards(text).expect("bench cards parse");
        group.bench_function(label, |b| b.iter(|| classify(black_box(&cards))));
    }
    group.finish();
}

criterion_group!(benches, classify_bench);
criterion_main!(benches);
