use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_vocab::{AvlTree, Vocabulary};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    let tree: AvlTree<i32> = values.iter().copied().collect();

    c.bench_function("tree_find", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.find(value));
            }
        })
    });

    c.bench_function("tree_inorder", |b| {
        b.iter(|| {
            for value in tree.inorder() {
                black_box(value);
            }
        })
    });

    let words: String = (0..1_000).map(|i| format!("word{i}\n")).collect();
    let vocabulary = Vocabulary::load(words.as_bytes()).unwrap();

    c.bench_function("vocabulary_classify", |b| {
        b.iter(|| {
            for i in 0..2_000 {
                black_box(vocabulary.classify(&format!("word{i}")));
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
