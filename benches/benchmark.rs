use cladetally::analysis::BatchAnalyzer;
use cladetally::config::AnalysisConfig;
use cladetally::newick::{parse_str, repair_newick};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const TREE_SIZES: &[(&str, usize)] = &[("n64", 64), ("n512", 512), ("n4096", 4096)];

/// Balanced Newick tree over taxa `t0..t{n}` without support labels.
fn balanced_newick(n: usize) -> String {
    fn clade(lo: usize, hi: usize, out: &mut String) {
        if hi - lo == 1 {
            out.push_str(&format!("t{lo}:0.1"));
            return;
        }
        let mid = (lo + hi) / 2;
        out.push('(');
        clade(lo, mid, out);
        out.push(',');
        clade(mid, hi, out);
        out.push_str("):0.05");
    }
    let mut out = String::new();
    clade(0, n, &mut out);
    out.push(';');
    out
}

fn taxa(names: impl IntoIterator<Item = usize>) -> Vec<String> {
    names.into_iter().map(|i| format!("t{i}")).collect()
}

fn repair_and_parse(c: &mut Criterion) {
    for (name, n) in TREE_SIZES {
        let newick = balanced_newick(*n);
        c.bench_function(&format!("repair_parse_{name}"), |b| {
            b.iter(|| parse_str(repair_newick(black_box(&newick))).unwrap());
        });
    }
}

fn classify_all_combinations(c: &mut Criterion) {
    for (name, n) in TREE_SIZES {
        let tree = parse_str(repair_newick(&balanced_newick(*n))).unwrap();
        let config = AnalysisConfig {
            species_a: taxa(0..4),
            species_b: taxa((n - 4)..*n),
            species_of_interest: taxa((n / 2 - 4)..(n / 2 + 4)),
            support_threshold: -1.0,
            ..Default::default()
        };
        c.bench_function(&format!("classify_{name}"), |b| {
            b.iter(|| {
                let mut analyzer = BatchAnalyzer::new(&config);
                analyzer.analyze_tree("bench", black_box(&tree))
            });
        });
    }
}

criterion_group!(benches, repair_and_parse, classify_all_combinations);
criterion_main!(benches);
