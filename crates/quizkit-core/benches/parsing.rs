use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkit_core::controller::parse_answer;
use quizkit_core::parser::{parse_bank_str, sample_bank, validate_bank, SAMPLE_BANK_TOML};

fn bench_parse_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bank");

    group.bench_function("sample", |b| {
        b.iter(|| parse_bank_str(black_box(SAMPLE_BANK_TOML), Path::new("sample.toml")))
    });

    let large = {
        let mut s = String::from("[bank]\nid = \"large\"\nname = \"Large\"\n");
        for i in 0..200 {
            s.push_str(&format!(
                "\n[[questions]]\nid = {i}\ntype = \"multiple\"\nprompt = \"Question {i}\"\noptions = [\"a\", \"b\", \"c\", \"d\"]\nanswer = [0, {}]\nexplanation = \"Because.\"\n",
                1 + i % 3
            ));
        }
        s
    };

    group.bench_function("200_questions", |b| {
        b.iter(|| parse_bank_str(black_box(&large), Path::new("large.toml")))
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let bank = sample_bank().expect("sample bank parses");
    c.bench_function("validate_sample", |b| b.iter(|| validate_bank(black_box(&bank))));
}

fn bench_parse_answer(c: &mut Criterion) {
    let bank = sample_bank().expect("sample bank parses");
    let multiple = bank.find_by_id("5").unwrap();
    c.bench_function("parse_answer_multiple", |b| {
        b.iter(|| parse_answer(black_box(multiple), black_box("1, 2 3,5")))
    });
}

criterion_group!(benches, bench_parse_bank, bench_validate, bench_parse_answer);
criterion_main!(benches);
