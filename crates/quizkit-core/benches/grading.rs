use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkit_core::model::{AnswerKey, Question, RawInput};
use quizkit_core::parser::sample_bank;
use quizkit_core::{grade, QuestionBank, QuizSession};

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");
    let bank = sample_bank().expect("sample bank parses");

    let single = bank.find_by_id("1").unwrap();
    let multiple = bank.find_by_id("2").unwrap();
    let fill = bank.find_by_id("3").unwrap();

    let single_input = RawInput::Single(Some(2));
    let multiple_input = RawInput::Multiple(vec![4, 2, 1, 4]);
    let fill_input = RawInput::Fill("   COLOR  ".into());

    group.bench_function("single", |b| {
        b.iter(|| grade(black_box(single), black_box(&single_input)))
    });

    group.bench_function("multiple", |b| {
        b.iter(|| grade(black_box(multiple), black_box(&multiple_input)))
    });

    group.bench_function("fill", |b| {
        b.iter(|| grade(black_box(fill), black_box(&fill_input)))
    });

    let many_accepted = Question {
        id: "many".into(),
        prompt: "Type an answer".into(),
        options: vec![],
        answer_key: AnswerKey::Fill((0..200).map(|i| format!("answer-{i}")).collect()),
        explanation: None,
    };
    let miss = RawInput::Fill("not-listed".into());
    group.bench_function("fill_200_accepted_miss", |b| {
        b.iter(|| grade(black_box(&many_accepted), black_box(&miss)))
    });

    group.finish();
}

fn bench_session_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_score");

    let questions: Vec<Question> = (0..500)
        .map(|i| Question {
            id: i.to_string(),
            prompt: format!("Question {i}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer_key: AnswerKey::Single(i % 4),
            explanation: None,
        })
        .collect();
    let bank = QuestionBank::new("large", "Large", questions).expect("valid bank");

    let mut session = QuizSession::new(bank);
    for i in 0..500 {
        session.go_to(i).unwrap();
        session.grade(&RawInput::Single(Some(i % 3))).unwrap();
    }

    group.bench_function("score_500_answers", |b| b.iter(|| black_box(&session).score()));
    group.bench_function("report_500_answers", |b| {
        b.iter(|| quizkit_core::QuizReport::from_session(black_box(&session)))
    });

    group.finish();
}

criterion_group!(benches, bench_grade, bench_session_score);
criterion_main!(benches);
