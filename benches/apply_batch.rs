use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use deckr_client::core::SessionConfig;
use deckr_client::objects::EntityDescriptor;
use deckr_client::presentation::HeadlessView;
use deckr_client::session::Session;
use deckr_client::transitions::Transition;

const CARDS: u64 = 52;
const ZONES: u64 = 8;

fn table() -> Vec<EntityDescriptor> {
    let mut descriptors: Vec<EntityDescriptor> = (1..=4).map(|id| EntityDescriptor::new(id, "Player")).collect();
    descriptors.extend((0..CARDS).map(|i| {
        EntityDescriptor::new(100 + i, "Card")
            .with_attr("face_up", false)
            .with_attr("front_face", format!("{i}.png"))
            .with_attr("back_face", "back.png")
    }));
    descriptors.extend((0..ZONES).map(|z| {
        EntityDescriptor::new(10 + z, "Zone")
            .with_attr("name", "pile")
            .with_members((0..CARDS).filter(|i| i % ZONES == z).map(|i| 100 + i))
    }));
    descriptors
}

fn shuffle_batch(len: u64) -> Vec<Transition> {
    (0..len)
        .map(|i| {
            let card = 100 + (i * 7) % CARDS;
            if i % 2 == 0 {
                Transition::add(card, 10 + i % ZONES)
            } else {
                Transition::set("Card", card, "face_up", i % 4 == 1)
            }
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let descriptors = table();

    c.bench_function("load_snapshot", |b| {
        b.iter(|| {
            let mut session = Session::new(SessionConfig::default(), HeadlessView::new());
            session.load_snapshot(black_box(&descriptors)).ok()
        });
    });

    for len in [16, 256] {
        let batch = shuffle_batch(len);
        c.bench_function(&format!("apply_transitions_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut session = Session::new(SessionConfig::default(), HeadlessView::new());
                    let _ = session.load_snapshot(&descriptors);
                    session
                },
                |mut session| session.apply_transitions(black_box(&batch)),
                BatchSize::SmallInput,
            );
        });
    }

    c.bench_function("parse_batch_256", |b| {
        let records: Vec<serde_json::Value> = shuffle_batch(256).iter().map(Transition::to_json).collect();
        b.iter(|| Transition::parse_batch(black_box(&records)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
