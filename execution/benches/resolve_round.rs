use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use econlab_execution::games::RdInvestment;
use econlab_execution::{Seed, Session};
use econlab_types::games::rd::{Investment, RdConfig};
use econlab_types::ParticipantId;

fn setup_session(groups: usize) -> Session<RdInvestment> {
    let config = RdConfig::winner_takes_all(true);
    let participants = groups * config.players_per_group;
    let mut session = Session::new(config, participants, Seed::from_u64(0)).expect("session");
    for participant in 0..participants as u32 {
        session
            .submit(ParticipantId(participant), Investment((participant % 6) as u8))
            .expect("submission");
    }
    session
}

fn resolve_ready(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_ready");
    for groups in [1usize, 16, 256] {
        let base = setup_session(groups);
        group.bench_function(BenchmarkId::new("rd_investment", groups), |b| {
            b.iter_batched(
                || base.clone(),
                |mut session| black_box(session.resolve_ready().expect("resolve")),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, resolve_ready);
criterion_main!(benches);
