use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use video_seo_engine::{
    core::{VideoHit, VideoStatistics},
    providers::ScriptedProvider,
    ranking::{assign_ranks, RankingEngine, RetryPolicy, ScoreWeights},
    ScoredKeyword,
};

fn create_provider(keywords: &[String]) -> ScriptedProvider {
    keywords.iter().enumerate().fold(ScriptedProvider::new(), |provider, (i, keyword)| {
        let videos = (0..5)
            .map(|v| {
                let id = format!("{}-{}", i, v);
                (
                    VideoHit::new(&id, format!("Video {}", v)),
                    VideoStatistics::new(&id, 1000 * (v + 1) as u64, 40 + i as u64, 5 + v as u64),
                )
            })
            .collect();
        provider.with_videos(keyword, videos)
    })
}

fn bench_score(c: &mut Criterion) {
    let weights = ScoreWeights::default();

    c.bench_function("score_single", |b| {
        b.iter(|| black_box(weights.score(black_box(50), black_box(10), black_box(1000))));
    });
}

fn bench_assign_ranks(c: &mut Criterion) {
    let scored: Vec<ScoredKeyword> = (0..100)
        .map(|i| ScoredKeyword {
            keyword: format!("keyword {}", i),
            score: ((i * 37) % 100) as f64 / 100.0,
            top_video_title: "title".to_string(),
            top_video_id: "id".to_string(),
        })
        .collect();

    c.bench_function("assign_ranks_100", |b| {
        b.iter(|| black_box(assign_ranks(scored.clone())));
    });
}

fn bench_rank_pass(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let keywords: Vec<String> = (0..10).map(|i| format!("keyword {}", i)).collect();
    let engine = RankingEngine::new(
        Arc::new(create_provider(&keywords)),
        ScoreWeights::default(),
        RetryPolicy::default(),
    );

    c.bench_function("rank_10_keywords_scripted", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(engine.rank(&keywords, 5).await) });
    });
}

criterion_group!(benches, bench_score, bench_assign_ranks, bench_rank_pass);
criterion_main!(benches);
