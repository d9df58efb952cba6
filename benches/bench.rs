// Criterion benchmarks for the player cluster client

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use player_cluster_client::core::{form::parse_form, render::render_response};
use player_cluster_client::models::{ClusterResponse, FormFields, RecommendedPlayer, Scalar};

fn create_fields() -> FormFields {
    FormFields {
        desired_services: r#"["coaching","hitting partner","video analysis","fitness"]"#.to_string(),
        level: "college player".to_string(),
        rank: "72.5".to_string(),
        budget: "60".to_string(),
        travel: "25".to_string(),
        goals: r#"["compete","improve serve"]"#.to_string(),
        languages: r#"["English","Spanish","Portuguese"]"#.to_string(),
    }
}

fn create_response(players: usize) -> ClusterResponse {
    ClusterResponse::Clustered {
        cluster: Scalar::Number(2.0),
        recommended_players: (0..players)
            .map(|i| RecommendedPlayer {
                id: Scalar::Text(format!("player-{}", i)),
                level: Scalar::from("tournament player"),
                rank: Scalar::Number((i % 100) as f64 + 0.5),
                max_budget_per_session: Scalar::Number(20.0 + (i % 50) as f64),
            })
            .collect(),
    }
}

fn bench_parse_form(c: &mut Criterion) {
    let fields = create_fields();

    c.bench_function("parse_form", |b| {
        b.iter(|| parse_form(black_box(&fields)))
    });
}

fn bench_render_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_response");

    for players in [0usize, 5, 100].iter() {
        let response = create_response(*players);
        group.bench_with_input(BenchmarkId::from_parameter(players), &response, |b, response| {
            b.iter(|| render_response(black_box(response)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_form, bench_render_response);
criterion_main!(benches);
