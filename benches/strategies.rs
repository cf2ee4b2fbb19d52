// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use buddhagrid::{RenderConfig, Renderer, Strategy};
use criterion::{criterion_group, criterion_main, Criterion};

fn renderer(strategy: Strategy, workers: usize) -> Renderer {
    Renderer::new(RenderConfig::new(500, 120, 90, strategy, workers).unwrap()).unwrap()
}

fn strategies(c: &mut Criterion) {
    for &strategy in &[Strategy::Sequential, Strategy::PerPixel, Strategy::PerRow] {
        let r = renderer(strategy, 1);
        c.bench_function(strategy.name(), move |b| b.iter(|| r.accumulate().unwrap()));
    }
    let workers = num_cpus::get();
    let r = renderer(Strategy::WorkerPool, workers);
    c.bench_function(&format!("worker-pool/{}", workers), move |b| {
        b.iter(|| r.accumulate().unwrap())
    });
}

criterion_group!(benches, strategies);
criterion_main!(benches);
