// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for layer forward passes.
//!
//! Outputs are pre-sized once per case, so the measured loop is the steady
//! state of a graph executor reusing its activation buffers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use layers::{
    ExpressionLayer, HardSwishLayer, Layer, LinearLayer, MaxPoolingLayer, SigmoidLayer,
    SiluLayer, ViewLayer,
};
use tensor_core::{Shape, Tensor};

const FEATURE_MAPS: [(usize, usize, usize); 4] =
    [(3, 320, 320), (32, 160, 160), (64, 80, 80), (128, 40, 40)];

const LINEAR_CASES: [(usize, usize, usize); 5] = [
    (3, 32, 1000),
    (32, 64, 1000),
    (64, 128, 1000),
    (128, 512, 1000),
    (512, 1024, 1000),
];

fn filled(shape: Shape, seed: f32) -> Tensor {
    let data = (0..shape.num_elements())
        .map(|i| ((i as f32 * 0.618 + seed) % 8.0) - 4.0)
        .collect();
    Tensor::from_vec(shape, data).expect("buffer matches shape")
}

fn run_case(c: &mut Criterion, group_name: &str, layer: &dyn Layer, arity: usize) {
    let mut group = c.benchmark_group(group_name);
    for (ch, h, w) in FEATURE_MAPS {
        let shape = Shape::new(ch, h, w);
        let inputs: Vec<Tensor> = (0..arity).map(|k| filled(shape, k as f32)).collect();
        let mut outputs = [None];
        layer.forward(&inputs, &mut outputs).expect("warm-up forward");

        group.throughput(Throughput::Elements(shape.num_elements() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(shape), &inputs, |b, inputs| {
            b.iter(|| layer.forward(black_box(inputs), &mut outputs))
        });
    }
    group.finish();
}

fn bench_activations(c: &mut Criterion) {
    run_case(c, "sigmoid", &SigmoidLayer::new(), 1);
    run_case(c, "hard_swish", &HardSwishLayer::new(), 1);
    run_case(c, "silu", &SiluLayer::new(), 1);
}

fn bench_expression(c: &mut Criterion) {
    let layer = ExpressionLayer::new("mul(add(@0,@1),add(@2,@3))").expect("valid expression");
    run_case(c, "expression", &layer, 4);
}

fn bench_max_pooling(c: &mut Criterion) {
    run_case(c, "max_pooling_3x3_s3", &MaxPoolingLayer::new(0, 0, 3, 3, 3, 3), 1);
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");
    for (in_features, out_features, rows) in LINEAR_CASES {
        let mut layer = LinearLayer::new(in_features, out_features, true);
        layer
            .set_weights(vec![0.01; in_features * out_features])
            .expect("weight size");
        layer.set_bias(vec![0.5; out_features]).expect("bias size");

        let inputs = [filled(Shape::new(1, rows, in_features), 0.0)];
        let mut outputs = [None];
        layer.forward(&inputs, &mut outputs).expect("warm-up forward");

        group.throughput(Throughput::Elements((rows * in_features * out_features) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{in_features}x{out_features}x{rows}")),
            &inputs,
            |b, inputs| b.iter(|| layer.forward(black_box(inputs), &mut outputs)),
        );
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let layer = ViewLayer::new(vec![1, 128, 32, 128]);
    let inputs = [filled(Shape::new(32, 128, 128), 0.0)];
    let mut outputs = [None];
    c.bench_function("view_32x128x128", |b| {
        b.iter(|| layer.forward(black_box(&inputs), &mut outputs))
    });
}

criterion_group!(
    benches,
    bench_activations,
    bench_expression,
    bench_max_pooling,
    bench_linear,
    bench_view
);
criterion_main!(benches);
