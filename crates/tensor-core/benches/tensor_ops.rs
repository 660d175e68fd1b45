// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the raw tensor kernels, without the layer contract.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tensor_core::ops::{self, PoolParams};
use tensor_core::{Shape, Tensor};

fn ramp(shape: Shape) -> Tensor {
    let data = (0..shape.num_elements()).map(|i| (i % 97) as f32 - 48.0).collect();
    Tensor::from_vec(shape, data).expect("buffer matches shape")
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops_linear");
    for (in_f, out_f) in [(64, 128), (512, 1024)] {
        let input = ramp(Shape::new(1, 256, in_f));
        let weight = vec![0.01; in_f * out_f];
        let bias = vec![0.5; out_f];
        let mut out = Tensor::new(1, 256, out_f);

        group.throughput(Throughput::Elements((256 * in_f * out_f) as u64));
        group.bench_function(BenchmarkId::from_parameter(format!("{in_f}x{out_f}")), |b| {
            b.iter(|| ops::linear(black_box(&input.view()), &weight, Some(bias.as_slice()), out_f, &mut out))
        });
    }
    group.finish();
}

fn bench_max_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops_max_pool2d");
    let params = PoolParams {
        pad_h: 1,
        pad_w: 1,
        kernel_h: 3,
        kernel_w: 3,
        stride_h: 2,
        stride_w: 2,
    };
    for shape in [Shape::new(3, 320, 320), Shape::new(64, 80, 80)] {
        let input = ramp(shape);
        let out_shape = params.output_shape(shape).expect("valid pooling");
        let mut out = Tensor::zeros(out_shape);

        group.throughput(Throughput::Elements(shape.num_elements() as u64));
        group.bench_function(BenchmarkId::from_parameter(shape), |b| {
            b.iter(|| ops::max_pool2d(black_box(&input.view()), &params, &mut out))
        });
    }
    group.finish();
}

fn bench_binary(c: &mut Criterion) {
    let shape = Shape::new(32, 160, 160);
    let lhs = ramp(shape);
    let rhs = ramp(shape);
    let mut out = Tensor::zeros(shape);
    c.bench_function("ops_mul_32x160x160", |b| {
        b.iter(|| ops::mul(black_box(&lhs.view()), &rhs.view(), &mut out))
    });
}

criterion_group!(benches, bench_linear, bench_max_pool, bench_binary);
criterion_main!(benches);
