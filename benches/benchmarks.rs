/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use radint_rs::atoms::Element;
use radint_rs::continuum::coulomb::reduced_coulomb;
use radint_rs::integrals::{
    evaluation_report, radial_integral_with_config, IntegralKind, IntegralRequest,
    IntegrationConfig, IntegrationMethod,
};
use radint_rs::utils::PhysicalConstants;

fn bench_methods(c: &mut Criterion) {
    let element = Element::hydrogen_like(2)
        .unwrap()
        .with_constants(PhysicalConstants::atomic());
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Radial, &element, 1, 0, 0.5, 1, 1, 4.0);

    let mut group = c.benchmark_group("radial_integral");
    for method in IntegrationMethod::ALL {
        group.bench_function(method.name(), |b| {
            b.iter(|| radial_integral_with_config(black_box(&request), method, &config))
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let element = Element::hydrogen_like(2)
        .unwrap()
        .with_constants(PhysicalConstants::atomic());
    let config = IntegrationConfig::atomic_units();
    let request = IntegralRequest::new(IntegralKind::Reduced, &element, 1, 0, 0.5, 0, 1, 4.0);

    c.bench_function("evaluation_report", |b| {
        b.iter(|| evaluation_report(black_box(&request), false, &config))
    });
}

fn bench_coulomb(c: &mut Criterion) {
    let mut group = c.benchmark_group("coulomb");
    group.bench_function("origin_series", |b| {
        b.iter(|| reduced_coulomb(black_box(2), black_box(-2.4), black_box(3.0)))
    });
    group.bench_function("ode_continuation", |b| {
        b.iter(|| reduced_coulomb(black_box(2), black_box(-2.4), black_box(20.0)))
    });
    group.bench_function("asymptotic", |b| {
        b.iter(|| reduced_coulomb(black_box(2), black_box(-2.4), black_box(120.0)))
    });
    group.finish();
}

criterion_group!(benches, bench_methods, bench_selection, bench_coulomb);
criterion_main!(benches);
