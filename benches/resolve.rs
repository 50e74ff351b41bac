//! Benchmarks for arbitrary value resolution.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use arbitrary_css::{JsonTheme, Resolver, presets};
use serde_json::json;

const CLASSES: &[&str] = &[
    "w-[13px]",
    "-mt-[4px]",
    "mx-[calc(100%-1rem)]",
    "text-[2rem]",
    "text-[#ef4444]",
    "bg-[url(/hero.png)]",
    "bg-[red]/50",
    "font-[700]",
    "ease-[in]",
    "text-[theme(colors.red.500)]",
];

fn theme() -> JsonTheme {
    JsonTheme::new(json!({
        "colors": { "red": { "500": "#ef4444" } },
        "transitionTimingFunction": { "in": "cubic-bezier(0.4, 0, 1, 1)" }
    }))
}

// ============================================================================
// Resolution Benchmarks
// ============================================================================

fn bench_resolve_mixed(c: &mut Criterion) {
    let registry = presets::registry();
    let theme = theme();
    let resolver = Resolver::new(&registry, &theme);

    c.bench_function("resolve_mixed", |b| {
        b.iter(|| {
            for class in CLASSES {
                let _ = black_box(resolver.resolve_class(black_box(class)));
            }
        });
    });
}

fn bench_resolve_color_alpha(c: &mut Criterion) {
    let registry = presets::registry();
    let theme = theme();
    let resolver = Resolver::new(&registry, &theme);

    c.bench_function("resolve_color_alpha", |b| {
        b.iter(|| resolver.resolve_class(black_box("bg-[#0f172a]/[.35]")).unwrap());
    });
}

// ============================================================================
// Diagnostic Benchmarks
// ============================================================================

fn bench_unknown_with_suggestions(c: &mut Criterion) {
    let registry = presets::registry();
    let theme = theme();
    let resolver = Resolver::new(&registry, &theme);

    c.bench_function("unknown_with_suggestions", |b| {
        b.iter(|| resolver.resolve_class(black_box("bordr-[2px]")).unwrap_err());
    });
}

criterion_group!(
    benches,
    // Resolution
    bench_resolve_mixed,
    bench_resolve_color_alpha,
    // Diagnostics
    bench_unknown_with_suggestions,
);
criterion_main!(benches);
