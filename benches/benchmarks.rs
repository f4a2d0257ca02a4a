use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use qiki_number::{Number, Qigits, SuffixType};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// An integer of `n` decimal digits: "123456789123...".
fn make_large_integer(n: usize) -> String {
    (0..n)
        .map(|i| char::from(b'1' + (i % 9) as u8))
        .collect()
}

// ---------------------------------------------------------------------------
// Encoding benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode");

    g.bench_function("from_i64", |b| {
        b.iter(|| Number::from(black_box(123_456_789_i64)));
    });
    g.bench_function("from_i64/negative", |b| {
        b.iter(|| Number::from(black_box(-123_456_789_i64)));
    });

    let big: BigInt = make_large_integer(250).parse().unwrap();
    g.bench_function("from_bigint/250d", |b| {
        b.iter(|| Number::from_bigint(black_box(&big)).unwrap());
    });

    for qigits in [2, 8, 15] {
        g.bench_with_input(BenchmarkId::new("from_f64", qigits), &qigits, |b, &q| {
            b.iter(|| Number::from_f64(black_box(123.456_789), Qigits::new(q)).unwrap());
        });
    }
    g.bench_function("from_f64/fractional", |b| {
        b.iter(|| Number::from_f64(black_box(-0.001_234_5), Qigits::DEFAULT).unwrap());
    });

    g.bench_function("from_str/integer", |b| {
        b.iter(|| black_box("123456789").parse::<Number>().unwrap());
    });
    g.bench_function("from_str/float", |b| {
        b.iter(|| black_box("123.456789").parse::<Number>().unwrap());
    });
    g.bench_function("from_str/qstring", |b| {
        b.iter(|| black_box("0q82_01__8202_690300").parse::<Number>().unwrap());
    });

    g.bench_function("complex", |b| {
        b.iter(|| Number::from_complex(black_box(1.5), black_box(-2.5)).unwrap());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Decoding benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode");

    let small = Number::from(42);
    let float = Number::try_from(123.456_789).unwrap();
    let large = Number::from_bigint(&make_large_integer(250).parse().unwrap()).unwrap();
    let complex = Number::from_complex(1.5, -2.5).unwrap();

    g.bench_function("to_bigint/small", |b| {
        b.iter(|| black_box(&small).to_bigint().unwrap());
    });
    g.bench_function("to_bigint/250d", |b| {
        b.iter(|| black_box(&large).to_bigint().unwrap());
    });
    g.bench_function("to_i64", |b| {
        b.iter(|| i64::try_from(black_box(&small)).unwrap());
    });
    g.bench_function("to_f64", |b| {
        b.iter(|| black_box(&float).to_f64().unwrap());
    });
    g.bench_function("to_complex", |b| {
        b.iter(|| black_box(&complex).to_complex().unwrap());
    });
    g.bench_function("zone", |b| {
        b.iter(|| black_box(&float).zone());
    });

    for (name, n) in [("small", &small), ("float", &float), ("complex", &complex)] {
        g.bench_with_input(BenchmarkId::new("qstring", name), n, |b, n| {
            b.iter(|| black_box(n).qstring());
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Comparison benchmarks
// ---------------------------------------------------------------------------

fn bench_compare(c: &mut Criterion) {
    let mut g = c.benchmark_group("compare");

    let a = Number::try_from(123.456_789).unwrap();
    let b = Number::try_from(987.654_321).unwrap();
    let a_clone = a.clone();
    let plateau = Number::from_qstring("0q82").unwrap();
    let one = Number::from(1);

    g.bench_function("bytes", |bench| {
        bench.iter(|| black_box(a.as_bytes()).cmp(black_box(b.as_bytes())));
    });
    g.bench_function("partial_cmp/different", |bench| {
        bench.iter(|| black_box(&a).partial_cmp(black_box(&b)));
    });
    g.bench_function("eq/equal", |bench| {
        bench.iter(|| black_box(&a) == black_box(&a_clone));
    });
    g.bench_function("eq/plateau", |bench| {
        bench.iter(|| black_box(&plateau) == black_box(&one));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Suffix benchmarks
// ---------------------------------------------------------------------------

fn bench_suffix(c: &mut Criterion) {
    let mut g = c.benchmark_group("suffix");

    let root = Number::from(42);
    let listed = root
        .plus_suffix(SuffixType::LISTING, Number::from(7))
        .unwrap()
        .plus_suffix(SuffixType::TEST, [0x11, 0x22])
        .unwrap();

    g.bench_function("plus_suffix", |b| {
        b.iter(|| black_box(&root).plus_suffix(SuffixType::LISTING, [0x82, 0x07]).unwrap());
    });
    g.bench_function("suffixes", |b| {
        b.iter(|| black_box(&listed).suffixes().unwrap());
    });
    g.bench_function("minus_suffix", |b| {
        b.iter(|| black_box(&listed).minus_suffix(SuffixType::LISTING).unwrap());
    });
    g.bench_function("normalized", |b| {
        b.iter(|| black_box(&listed).normalized().unwrap());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_encode, bench_decode, bench_compare, bench_suffix);
criterion_main!(benches);
