use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use std::thread;
use tessera::{Codec, CodecConfig, SchemeKind};

const SESSION_ID: &str = "6f1c2d3e-session-identifier";

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for key_len in [16, 24, 32] {
        let key = CodecConfig::generate_key(key_len).unwrap();
        let codec = Codec::new(&key).unwrap();

        group.bench_function(format!("aead_{}", key_len * 8), |b| {
            b.iter(|| codec.generate(black_box(SESSION_ID)).unwrap())
        });
    }

    let codec = Codec::hmac(b"benchmark-hmac-secret").unwrap();
    group.bench_function("hmac_sha256", |b| {
        b.iter(|| codec.generate(black_box(SESSION_ID)).unwrap())
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for scheme in [SchemeKind::Aead, SchemeKind::Hmac] {
        let key = CodecConfig::generate_key(32).unwrap();
        let codec = CodecConfig::new(key).with_scheme(scheme).build().unwrap();
        let token = codec.generate(SESSION_ID).unwrap();

        group.bench_function(format!("{scheme}_valid"), |b| {
            b.iter(|| codec.validate(black_box(SESSION_ID), black_box(&token)).unwrap())
        });

        group.bench_function(format!("{scheme}_wrong_identity"), |b| {
            b.iter(|| codec.validate(black_box("someone-else"), black_box(&token)).is_err())
        });

        group.bench_function(format!("{scheme}_malformed"), |b| {
            b.iter(|| codec.validate(black_box(SESSION_ID), black_box("not-a-token")).is_err())
        });
    }

    group.finish();
}

fn bench_shared_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_codec");
    group.sample_size(20);

    let codec = Arc::new(Codec::new(b"ayellowsubmarine").unwrap());

    group.bench_function("4_threads_x_250", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let codec = Arc::clone(&codec);
                    thread::spawn(move || {
                        for _ in 0..250 {
                            let token = codec.generate(SESSION_ID).unwrap();
                            codec.validate(SESSION_ID, &token).unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(token_benches, bench_generate, bench_validate, bench_shared_codec);

criterion_main!(token_benches);
