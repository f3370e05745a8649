use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kucoin_futures::adapters::kucoin::signing::{encode_query, KucoinSigner};

fn bench_sign_no_params(c: &mut Criterion) {
    c.bench_function("sign_no_params", |b| {
        let signer = KucoinSigner::new("bench-secret");

        b.iter(|| {
            black_box(signer.sign(
                black_box("1700000000000"),
                "GET",
                black_box("/api/v1/contracts/active"),
                &[],
            ));
        });
    });
}

fn bench_sign_with_params(c: &mut Criterion) {
    c.bench_function("sign_with_params", |b| {
        let signer = KucoinSigner::new("bench-secret");
        let params = [("currency", "XBT")];

        b.iter(|| {
            black_box(signer.sign(
                black_box("1700000000000"),
                "GET",
                black_box("/api/v1/account-overview"),
                black_box(&params),
            ));
        });
    });
}

fn bench_encode_query(c: &mut Criterion) {
    c.bench_function("encode_query", |b| {
        let params = [("symbol", "XBTUSDTM"), ("status", "active orders"), ("currency", "USDT")];

        b.iter(|| {
            black_box(encode_query(black_box(&params)));
        });
    });
}

criterion_group!(
    benches,
    bench_sign_no_params,
    bench_sign_with_params,
    bench_encode_query
);
criterion_main!(benches);
