// SPDX-License-Identifier: MIT OR Apache-2.0

//! Benchmark sealing and opening messages of varying payload sizes.
//!
//! The appending forms allocate their output, the in-place forms with detached tags reuse one
//! buffer and only measure the cipher and the authenticator.
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use p2panda_aead::test_utils::Rng;
use p2panda_aead::{ChaCha20Poly1305, XChaCha20Poly1305};

const KB: usize = 1024;

const SIZES: [usize; 6] = [16, KB, 16 * KB, 64 * KB, 256 * KB, 1024 * KB];

fn get_benchmark_id(function_name: &str, size: usize) -> BenchmarkId {
    let benchmark_parameter = match size > KB {
        false => format!("{size} B"),
        true => format!("{} KiB", size / KB),
    };
    BenchmarkId::new(function_name, benchmark_parameter)
}

fn criterion_benchmark(c: &mut Criterion) {
    let rng = Rng::from_seed([1; 32]);
    let cipher = ChaCha20Poly1305::new(rng.key().unwrap());
    let x_cipher = XChaCha20Poly1305::new(rng.key().unwrap());
    let nonce = rng.nonce().unwrap();
    let x_nonce = rng.x_nonce().unwrap();
    let aad = rng.random_vec(32).unwrap();

    let mut group = c.benchmark_group("chacha20poly1305");
    for size in SIZES {
        let plaintext = rng.random_vec(size).unwrap();
        let ciphertext = cipher.seal(&nonce, &plaintext, &aad).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(get_benchmark_id("seal", size), &size, |b, _| {
            b.iter(|| cipher.seal(&nonce, &plaintext, &aad).unwrap())
        });
        group.bench_with_input(get_benchmark_id("open", size), &size, |b, _| {
            b.iter(|| cipher.open(&nonce, &ciphertext, &aad).unwrap())
        });

        let mut buffer = plaintext.clone();
        group.bench_with_input(get_benchmark_id("seal detached", size), &size, |b, _| {
            b.iter(|| {
                cipher
                    .seal_in_place_detached(&nonce, &aad, &mut buffer)
                    .unwrap()
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("xchacha20poly1305");
    for size in SIZES {
        let plaintext = rng.random_vec(size).unwrap();
        let ciphertext = x_cipher.seal(&x_nonce, &plaintext, &aad).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(get_benchmark_id("seal", size), &size, |b, _| {
            b.iter(|| x_cipher.seal(&x_nonce, &plaintext, &aad).unwrap())
        });
        group.bench_with_input(get_benchmark_id("open", size), &size, |b, _| {
            b.iter(|| x_cipher.open(&x_nonce, &ciphertext, &aad).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
