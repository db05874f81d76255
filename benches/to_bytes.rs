use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use coap_wire::TryIntoBytes;

use bench_input::TestInput;

fn message_to_bytes(c: &mut Criterion) {
  let mut group = c.benchmark_group("msg/to_bytes");
  group.measurement_time(std::time::Duration::from_secs(5));

  let gen = coap_wire::Generator::seeded(1);

  let inputs = vec![TestInput { tkl: 0,
                                n_opts: 0,
                                opt_size: 0,
                                payload_size: 0 },
                    TestInput { tkl: 4,
                                n_opts: 4,
                                opt_size: 8,
                                payload_size: 16 },
                    TestInput { tkl: 4,
                                n_opts: 4,
                                opt_size: 16,
                                payload_size: 16 },
                    TestInput { tkl: 4,
                                n_opts: 8,
                                opt_size: 32,
                                payload_size: 16 },
                    TestInput { tkl: 8,
                                n_opts: 8,
                                opt_size: 64,
                                payload_size: 16 },
                    TestInput { tkl: 8,
                                n_opts: 8,
                                opt_size: 64,
                                payload_size: 128 },
                    TestInput { tkl: 8,
                                n_opts: 16,
                                opt_size: 32,
                                payload_size: 512 },];

  for inp in inputs.iter() {
    let bytes = inp.get_bytes();

    group.bench_with_input(BenchmarkId::new("fill_defaults_and_serialize/size", bytes.len()),
                           inp,
                           |b, inp| {
                             b.iter_batched(|| inp.get_packet(),
                                            |p| gen.generate(p).unwrap(),
                                            BatchSize::SmallInput)
                           });

    group.bench_with_input(BenchmarkId::new("serialize/size", bytes.len()),
                           inp,
                           |b, inp| {
                             b.iter_batched(|| gen.fill_defaults(inp.get_packet()).unwrap(),
                                            |m| m.try_into_bytes().unwrap(),
                                            BatchSize::SmallInput)
                           });
  }
  group.finish();
}

criterion_group!(benches, message_to_bytes);
criterion_main!(benches);
