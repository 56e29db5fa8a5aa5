//! Generation throughput over a synthetic schema tree.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ngrpc_codegen::ir::{FileDefinition, MethodDefinition, TypeReference};
use ngrpc_codegen::{Generator, OptionSet};

/// `files` schema files spread over ten directories, each with two services of
/// `methods` methods alternating between unary and server-streaming.
fn schema(files: usize, methods: usize) -> Vec<FileDefinition> {
    (0..files)
        .map(|f| {
            let name = format!("dir{}/file{f}.proto", f % 10);
            let package = format!("pkg{f}");
            let services = (0..2)
                .map(|s| {
                    let methods = (0..methods)
                        .map(|m| {
                            let input = TypeReference::in_package(&package, format!("Req{m}"), name.as_str());
                            // Every fourth response comes from a shared file to exercise aliasing.
                            let output = if m % 4 == 0 {
                                TypeReference::in_package("common", format!("Res{m}"), "common/types.proto")
                            } else {
                                TypeReference::in_package(&package, format!("Res{m}"), name.as_str())
                            };
                            if m % 2 == 0 {
                                MethodDefinition::unary(format!("Call{m}"), input, output)
                            } else {
                                MethodDefinition::server_streaming(format!("Watch{m}"), input, output)
                            }
                        })
                        .collect();
                    (format!("Service{f}x{s}"), methods)
                })
                .collect::<Vec<_>>();
            services
                .into_iter()
                .fold(FileDefinition::new(name.as_str()).with_package(package.as_str()), |file, (service, methods)| {
                    file.service(service, methods)
                })
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all");
    for backend in ["google", "improbable-eng"] {
        let parameter = format!(
            "backend={backend},message-import-prefix=app/proto,service-import-prefix=app/grpc,index,module-name=AppGrpc"
        );
        let generator = match OptionSet::resolve(&parameter).map(Generator::new) {
            Ok(Ok(generator)) => generator,
            _ => panic!("invalid benchmark parameter: {parameter}"),
        };
        for files in [10, 100] {
            let input = schema(files, 20);
            group.bench_with_input(BenchmarkId::new(backend, files), &input, |b, input| {
                b.iter(|| generator.generate_all(black_box(input)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
