//! Parser benchmarks.
//!
//! Run with: `cargo bench --package idpasc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use idpasc_lex::Lexer;
use idpasc_util::Handler;

fn parse_source(source: &str) {
    let handler = Handler::new();
    let tokens = Lexer::tokenize(source, &handler);
    let _ = idpasc_par::parse(tokens);
}

fn bench_parser_minimal(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_minimal");

    let source = "program p; mulai selesai.";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("empty_program", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_declarations");

    let source = r#"
        program deklarasi;
        konstanta
            pi = 3;
            nama = 'x';
        tipe
            vektor = larik[1..10] dari integer;
        variabel
            a, b, c : integer;
            r : real;
            v : vektor;
        mulai
            a := 1;
            b := 2;
            c := a + b
        selesai.
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("mixed_declarations", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_subprograms(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_subprograms");

    let source = r#"
        program fibonacci;
        variabel n, a, b, temp, i : integer;

        fungsi tambah(x, y : integer) : integer;
        mulai
            tambah := x + y
        selesai;

        prosedur cetak(x, y : integer);
        mulai
            writeln(x);
            writeln(y)
        selesai;

        mulai
            n := 10;
            a := 0;
            b := 1;
            untuk i := 1 ke n lakukan
            mulai
                temp := tambah(a, b);
                a := b;
                b := temp
            selesai;
            writeln(a)
        selesai.
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("functions_and_procedures", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        program kontrol;
        variabel n, sum, i : integer;
        mulai
            n := 10;
            jika n < 0 maka
                sum := 0
            selainitu
                mulai
                    sum := 0;
                    i := 0;
                    selama i < n lakukan
                    mulai
                        sum := sum + i;
                        i := i + 1
                    selesai;
                    kasus n dari
                        1: writeln(1);
                        2: writeln(2)
                    selesai
                selesai;
            ulangi
                n := n - 1
            sampai n = 0
        selesai.
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("control_flow", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_arrays_and_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_arrays_and_records");

    let source = r#"
        program struktur;
        tipe
            titik = rekaman
                x, y : integer;
            selesai;
            papan = larik[0..9] dari integer;
        variabel
            p : titik;
            b : papan;
            i : integer;
        mulai
            p.x := 1;
            p.y := 2;
            untuk i := 0 ke 9 lakukan
                b[i] := i * i
        selesai.
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("arrays_and_records", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_minimal,
    bench_parser_declarations,
    bench_parser_subprograms,
    bench_parser_control_flow,
    bench_parser_arrays_and_records,
);
criterion_main!(benches);
