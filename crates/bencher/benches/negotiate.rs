use std::hint::black_box;

use bencher::{BenchCase, HeaderFixture};
use conneg_media::{MediaRange, MediaType, intersect};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

static API_CLIENT: HeaderFixture =
    HeaderFixture::new("api_client", include_str!("../resources/accept/api_client.txt"));
static FIREFOX: HeaderFixture =
    HeaderFixture::new("firefox", include_str!("../resources/accept/firefox.txt"));
static CROWDED: HeaderFixture =
    HeaderFixture::new("crowded", include_str!("../resources/accept/crowded.txt"));

fn create_bench_cases() -> Vec<BenchCase> {
    vec![
        BenchCase::simple("api_client", API_CLIENT),
        BenchCase::browser("firefox", FIREFOX),
        BenchCase::crowded("crowded", CROWDED),
    ]
}

fn supported_media_types() -> Vec<MediaType> {
    vec![MediaType::new("application", "json"), MediaType::new("text", "html")]
}

fn benchmark_parse_and_sort(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("parse_and_sort");

    for case in create_bench_cases() {
        group.throughput(Throughput::Bytes(case.header_value().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter(|| {
                let range = case
                    .header_value()
                    .parse::<MediaRange>()
                    .expect("fixture should be a valid media range")
                    .sort_preferred();
                black_box(range);
            });
        });
    }

    group.finish();
}

fn benchmark_intersect(criterion: &mut Criterion) {
    let supported = supported_media_types();
    let mut group = criterion.benchmark_group("intersect");

    for case in create_bench_cases() {
        let requested: Vec<MediaType> = case
            .header_value()
            .parse::<MediaRange>()
            .expect("fixture should be a valid media range")
            .sort_preferred()
            .into_iter()
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &requested, |b, requested| {
            b.iter(|| black_box(intersect(requested, &supported)));
        });
    }

    group.finish();
}

fn benchmark_dispatch(criterion: &mut Criterion) {
    use bytes::Bytes;
    use conneg_web::{CodecRegistry, HandlerError, Pipeline, Reply, RequestContext};
    use http::{Method, Request, header};
    use serde_json::Value;

    let pipeline = Pipeline::new(CodecRegistry::default());
    let echo = |_ctx: &RequestContext<'_>, body: Option<Value>| -> Result<Reply, HandlerError> {
        Ok(Reply::ok(body.unwrap_or(Value::Null)))
    };

    let mut group = criterion.benchmark_group("dispatch");

    for case in create_bench_cases() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/bench")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, case.header_value())
            .body(Bytes::from_static(b"{\"a\": 1}"))
            .expect("request should build");

        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &request, |b, request| {
            b.iter(|| {
                let response =
                    pipeline.dispatch(request, &echo).expect("dispatch should produce a response");
                black_box(response);
            });
        });
    }

    group.finish();
}

criterion_group!(negotiate, benchmark_parse_and_sort, benchmark_intersect, benchmark_dispatch);
criterion_main!(negotiate);
