//! Benchmarks for polymorphic payload decoding
//!
//! This benchmark measures:
//! - Role-discriminated message decoding speed
//! - Ordered content fallback overhead
//! - Streamed chunk decoding throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use openai_client::types::{ChatCompletionChunk, Content, Message};
use serde_json::Value;

/// A typical assistant reply payload
const ASSISTANT_MESSAGE: &str =
    r#"{"role":"assistant","content":"The capital of France is Paris."}"#;

/// A user message whose content takes the part-array fallback path
const MULTIMODAL_MESSAGE: &str = r#"{"role":"user","content":[{"type":"text","text":"What is in this image?"},{"type":"image_url","image_url":{"url":"https://example.com/photo.jpg","detail":"high"}}]}"#;

/// A short but realistic conversation
const CONVERSATION: &str = r#"[{"role":"system","content":"You are a helpful assistant."},{"role":"user","content":"What is the capital of France?"},{"role":"assistant","content":"The capital of France is Paris."},{"role":"user","content":"And its population?"},{"role":"assistant","content":"About 2.1 million in the city proper."}]"#;

/// A typical content-delta chunk from a streamed completion
const CHUNK: &str = r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"gpt-4o","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}"#;

fn bench_message_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_decoding");

    group.throughput(Throughput::Bytes(ASSISTANT_MESSAGE.len() as u64));
    group.bench_function("decode_assistant_text", |b| {
        b.iter(|| {
            let message: Message = serde_json::from_str(black_box(ASSISTANT_MESSAGE)).unwrap();
            black_box(message)
        })
    });

    group.throughput(Throughput::Bytes(MULTIMODAL_MESSAGE.len() as u64));
    group.bench_function("decode_multimodal_user", |b| {
        b.iter(|| {
            let message: Message = serde_json::from_str(black_box(MULTIMODAL_MESSAGE)).unwrap();
            black_box(message)
        })
    });

    group.throughput(Throughput::Bytes(CONVERSATION.len() as u64));
    group.bench_function("decode_conversation", |b| {
        b.iter(|| {
            let messages: Vec<Message> = serde_json::from_str(black_box(CONVERSATION)).unwrap();
            black_box(messages)
        })
    });

    group.finish();
}

fn bench_content_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_fallback");

    // Scalar content matches the first shape immediately
    let scalar: Value = serde_json::from_str(r#""plain text content""#).unwrap();
    group.bench_function("scalar_first_shape", |b| {
        b.iter(|| black_box(Content::decode(black_box(&scalar)).unwrap()))
    });

    // An image part falls through the text shape before matching
    let parts: Value = serde_json::from_str(
        r#"[{"type":"image_url","image_url":{"url":"https://example.com/a.png"}}]"#,
    )
    .unwrap();
    group.bench_function("image_part_second_shape", |b| {
        b.iter(|| black_box(Content::decode(black_box(&parts)).unwrap()))
    });

    // Exhausting every shape is the worst case
    let mismatch: Value = serde_json::from_str(r#"{"neither":"shape"}"#).unwrap();
    group.bench_function("fallback_exhaustion", |b| {
        b.iter(|| black_box(Content::decode(black_box(&mismatch)).unwrap_err()))
    });

    group.finish();
}

fn bench_chunk_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_decoding");

    group.throughput(Throughput::Bytes(CHUNK.len() as u64));
    group.bench_function("decode_single_chunk", |b| {
        b.iter(|| {
            let chunk: ChatCompletionChunk = serde_json::from_str(black_box(CHUNK)).unwrap();
            black_box(chunk)
        })
    });

    // Simulate draining a whole streamed response
    let frames: Vec<&str> = std::iter::repeat(CHUNK).take(100).collect();
    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("decode_100_chunks", |b| {
        b.iter(|| {
            let mut content = String::new();
            for frame in black_box(&frames) {
                let chunk: ChatCompletionChunk = serde_json::from_str(frame).unwrap();
                if let Some(delta) = chunk.first_delta() {
                    content.push_str(delta);
                }
            }
            black_box(content)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_message_decoding,
    bench_content_fallback,
    bench_chunk_decoding,
);
criterion_main!(benches);
