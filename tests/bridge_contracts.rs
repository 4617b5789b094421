//! Bridge behavior across real thread boundaries: resolution and updates
//! fired from plain worker threads, consumed on the async side.

use std::sync::{Arc, Barrier};
use std::thread;

use futures::StreamExt;
use openai_client::bridge::{
    broadcast_pair, completion_pair, stream_pair, StreamEvent, Subscriber,
};
use openai_client::Error;

fn failure(message: &str) -> Error {
    Error::Config {
        message: message.to_owned(),
    }
}

#[tokio::test]
async fn test_resolution_crosses_thread_boundaries() {
    let (handle, response) = completion_pair();
    let worker = thread::spawn(move || {
        assert!(handle.resolve(Ok("from elsewhere".to_owned())));
    });
    assert_eq!(response.await.unwrap(), "from elsewhere");
    worker.join().unwrap();
}

#[tokio::test]
async fn test_racing_resolvers_produce_exactly_one_result() {
    let (handle, response) = completion_pair();
    let handle = Arc::new(handle);
    let barrier = Arc::new(Barrier::new(2));

    let workers: Vec<_> = [1u32, 2]
        .into_iter()
        .map(|value| {
            let handle = handle.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                handle.resolve(Ok(value))
            })
        })
        .collect();

    let wins: usize = workers
        .into_iter()
        .map(|worker| usize::from(worker.join().unwrap()))
        .sum();
    assert_eq!(wins, 1);

    let delivered = response.await.unwrap();
    assert!(delivered == 1 || delivered == 2);
}

#[tokio::test]
async fn test_stream_preserves_order_from_a_worker_thread() {
    let (handle, stream) = stream_pair();
    let worker = thread::spawn(move || {
        for n in 1..=100u32 {
            assert!(handle.on_update(Ok(n)));
        }
        assert!(handle.on_complete(None));
    });

    let items: Vec<_> = stream.map(|item| item.unwrap()).collect().await;
    assert_eq!(items, (1..=100).collect::<Vec<_>>());
    worker.join().unwrap();
}

#[tokio::test]
async fn test_wrapped_calls_are_independent() {
    let (first_handle, first_response) = completion_pair();
    let (second_handle, second_response) = completion_pair::<u32>();

    assert!(first_handle.resolve(Ok(10u32)));
    assert_eq!(first_response.await.unwrap(), 10);

    // Resolving the first call left the second untouched.
    drop(second_response);
    assert!(!second_handle.resolve(Ok(20)));
}

#[tokio::test]
async fn test_broadcast_fans_out_across_threads() {
    let (handle, publisher) = broadcast_pair(64);
    let second = publisher.subscribe();

    let worker = thread::spawn(move || {
        for n in 1..=10u32 {
            assert!(handle.on_update(Ok(n)));
        }
        assert!(handle.on_complete(None));
    });

    let (primary, secondary): (Vec<_>, Vec<_>) =
        futures::join!(publisher.collect(), second.collect());
    worker.join().unwrap();

    for events in [&primary, &secondary] {
        assert_eq!(events.len(), 11);
        let values: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                StreamEvent::Update(Ok(value)) => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(values, (1..=10).collect::<Vec<_>>());
        assert!(matches!(events[10], StreamEvent::Finished));
    }
}

#[tokio::test]
async fn test_broadcast_error_updates_do_not_end_the_feed() {
    let (handle, publisher) = broadcast_pair(16);
    let worker = thread::spawn(move || {
        assert!(handle.on_update(Ok(1u32)));
        assert!(handle.on_update(Err(failure("transient"))));
        assert!(handle.on_update(Ok(2u32)));
        assert!(handle.on_complete(Some(failure("fatal"))));
    });

    let events: Vec<_> = publisher.collect().await;
    worker.join().unwrap();

    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], StreamEvent::Update(Ok(1))));
    assert!(matches!(events[1], StreamEvent::Update(Err(_))));
    assert!(matches!(events[2], StreamEvent::Update(Ok(2))));
    assert!(matches!(events[3], StreamEvent::Failed(_)));
}
