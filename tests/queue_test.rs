use tidalplayer::management::{QueueError, QueueEvent, QueueManager};
use tidalplayer::types::Queue;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

fn manager() -> (QueueManager<UnboundedSender<QueueEvent>>, UnboundedReceiver<QueueEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueManager::new(tx), rx)
}

fn drain(rx: &mut UnboundedReceiver<QueueEvent>) -> Vec<QueueEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn current(id: &str, index: usize) -> QueueEvent {
    QueueEvent::CurrentTrack {
        id: id.to_string(),
        index,
    }
}

#[test]
fn test_append_reports_size_and_progress() {
    let (mut queue, mut rx) = manager();
    queue.append("a");
    queue.append("b");

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.current_index(), None);
    assert_eq!(
        drain(&mut rx),
        vec![
            QueueEvent::Size(1),
            QueueEvent::Unfinished,
            QueueEvent::Size(2),
            QueueEvent::Unfinished
        ]
    );
}

#[test]
fn test_play_inserts_after_cursor_and_advances() {
    let (mut queue, mut rx) = manager();
    queue.append("a");
    queue.append("b");
    queue.play_position(0).unwrap();
    drain(&mut rx);

    queue.play("x");
    assert_eq!(queue.tracks(), &["a", "x", "b"]);
    assert_eq!(queue.current_index(), Some(1));
    assert_eq!(queue.current_track(), Some("x"));
    assert_eq!(
        drain(&mut rx),
        vec![QueueEvent::Size(3), current("x", 1), QueueEvent::Unfinished]
    );
}

#[test]
fn test_play_on_empty_queue_starts_at_zero() {
    let (mut queue, mut rx) = manager();
    queue.play("first");

    assert_eq!(queue.current_index(), Some(0));
    assert_eq!(
        drain(&mut rx),
        vec![QueueEvent::Size(1), current("first", 0), QueueEvent::Finished]
    );
}

#[test]
fn test_insert_next_keeps_cursor() {
    let (mut queue, mut rx) = manager();
    queue.play("a");
    queue.append("c");
    drain(&mut rx);

    queue.insert_next("b");
    assert_eq!(queue.tracks(), &["a", "b", "c"]);
    assert_eq!(queue.current_index(), Some(0));
    assert_eq!(
        drain(&mut rx),
        vec![QueueEvent::Size(3), QueueEvent::Unfinished, current("a", 0)]
    );
}

#[test]
fn test_next_stops_on_last_track() {
    let (mut queue, mut rx) = manager();
    queue.play("a");
    queue.append("b");
    drain(&mut rx);

    assert_eq!(queue.next(), Some("b"));
    assert_eq!(
        drain(&mut rx),
        vec![current("b", 1), QueueEvent::Finished]
    );

    assert!(queue.is_finished());
    assert_eq!(queue.next(), None);
    assert_eq!(queue.current_index(), Some(1));
    assert_eq!(drain(&mut rx), vec![QueueEvent::Finished]);
}

#[test]
fn test_next_from_fresh_queue_starts_first_track() {
    let (mut queue, _rx) = manager();
    queue.append("a");
    queue.append("b");

    assert_eq!(queue.next(), Some("a"));
    assert_eq!(queue.current_index(), Some(0));
}

#[test]
fn test_previous_and_restart() {
    let (mut queue, mut rx) = manager();
    assert!(matches!(queue.previous(), Err(QueueError::Empty)));
    assert!(matches!(queue.restart(), Err(QueueError::Empty)));

    queue.append("a");
    queue.append("b");
    queue.play_position(1).unwrap();
    drain(&mut rx);

    assert_eq!(queue.previous().unwrap(), "a");
    assert_eq!(queue.previous().unwrap(), "a");
    assert_eq!(queue.current_index(), Some(0));
    drain(&mut rx);

    assert_eq!(queue.restart().unwrap(), "a");
    assert_eq!(drain(&mut rx), vec![current("a", 0)]);
}

#[test]
fn test_out_of_range_positions_are_errors() {
    let (mut queue, _rx) = manager();
    queue.append("a");

    assert!(matches!(
        queue.play_position(3),
        Err(QueueError::OutOfRange { index: 3, len: 1 })
    ));
    assert!(matches!(
        queue.track_id(1),
        Err(QueueError::OutOfRange { index: 1, len: 1 })
    ));
    assert_eq!(queue.track_id(0).unwrap(), "a");
    assert_eq!(queue.current_index(), None);
}

#[test]
fn test_list_and_clear() {
    let (mut queue, mut rx) = manager();
    queue.append("a");
    queue.append("b");
    drain(&mut rx);

    queue.list();
    assert_eq!(
        drain(&mut rx),
        vec![
            QueueEvent::Cleared,
            QueueEvent::Contains("a".into()),
            QueueEvent::Contains("b".into())
        ]
    );

    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.current_index(), None);
    assert_eq!(drain(&mut rx), vec![QueueEvent::Cleared]);
}

#[test]
fn test_dropped_receiver_does_not_break_queue() {
    let (mut queue, rx) = manager();
    drop(rx);
    queue.append("a");
    assert_eq!(queue.next(), Some("a"));
}

#[test]
fn test_stale_cursor_is_discarded() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let queue = QueueManager::with_queue(
        Queue {
            tracks: vec!["a".into()],
            current: Some(4),
        },
        tx,
    );
    assert_eq!(queue.current_index(), None);
}

#[tokio::test]
async fn test_persist_and_load_round_trip() {
    let path = std::env::temp_dir().join(format!("tidalplayer-queue-{}.json", std::process::id()));

    let (mut queue, _rx) = manager();
    queue.append("a");
    queue.play("b");
    queue.persist_to(&path).await.unwrap();

    let (tx, _rx2) = mpsc::unbounded_channel();
    let loaded = QueueManager::load_from(&path, tx).await.unwrap();
    assert_eq!(loaded.tracks(), &["b", "a"]);
    assert_eq!(loaded.current_index(), Some(0));

    let _ = std::fs::remove_file(&path);
}

// Queue errors bubble up through the command-line result alias
fn jump(queue: &mut QueueManager<UnboundedSender<QueueEvent>>, position: usize) -> tidalplayer::Res<String> {
    Ok(queue.play_position(position)?.to_string())
}

#[test]
fn test_queue_errors_convert_into_res() {
    let (mut queue, _rx) = manager();
    queue.append("a");

    assert_eq!(jump(&mut queue, 0).unwrap(), "a");

    let err = jump(&mut queue, 2).unwrap_err();
    assert_eq!(err.to_string(), "position 2 is out of range for a queue of 1 tracks");
    assert!(err.downcast_ref::<QueueError>().is_some());
}
