use tabled::Table;

use crate::{
    Res, error, info,
    management::{QueueError, QueueEvent, QueueManager, QueueSink},
    success, utils, warning,
};

/// What to do with the persisted play queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueAction {
    Show,
    Add(String),
    Insert(String),
    Play(String),
    Position(usize),
    Next,
    Previous,
    Clear,
}

/// Prints queue notifications as they happen.
struct ConsoleSink;

impl QueueSink for ConsoleSink {
    fn notify(&self, event: QueueEvent) {
        match event {
            QueueEvent::CurrentTrack { id, index } => info!("Now playing {} (#{})", id, index),
            QueueEvent::Finished => info!("Reached the end of the queue"),
            QueueEvent::Size(size) => info!("{} track(s) queued", size),
            QueueEvent::Unfinished | QueueEvent::Cleared | QueueEvent::Contains(_) => {}
        }
    }
}

/// Applies `action` to the persisted play queue and saves the result.
///
/// A missing queue file starts an empty queue; an unreadable one is reported
/// and replaced.
///
/// # Example Usage
///
/// ```bash
/// tidalplayer queue add 12345
/// tidalplayer queue position 2
/// ```
pub async fn queue(action: QueueAction) {
    let mut manager = match QueueManager::load(ConsoleSink).await {
        Ok(manager) => manager,
        Err(QueueError::Io(_)) => QueueManager::new(ConsoleSink),
        Err(e) => {
            warning!("Queue file is unreadable, starting a new queue. Err: {}", e);
            QueueManager::new(ConsoleSink)
        }
    };

    if let Err(e) = apply(&mut manager, action).await {
        error!("Queue command failed. Err: {}", e);
    }
}

async fn apply<S: QueueSink>(manager: &mut QueueManager<S>, action: QueueAction) -> Res<()> {
    match action {
        QueueAction::Show => {
            if manager.is_empty() {
                info!("The queue is empty.");
            } else {
                let rows = utils::queue_rows(manager.tracks(), manager.current_index());
                println!("{}", Table::new(rows));
            }
            return Ok(());
        }
        QueueAction::Add(id) => manager.append(id),
        QueueAction::Insert(id) => manager.insert_next(id),
        QueueAction::Play(id) => manager.play(id),
        QueueAction::Position(position) => {
            manager.play_position(position)?;
        }
        QueueAction::Next => {
            manager.next();
        }
        QueueAction::Previous => {
            manager.previous()?;
        }
        QueueAction::Clear => {
            manager.clear();
            success!("Queue cleared.");
        }
    }

    manager.persist().await?;
    Ok(())
}
