//! Observable View State
//!
//! One state container owns the last-seen snapshot the interface renders:
//! the conversation list, the focused thread's messages, and a loading
//! flag, each behind a `watch` channel. Repository work runs on the
//! runtime's background workers; the interactive side only ever awaits a
//! watch update.
//!
//! A change listener subscribes to the provider notifier and reloads on
//! every notification: a message change reloads the conversation list and,
//! when a thread is focused, marks it read and reloads its messages; a
//! contacts change invalidates the contact cache and reloads the
//! conversation list. Reload failures keep the previous snapshot.

use crate::error::Result;
use crate::model::{Attachment, Conversation, Message};
use crate::notify::{ChangeNotifier, ChangeTopic};
use crate::provider::MessageLocator;
use crate::repository::MessageRepository;
use crate::transport::DeliveryReport;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Observable container for the message client's view state.
pub struct InboxState {
    repo: Arc<MessageRepository>,
    conversations_tx: watch::Sender<Vec<Conversation>>,
    messages_tx: watch::Sender<Vec<Message>>,
    loading_tx: watch::Sender<bool>,
    focused_thread: Mutex<Option<i64>>,
}

impl InboxState {
    pub fn new(repo: Arc<MessageRepository>) -> Arc<Self> {
        let (conversations_tx, _) = watch::channel(Vec::new());
        let (messages_tx, _) = watch::channel(Vec::new());
        let (loading_tx, _) = watch::channel(false);
        Arc::new(Self {
            repo,
            conversations_tx,
            messages_tx,
            loading_tx,
            focused_thread: Mutex::new(None),
        })
    }

    /// Latest conversation list, newest first.
    pub fn watch_conversations(&self) -> watch::Receiver<Vec<Conversation>> {
        self.conversations_tx.subscribe()
    }

    /// Messages of the focused thread, oldest first.
    pub fn watch_messages(&self) -> watch::Receiver<Vec<Message>> {
        self.messages_tx.subscribe()
    }

    /// Whether a reload is in flight.
    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Set or clear the focused thread. While a thread is focused, message
    /// changes mark it read and keep its message list fresh.
    pub async fn set_focused_thread(&self, thread_id: Option<i64>) {
        *self.focused_thread.lock().await = thread_id;
        debug!("Focused thread set to {:?}", thread_id);
    }

    /// Reload the conversation list. A failure logs and keeps the
    /// previous snapshot.
    pub async fn refresh_conversations(&self) {
        self.loading_tx.send_replace(true);
        match self.repo.get_all_conversations().await {
            Ok(conversations) => {
                self.conversations_tx.send_replace(conversations);
            }
            Err(e) => error!("Conversation reload failed: {}", e),
        }
        self.loading_tx.send_replace(false);
    }

    /// Reload one thread's messages.
    pub async fn refresh_messages(&self, thread_id: i64) {
        self.loading_tx.send_replace(true);
        match self.repo.get_messages_for_thread(thread_id).await {
            Ok(messages) => {
                self.messages_tx.send_replace(messages);
            }
            Err(e) => error!("Message reload for thread {} failed: {}", thread_id, e),
        }
        self.loading_tx.send_replace(false);
    }

    /// Mark a thread read and refresh the conversation list so unread
    /// badges update immediately.
    pub async fn mark_as_read(&self, thread_id: i64) -> Result<usize> {
        let updated = self.repo.mark_as_read(thread_id).await?;
        self.refresh_conversations().await;
        Ok(updated)
    }

    /// Send a plain text. Transport failures surface to the caller.
    pub async fn send_message(&self, address: &str, body: &str) -> Result<MessageLocator> {
        self.repo.send_message(address, body).await
    }

    /// Send with attachments when there are any, otherwise a plain text.
    pub async fn send_with_attachments(
        &self,
        address: &str,
        body: &str,
        attachments: &[Attachment],
    ) -> Result<()> {
        if attachments.is_empty() {
            self.repo.send_message(address, body).await?;
            Ok(())
        } else {
            self.repo.send_mms(address, body, attachments).await
        }
    }

    /// Subscribe to provider changes and keep the snapshots fresh until
    /// the notifier closes or the returned task is aborted.
    pub fn spawn_change_listener(self: &Arc<Self>, notifier: &ChangeNotifier) -> JoinHandle<()> {
        let state = Arc::clone(self);
        let mut rx = notifier.subscribe();
        tokio::spawn(async move {
            info!("Change listener started");
            loop {
                match rx.recv().await {
                    Ok(ChangeTopic::Messages) => {
                        state.refresh_conversations().await;
                        let focused = *state.focused_thread.lock().await;
                        if let Some(thread_id) = focused {
                            if let Err(e) = state.repo.mark_as_read(thread_id).await {
                                warn!("Mark-read for focused thread {} failed: {}", thread_id, e);
                            }
                            state.refresh_messages(thread_id).await;
                        }
                    }
                    Ok(ChangeTopic::Contacts) => {
                        state.repo.resolver().invalidate().await;
                        state.refresh_conversations().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Every notification triggers the same full reload,
                        // so missed ones are covered by the next received.
                        debug!("Change listener lagged by {} notifications", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            info!("Change listener stopped");
        })
    }
}

/// Route asynchronous delivery reports onto their outbox rows until the
/// transport side closes the channel.
pub fn spawn_delivery_router(
    repo: Arc<MessageRepository>,
    mut reports: mpsc::UnboundedReceiver<DeliveryReport>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(report) = reports.recv().await {
            if let Err(e) = repo.apply_delivery_report(report).await {
                warn!("Delivery report not applied: {}", e);
            }
        }
        debug!("Delivery router stopped");
    })
}
