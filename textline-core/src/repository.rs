//! Conversation Repository
//!
//! Unifies SMS and MMS rows from the two provider schemas into one ordered,
//! typed message stream, aggregates per-thread conversation summaries, and
//! performs the write side: send, ingest, delivery-status update, and
//! mark-read.
//!
//! ## Normalization Boundary
//!
//! Raw provider rows are decoded into total [`Message`] values in exactly
//! one place. Missing columns get defined defaults (zero ids, empty
//! strings, inbox/unread, current time) and MMS second-scale dates are
//! rescaled to milliseconds. Nothing downstream ever sees a missing-column
//! state.
//!
//! ## Newest-Row Selection
//!
//! The unified view's date sort is not strict across mixed SMS/MMS rows
//! (the raw MMS dates are second-scale). Conversation summaries therefore
//! pick the max-normalized-date row per thread after decoding instead of
//! trusting the first row seen in provider order.

use crate::contacts::ContactResolver;
use crate::error::Result;
use crate::model::{Attachment, Conversation, Message, MessageBox, MILLIS_THRESHOLD};
use crate::provider::{
    part_uri, MessageLocator, MessageRow, PartRow, TelephonyStore, ADDRESS_PLACEHOLDER,
};
use crate::transport::{DeliveryReport, MediaPart, MmsTransport, SmsTransport};
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Decode one raw provider row into a total message value.
///
/// MMS rows are recognized by a multipart content-type marker; their body
/// and attachments stay empty here and are filled from the parts relation.
fn decode_row(row: MessageRow) -> Message {
    let is_mms = row
        .ct_t
        .as_deref()
        .is_some_and(|ct| ct.contains("multipart"));

    let mut date = row.date.unwrap_or_else(now_millis);
    if is_mms && date < MILLIS_THRESHOLD {
        date *= 1000;
    }

    Message {
        id: row.id.unwrap_or(0),
        thread_id: row.thread_id.unwrap_or(0),
        address: row.address.unwrap_or_default(),
        body: row.body.unwrap_or_default(),
        date,
        box_type: MessageBox::from_code(row.msg_type.unwrap_or(1)),
        read: row.read.unwrap_or(0) != 0,
        is_mms,
        attachments: Vec::new(),
    }
}

/// Split the parts relation into the text body and the attachment list.
///
/// A `text/plain` part supplies the body (last one wins). Every other part
/// becomes an attachment unless its content type carries the presentation
/// marker `smil`. File names come from the name column, falling back to
/// content-location.
fn extract_parts(parts: &[PartRow]) -> (String, Vec<Attachment>) {
    let mut body = String::new();
    let mut attachments = Vec::new();

    for part in parts {
        let Some(content_type) = part.ct.as_deref() else {
            continue;
        };
        if content_type == "text/plain" {
            body = part.text.clone().unwrap_or_default();
        } else if !content_type.to_ascii_lowercase().contains("smil") {
            attachments.push(Attachment {
                uri: part_uri(part.id.unwrap_or(0)),
                content_type: content_type.to_string(),
                file_name: part.name.clone().or_else(|| part.cl.clone()),
                file_size: part.size,
            });
        }
    }

    (body, attachments)
}

#[derive(Default)]
struct ThreadAccum {
    newest: Option<Message>,
    unread: usize,
}

/// Read/write access to the unified message store.
pub struct MessageRepository {
    store: Arc<dyn TelephonyStore>,
    resolver: Arc<ContactResolver>,
    sms: Arc<dyn SmsTransport>,
    mms: Arc<dyn MmsTransport>,
}

impl MessageRepository {
    pub fn new(
        store: Arc<dyn TelephonyStore>,
        resolver: Arc<ContactResolver>,
        sms: Arc<dyn SmsTransport>,
        mms: Arc<dyn MmsTransport>,
    ) -> Self {
        Self { store, resolver, sms, mms }
    }

    /// The contact resolver backing conversation summaries.
    pub fn resolver(&self) -> &Arc<ContactResolver> {
        &self.resolver
    }

    /// All conversations, newest first.
    ///
    /// Exactly one summary per distinct thread id present in the provider.
    /// `unread_count` is the thread's count of unread inbound rows.
    pub async fn get_all_conversations(&self) -> Result<Vec<Conversation>> {
        let rows = self.store.conversation_rows().await?;
        debug!("Aggregating {} unified-view rows", rows.len());

        let mut order: Vec<i64> = Vec::new();
        let mut threads: HashMap<i64, ThreadAccum> = HashMap::new();

        for row in rows {
            let message = decode_row(row);
            let accum = threads.entry(message.thread_id).or_insert_with(|| {
                order.push(message.thread_id);
                ThreadAccum::default()
            });
            if message.is_inbound() && !message.read {
                accum.unread += 1;
            }
            let newer = accum
                .newest
                .as_ref()
                .map_or(true, |current| message.date > current.date);
            if newer {
                accum.newest = Some(message);
            }
        }

        let mut conversations = Vec::with_capacity(order.len());
        for thread_id in order {
            let accum = threads.remove(&thread_id).unwrap_or_default();
            let Some(mut newest) = accum.newest else {
                continue;
            };
            if newest.is_mms {
                self.enrich_mms(&mut newest).await?;
            }
            let contact = self.resolver.resolve(&newest.address).await?;
            conversations.push(Conversation {
                thread_id,
                address: newest.address,
                contact_name: contact.name,
                contact_lookup_uri: contact.lookup_uri,
                photo_uri: contact.photo_uri,
                last_message: newest.body,
                last_message_date: newest.date,
                unread_count: accum.unread,
            });
        }

        // Stable sort: ties keep first-seen provider order.
        conversations.sort_by(|a, b| b.last_message_date.cmp(&a.last_message_date));
        info!("Loaded {} conversations", conversations.len());
        Ok(conversations)
    }

    /// All messages of one thread, oldest first.
    pub async fn get_messages_for_thread(&self, thread_id: i64) -> Result<Vec<Message>> {
        let rows = self.store.thread_rows(thread_id).await?;
        debug!("Thread {} has {} rows", thread_id, rows.len());

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let mut message = decode_row(row);
            if message.is_mms {
                self.enrich_mms(&mut message).await?;
            }
            messages.push(message);
        }
        messages.sort_by_key(|m| m.date);
        Ok(messages)
    }

    /// Fill an MMS message's body and attachments from the parts relation,
    /// and resolve its address from the address relation when the row's
    /// own column is blank or holds the placeholder sentinel.
    async fn enrich_mms(&self, message: &mut Message) -> Result<()> {
        let parts = self.store.message_parts(message.id).await?;
        let (body, attachments) = extract_parts(&parts);
        message.body = body;
        message.attachments = attachments;

        if message.address.is_empty() || message.address == ADDRESS_PLACEHOLDER {
            message.address = self
                .store
                .message_address(message.id)
                .await?
                .unwrap_or_default();
        }
        Ok(())
    }

    /// Send a text message.
    ///
    /// Inserts an outbox row first so the message is visible in its
    /// sending state, then hands the transport the row's locator as the
    /// delivery receipt. A transport failure is returned to the caller;
    /// the outbox row is left for the caller to surface or clean up.
    pub async fn send_message(&self, address: &str, body: &str) -> Result<MessageLocator> {
        let locator = self
            .store
            .insert_outbox(address, body, now_millis())
            .await?;
        self.sms.send_text(address, body, locator.clone()).await?;
        info!("Text handed to transport for {} as {}", address, locator);
        Ok(locator)
    }

    /// Send a multipart message.
    ///
    /// Attachment bytes are read through the part store; an unreadable
    /// attachment is logged and dropped while the rest of the send
    /// proceeds. A transport failure is returned to the caller, same as
    /// for plain texts.
    pub async fn send_mms(&self, address: &str, body: &str, attachments: &[Attachment]) -> Result<()> {
        let mut media = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            match self.store.read_part(&attachment.uri).await {
                Ok(data) => media.push(MediaPart {
                    data,
                    content_type: attachment.content_type.clone(),
                }),
                Err(e) => warn!("Dropping unreadable attachment {}: {}", attachment.uri, e),
            }
        }

        self.mms.send_multipart(address, body, media).await?;
        info!("Multipart handed to transport for {}", address);
        Ok(())
    }

    /// Apply an asynchronous delivery outcome to its outbox row.
    pub async fn apply_delivery_report(&self, report: DeliveryReport) -> Result<()> {
        let to = if report.is_ok() { MessageBox::Sent } else { MessageBox::Failed };
        let matched = self.store.set_message_box(&report.receipt, to).await?;
        if matched {
            debug!("Row {} moved to {:?}", report.receipt, to);
        } else {
            debug!("Delivery report for unknown row {}", report.receipt);
        }
        Ok(())
    }

    /// Mark every unread row of a thread read. Returns rows updated;
    /// idempotent, a second call updates zero rows.
    pub async fn mark_as_read(&self, thread_id: i64) -> Result<usize> {
        let updated = self.store.mark_thread_read(thread_id).await?;
        debug!("Marked {} rows read in thread {}", updated, thread_id);
        Ok(updated)
    }

    /// Ingest a received text: insert an unread inbox row and return its
    /// locator together with the thread it landed in.
    pub async fn receive_message(&self, address: &str, body: &str, date: i64) -> Result<(MessageLocator, i64)> {
        let locator = self.store.insert_inbox(address, body, date).await?;
        let thread_id = self.store.thread_id_for_address(address).await?;
        info!("Ingested inbound text from {} into thread {}", address, thread_id);
        Ok((locator, thread_id))
    }

    /// Thread id for an address, creating a thread if none exists yet.
    pub async fn thread_id_for_address(&self, address: &str) -> Result<i64> {
        self.store.thread_id_for_address(address).await
    }

    /// Copy an attachment's bytes to a file in `dir`.
    ///
    /// The file name comes from the attachment, with a timestamped
    /// fallback, and gains an extension derived from the MIME type when it
    /// does not already carry one.
    pub async fn save_attachment(&self, attachment: &Attachment, dir: &Path) -> Result<PathBuf> {
        let bytes = self.store.read_part(&attachment.uri).await?;

        let base = attachment
            .file_name
            .clone()
            .unwrap_or_else(|| format!("mms_attachment_{}", now_millis()));
        let file_name = match extension_for_mime(&attachment.content_type) {
            Some(ext) if !base.ends_with(&format!(".{ext}")) => format!("{base}.{ext}"),
            _ => base,
        };

        let path = dir.join(file_name);
        tokio::fs::write(&path, &bytes).await?;
        info!("Saved attachment {} to {}", attachment.uri, path.display());
        Ok(path)
    }
}

/// File extension for the MIME types MMS attachments commonly carry.
fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "video/mp4" => Some("mp4"),
        "video/3gpp" => Some("3gp"),
        "audio/mpeg" => Some("mp3"),
        "audio/amr" => Some("amr"),
        "audio/ogg" => Some("ogg"),
        "text/x-vcard" => Some("vcf"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::provider::memory::{ContactRecord, MemoryStore, MmsRecord, PartRecord, SmsRecord};
    use crate::transport::{LoopbackTransport, RESULT_OK};
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct FailingTransport;

    #[async_trait]
    impl SmsTransport for FailingTransport {
        async fn send_text(&self, _: &str, _: &str, _: MessageLocator) -> Result<()> {
            Err(ClientError::Transport("radio unavailable".into()))
        }
    }

    #[async_trait]
    impl MmsTransport for FailingTransport {
        async fn send_multipart(&self, _: &str, _: &str, _: Vec<MediaPart>) -> Result<()> {
            Err(ClientError::Transport("transaction rejected".into()))
        }
    }

    fn repo_over(store: Arc<MemoryStore>) -> (MessageRepository, Arc<LoopbackTransport>, mpsc::UnboundedReceiver<DeliveryReport>) {
        let (transport, reports) = LoopbackTransport::new();
        let transport = Arc::new(transport);
        let resolver = Arc::new(ContactResolver::new(store.clone()));
        let repo = MessageRepository::new(store, resolver, transport.clone(), transport.clone());
        (repo, transport, reports)
    }

    /// Thread 1: an older SMS (millisecond date) plus a newer MMS whose
    /// raw date is second-scale, so raw provider order puts the SMS first.
    /// Thread 2: one unread inbound SMS.
    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_raw_sms(SmsRecord {
                id: 1,
                thread_id: 1,
                address: "+15550001".into(),
                body: "older text".into(),
                date: 1_600_000_000_000,
                msg_type: 1,
                read: 0,
            })
            .await;
        store
            .insert_raw_mms(
                MmsRecord {
                    id: 100,
                    thread_id: 1,
                    date: 1_600_000_100, // seconds; newer once normalized
                    msg_box: 1,
                    read: 0,
                    ct_t: "application/vnd.wap.multipart.related".into(),
                },
                vec![
                    PartRecord {
                        id: 7,
                        mid: 100,
                        ct: "application/smil".into(),
                        text: Some("<smil/>".into()),
                        ..Default::default()
                    },
                    PartRecord {
                        id: 8,
                        mid: 100,
                        ct: "text/plain".into(),
                        text: Some("picture attached".into()),
                        ..Default::default()
                    },
                    PartRecord {
                        id: 9,
                        mid: 100,
                        ct: "image/jpeg".into(),
                        cl: Some("photo.jpg".into()),
                        size: Some(3),
                        data: Some(vec![1, 2, 3]),
                        ..Default::default()
                    },
                ],
                Some("+15550001".into()),
            )
            .await;
        store
            .insert_raw_sms(SmsRecord {
                id: 2,
                thread_id: 2,
                address: "+15550002".into(),
                body: "hello there".into(),
                date: 1_600_000_050_000,
                msg_type: 1,
                read: 0,
            })
            .await;
        store
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_results() {
        let (repo, _, _) = repo_over(Arc::new(MemoryStore::new()));
        assert!(repo.get_all_conversations().await.unwrap().is_empty());
        assert!(repo.get_messages_for_thread(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_conversation_per_thread_newest_first() {
        let (repo, _, _) = repo_over(seeded_store().await);
        let conversations = repo.get_all_conversations().await.unwrap();

        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].thread_id, 1);
        assert_eq!(conversations[1].thread_id, 2);
        assert!(conversations[0].last_message_date > conversations[1].last_message_date);
    }

    #[tokio::test]
    async fn test_newest_selection_survives_raw_sort_order() {
        // Raw order puts the millisecond SMS above the second-scale MMS;
        // the summary must still come from the MMS once normalized.
        let (repo, _, _) = repo_over(seeded_store().await);
        let conversations = repo.get_all_conversations().await.unwrap();

        let thread1 = &conversations[0];
        assert_eq!(thread1.last_message, "picture attached");
        assert_eq!(thread1.last_message_date, 1_600_000_100_000);
        assert_eq!(thread1.address, "+15550001");
    }

    #[tokio::test]
    async fn test_unread_counts_inbound_unread_rows() {
        let (repo, _, _) = repo_over(seeded_store().await);
        let conversations = repo.get_all_conversations().await.unwrap();

        assert_eq!(conversations[0].unread_count, 2); // SMS + MMS, both inbox unread
        assert_eq!(conversations[1].unread_count, 1);
    }

    #[tokio::test]
    async fn test_conversation_carries_contact_info() {
        let store = seeded_store().await;
        store
            .insert_contact(ContactRecord {
                id: 5,
                display_name: "Ada Lovelace".into(),
                lookup_key: "ada".into(),
                phone_number: "+15550001".into(),
                photo_thumbnail_uri: None,
            })
            .await;
        let (repo, _, _) = repo_over(store);

        let conversations = repo.get_all_conversations().await.unwrap();
        assert_eq!(conversations[0].contact_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(
            conversations[0].contact_lookup_uri.as_deref(),
            Some("content://contacts/lookup/ada/5")
        );
        assert!(conversations[1].contact_name.is_none());
    }

    #[tokio::test]
    async fn test_thread_messages_ascending_and_enriched() {
        let (repo, _, _) = repo_over(seeded_store().await);
        let messages = repo.get_messages_for_thread(1).await.unwrap();

        assert_eq!(messages.len(), 2);
        assert!(messages[0].date <= messages[1].date);

        let mms = &messages[1];
        assert!(mms.is_mms);
        assert_eq!(mms.body, "picture attached");
        assert_eq!(mms.address, "+15550001"); // from the address relation
        assert_eq!(mms.attachments.len(), 1); // smil part excluded
        assert_eq!(mms.attachments[0].content_type, "image/jpeg");
        assert_eq!(mms.attachments[0].file_name.as_deref(), Some("photo.jpg"));
        assert_eq!(mms.attachments[0].file_size, Some(3));
    }

    #[tokio::test]
    async fn test_mms_date_normalized_to_milliseconds() {
        let row = MessageRow {
            date: Some(1_600_000_000),
            ct_t: Some("application/vnd.wap.multipart.mixed".into()),
            ..Default::default()
        };
        assert_eq!(decode_row(row).date, 1_600_000_000_000);

        // An SMS row with the same raw value is left alone.
        let row = MessageRow { date: Some(1_600_000_000), ..Default::default() };
        assert_eq!(decode_row(row).date, 1_600_000_000);

        // Already millisecond-scale MMS dates are left alone too.
        let row = MessageRow {
            date: Some(1_700_000_000_000),
            ct_t: Some("application/vnd.wap.multipart.related".into()),
            ..Default::default()
        };
        assert_eq!(decode_row(row).date, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_missing_columns_default_closed() {
        let message = decode_row(MessageRow::default());
        assert_eq!(message.id, 0);
        assert_eq!(message.thread_id, 0);
        assert_eq!(message.address, "");
        assert_eq!(message.body, "");
        assert_eq!(message.box_type, MessageBox::Inbox);
        assert!(!message.read);
        assert!(message.date > 0);
    }

    #[tokio::test]
    async fn test_send_message_inserts_outbox_then_transport() {
        let store = Arc::new(MemoryStore::new());
        let (repo, transport, mut reports) = repo_over(store.clone());

        let locator = repo.send_message("+15550009", "on my way").await.unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "on my way");

        let snapshot = store.snapshot().await;
        let row = snapshot.sms.iter().find(|r| r.id == locator.row_id).unwrap();
        assert_eq!(row.msg_type, MessageBox::Outbox.code());
        assert_eq!(row.read, 1);

        let report = reports.recv().await.unwrap();
        assert_eq!(report.receipt, locator);
        assert_eq!(report.code, RESULT_OK);
    }

    #[tokio::test]
    async fn test_delivery_report_moves_row() {
        let store = Arc::new(MemoryStore::new());
        let (repo, _, mut reports) = repo_over(store.clone());

        let locator = repo.send_message("+15550009", "ping").await.unwrap();
        let report = reports.recv().await.unwrap();
        repo.apply_delivery_report(report).await.unwrap();

        let snapshot = store.snapshot().await;
        let row = snapshot.sms.iter().find(|r| r.id == locator.row_id).unwrap();
        assert_eq!(row.msg_type, MessageBox::Sent.code());
    }

    #[tokio::test]
    async fn test_failed_delivery_report_marks_failed() {
        let store = Arc::new(MemoryStore::new());
        let (repo, _, _) = repo_over(store.clone());

        let locator = repo.send_message("+15550009", "ping").await.unwrap();
        repo.apply_delivery_report(DeliveryReport::failed(locator.clone(), 1))
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        let row = snapshot.sms.iter().find(|r| r.id == locator.row_id).unwrap();
        assert_eq!(row.msg_type, MessageBox::Failed.code());
    }

    #[tokio::test]
    async fn test_delivery_report_for_unknown_row_is_not_an_error() {
        let (repo, _, _) = repo_over(Arc::new(MemoryStore::new()));
        repo.apply_delivery_report(DeliveryReport::ok(MessageLocator::sms(404)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_failure_propagates_and_row_stays_outbox() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(ContactResolver::new(store.clone()));
        let failing = Arc::new(FailingTransport);
        let repo = MessageRepository::new(store.clone(), resolver, failing.clone(), failing);

        let err = repo.send_message("+15550009", "ping").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.sms.len(), 1);
        assert_eq!(snapshot.sms[0].msg_type, MessageBox::Outbox.code());
    }

    #[tokio::test]
    async fn test_send_mms_drops_unreadable_attachment() {
        let store = seeded_store().await;
        let (repo, transport, _) = repo_over(store);

        let attachments = vec![
            Attachment {
                uri: part_uri(9),
                content_type: "image/jpeg".into(),
                file_name: Some("photo.jpg".into()),
                file_size: Some(3),
            },
            Attachment {
                uri: part_uri(404),
                content_type: "image/png".into(),
                file_name: None,
                file_size: None,
            },
        ];
        repo.send_mms("+15550001", "look", &attachments).await.unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].media.len(), 1);
        assert_eq!(sent[0].media[0].data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_send_mms_transport_failure_is_surfaced() {
        let store = Arc::new(MemoryStore::new());
        let resolver = Arc::new(ContactResolver::new(store.clone()));
        let failing = Arc::new(FailingTransport);
        let repo = MessageRepository::new(store, resolver, failing.clone(), failing);

        let err = repo.send_mms("+15550009", "look", &[]).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_mark_as_read_is_idempotent() {
        let (repo, _, _) = repo_over(seeded_store().await);

        assert_eq!(repo.mark_as_read(1).await.unwrap(), 2);
        let conversations = repo.get_all_conversations().await.unwrap();
        assert_eq!(conversations[0].unread_count, 0);

        assert_eq!(repo.mark_as_read(1).await.unwrap(), 0);
        let conversations = repo.get_all_conversations().await.unwrap();
        assert_eq!(conversations[0].unread_count, 0);
    }

    #[tokio::test]
    async fn test_receive_message_lands_unread_in_its_thread() {
        let store = Arc::new(MemoryStore::new());
        let (repo, _, _) = repo_over(store.clone());

        let (locator, thread_id) = repo
            .receive_message("+15550003", "incoming", 1_700_000_000_000)
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        let row = snapshot.sms.iter().find(|r| r.id == locator.row_id).unwrap();
        assert_eq!(row.thread_id, thread_id);
        assert_eq!(row.read, 0);
        assert_eq!(row.msg_type, MessageBox::Inbox.code());

        let conversations = repo.get_all_conversations().await.unwrap();
        assert_eq!(conversations[0].unread_count, 1);
    }

    #[tokio::test]
    async fn test_save_attachment_writes_bytes_with_extension() {
        let store = seeded_store().await;
        let (repo, _, _) = repo_over(store);
        let dir = tempfile::tempdir().unwrap();

        let attachment = Attachment {
            uri: part_uri(9),
            content_type: "image/jpeg".into(),
            file_name: Some("photo".into()),
            file_size: Some(3),
        };
        let path = repo.save_attachment(&attachment, dir.path()).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "photo.jpg");
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
