//! In-Memory Provider
//!
//! A tagged-table implementation of [`TelephonyStore`] and [`ContactStore`]
//! mirroring the platform schema: an SMS table, an MMS table (dates in
//! seconds, as the real one stores them), the MMS parts and address
//! relations, and a contacts table. Every write publishes on the change
//! notifier, so the full notification → reload loop runs in-process.
//!
//! Used as the repository test double and as the backing store for the
//! snapshot-inspection CLI. Table records (de)serialize as a
//! [`StoreSnapshot`] provider dump.

use super::{part_uri, ContactRow, ContactStore, MessageLocator, MessageRow, PartRow, TelephonyStore};
use crate::contacts::normalize_number;
use crate::error::{ClientError, Result};
use crate::model::MessageBox;
use crate::notify::{ChangeNotifier, ChangeTopic};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// One SMS table row. Dates are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    pub thread_id: i64,
    pub address: String,
    pub body: String,
    pub date: i64,
    #[serde(rename = "type")]
    pub msg_type: i32,
    pub read: i32,
}

/// One MMS table row. Dates are epoch **seconds**, like the provider's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MmsRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    pub thread_id: i64,
    pub date: i64,
    pub msg_box: i32,
    pub read: i32,
    pub ct_t: String,
}

/// One MMS parts-relation row, optionally carrying its blob inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    /// Owning MMS row id
    pub mid: i64,
    pub ct: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub cl: Option<String>,
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

/// One MMS address-relation row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddrRecord {
    pub msg_id: i64,
    pub address: String,
}

/// One contacts table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    pub display_name: String,
    pub lookup_key: String,
    pub phone_number: String,
    pub photo_thumbnail_uri: Option<String>,
}

/// Serializable dump of every table, the CLI's input format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub sms: Vec<SmsRecord>,
    #[serde(default)]
    pub mms: Vec<MmsRecord>,
    #[serde(default)]
    pub parts: Vec<PartRecord>,
    #[serde(default)]
    pub addrs: Vec<AddrRecord>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
}

#[derive(Debug)]
struct Tables {
    sms: Vec<SmsRecord>,
    mms: Vec<MmsRecord>,
    parts: Vec<PartRecord>,
    addrs: Vec<AddrRecord>,
    contacts: Vec<ContactRecord>,
    /// address → thread id, the platform's thread-resolution table
    threads: HashMap<String, i64>,
    next_sms_id: i64,
    next_thread_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            sms: Vec::new(),
            mms: Vec::new(),
            parts: Vec::new(),
            addrs: Vec::new(),
            contacts: Vec::new(),
            threads: HashMap::new(),
            next_sms_id: 1,
            next_thread_id: 1,
        }
    }
}

impl Tables {
    fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut threads = HashMap::new();
        let mut next_thread_id = 1;
        let mut next_sms_id = 1;
        for row in &snapshot.sms {
            threads
                .entry(normalize_number(&row.address))
                .or_insert(row.thread_id);
            next_thread_id = next_thread_id.max(row.thread_id + 1);
            next_sms_id = next_sms_id.max(row.id + 1);
        }
        for row in &snapshot.mms {
            next_thread_id = next_thread_id.max(row.thread_id + 1);
        }
        // MMS correspondents only appear in the address relation; without
        // this an address seen purely via MMS would get a fresh thread.
        for addr in &snapshot.addrs {
            if let Some(row) = snapshot.mms.iter().find(|m| m.id == addr.msg_id) {
                threads
                    .entry(normalize_number(&addr.address))
                    .or_insert(row.thread_id);
            }
        }
        Self {
            sms: snapshot.sms,
            mms: snapshot.mms,
            parts: snapshot.parts,
            addrs: snapshot.addrs,
            contacts: snapshot.contacts,
            threads,
            next_sms_id,
            next_thread_id,
        }
    }

    fn thread_for(&mut self, address: &str) -> i64 {
        let key = normalize_number(address);
        if let Some(id) = self.threads.get(&key) {
            return *id;
        }
        let id = self.next_thread_id;
        self.next_thread_id += 1;
        self.threads.insert(key, id);
        id
    }

    fn insert_sms(&mut self, address: &str, body: &str, date: i64, to: MessageBox, read: i32) -> MessageLocator {
        let id = self.next_sms_id;
        self.next_sms_id += 1;
        let thread_id = self.thread_for(address);
        self.sms.push(SmsRecord {
            id,
            thread_id,
            address: address.to_string(),
            body: body.to_string(),
            date,
            msg_type: to.code(),
            read,
        });
        MessageLocator::sms(id)
    }
}

fn sms_to_row(record: &SmsRecord) -> MessageRow {
    MessageRow {
        id: Some(record.id),
        thread_id: Some(record.thread_id),
        address: Some(record.address.clone()),
        body: Some(record.body.clone()),
        date: Some(record.date),
        msg_type: Some(record.msg_type),
        read: Some(record.read),
        ct_t: None,
    }
}

fn mms_to_row(record: &MmsRecord) -> MessageRow {
    // The unified view leaves the MMS address and body blank; both come
    // from the part/address relations.
    MessageRow {
        id: Some(record.id),
        thread_id: Some(record.thread_id),
        address: None,
        body: None,
        date: Some(record.date),
        msg_type: Some(record.msg_box),
        read: Some(record.read),
        ct_t: Some(record.ct_t.clone()),
    }
}

/// In-memory telephony and contacts provider.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    notifier: ChangeNotifier,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Build a store from a table dump.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            tables: RwLock::new(Tables::from_snapshot(snapshot)),
            notifier: ChangeNotifier::new(),
        }
    }

    /// The notifier this store publishes provider changes on.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Dump every table.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let tables = self.tables.read().await;
        StoreSnapshot {
            sms: tables.sms.clone(),
            mms: tables.mms.clone(),
            parts: tables.parts.clone(),
            addrs: tables.addrs.clone(),
            contacts: tables.contacts.clone(),
        }
    }

    /// Seed one SMS row verbatim (test/CLI helper). Publishes a change.
    pub async fn insert_raw_sms(&self, record: SmsRecord) {
        {
            let mut tables = self.tables.write().await;
            tables.next_sms_id = tables.next_sms_id.max(record.id + 1);
            tables.next_thread_id = tables.next_thread_id.max(record.thread_id + 1);
            tables
                .threads
                .entry(normalize_number(&record.address))
                .or_insert(record.thread_id);
            tables.sms.push(record);
        }
        self.notifier.publish(ChangeTopic::Messages);
    }

    /// Seed one MMS row with its parts and address relation (test/CLI
    /// helper). Publishes a change per provider write, like the platform
    /// does when a multi-part MMS lands.
    pub async fn insert_raw_mms(&self, record: MmsRecord, parts: Vec<PartRecord>, address: Option<String>) {
        {
            let mut tables = self.tables.write().await;
            tables.next_thread_id = tables.next_thread_id.max(record.thread_id + 1);
            if let Some(addr) = address {
                tables
                    .threads
                    .entry(normalize_number(&addr))
                    .or_insert(record.thread_id);
                tables.addrs.push(AddrRecord { msg_id: record.id, address: addr });
            }
            for part in &parts {
                tables.parts.push(part.clone());
            }
            let part_count = parts.len();
            tables.mms.push(record);
            debug!("Seeded MMS row with {} parts", part_count);
        }
        self.notifier.publish(ChangeTopic::Messages);
    }

    /// Seed one contact (test/CLI helper). Publishes a contacts change.
    pub async fn insert_contact(&self, record: ContactRecord) {
        self.tables.write().await.contacts.push(record);
        self.notifier.publish(ChangeTopic::Contacts);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelephonyStore for MemoryStore {
    async fn conversation_rows(&self) -> Result<Vec<MessageRow>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<MessageRow> = tables
            .sms
            .iter()
            .map(sms_to_row)
            .chain(tables.mms.iter().map(mms_to_row))
            .collect();
        // Raw-date descending, exactly as fragile as the real unified view:
        // second-scale MMS dates sort below millisecond-scale SMS dates.
        rows.sort_by(|a, b| b.date.unwrap_or(0).cmp(&a.date.unwrap_or(0)));
        Ok(rows)
    }

    async fn thread_rows(&self, thread_id: i64) -> Result<Vec<MessageRow>> {
        let tables = self.tables.read().await;
        let rows = tables
            .sms
            .iter()
            .filter(|r| r.thread_id == thread_id)
            .map(sms_to_row)
            .chain(
                tables
                    .mms
                    .iter()
                    .filter(|r| r.thread_id == thread_id)
                    .map(mms_to_row),
            )
            .collect();
        Ok(rows)
    }

    async fn message_parts(&self, message_id: i64) -> Result<Vec<PartRow>> {
        let tables = self.tables.read().await;
        let rows = tables
            .parts
            .iter()
            .filter(|p| p.mid == message_id)
            .map(|p| PartRow {
                id: Some(p.id),
                ct: Some(p.ct.clone()),
                text: p.text.clone(),
                name: p.name.clone(),
                cl: p.cl.clone(),
                size: p.size,
            })
            .collect();
        Ok(rows)
    }

    async fn message_address(&self, message_id: i64) -> Result<Option<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .addrs
            .iter()
            .find(|a| a.msg_id == message_id)
            .map(|a| a.address.clone()))
    }

    async fn read_part(&self, uri: &str) -> Result<Vec<u8>> {
        let tables = self.tables.read().await;
        let part = tables
            .parts
            .iter()
            .find(|p| part_uri(p.id) == uri)
            .ok_or_else(|| ClientError::PartNotFound(uri.to_string()))?;
        if let Some(data) = &part.data {
            return Ok(data.clone());
        }
        Ok(part.text.as_deref().unwrap_or_default().as_bytes().to_vec())
    }

    async fn insert_outbox(&self, address: &str, body: &str, date: i64) -> Result<MessageLocator> {
        let locator = {
            let mut tables = self.tables.write().await;
            tables.insert_sms(address, body, date, MessageBox::Outbox, 1)
        };
        debug!("Inserted outbox row {}", locator);
        self.notifier.publish(ChangeTopic::Messages);
        Ok(locator)
    }

    async fn insert_inbox(&self, address: &str, body: &str, date: i64) -> Result<MessageLocator> {
        let locator = {
            let mut tables = self.tables.write().await;
            tables.insert_sms(address, body, date, MessageBox::Inbox, 0)
        };
        debug!("Inserted inbox row {}", locator);
        self.notifier.publish(ChangeTopic::Messages);
        Ok(locator)
    }

    async fn set_message_box(&self, locator: &MessageLocator, to: MessageBox) -> Result<bool> {
        let matched = {
            let mut tables = self.tables.write().await;
            match locator.source {
                super::MessageSource::Sms => tables
                    .sms
                    .iter_mut()
                    .find(|r| r.id == locator.row_id)
                    .map(|r| r.msg_type = to.code())
                    .is_some(),
                super::MessageSource::Mms => tables
                    .mms
                    .iter_mut()
                    .find(|r| r.id == locator.row_id)
                    .map(|r| r.msg_box = to.code())
                    .is_some(),
            }
        };
        if matched {
            self.notifier.publish(ChangeTopic::Messages);
        }
        Ok(matched)
    }

    async fn mark_thread_read(&self, thread_id: i64) -> Result<usize> {
        let updated = {
            let mut tables = self.tables.write().await;
            let mut updated = 0;
            for row in tables.sms.iter_mut().filter(|r| r.thread_id == thread_id && r.read == 0) {
                row.read = 1;
                updated += 1;
            }
            for row in tables.mms.iter_mut().filter(|r| r.thread_id == thread_id && r.read == 0) {
                row.read = 1;
                updated += 1;
            }
            updated
        };
        if updated > 0 {
            self.notifier.publish(ChangeTopic::Messages);
        }
        Ok(updated)
    }

    async fn thread_id_for_address(&self, address: &str) -> Result<i64> {
        if address.trim().is_empty() {
            return Err(ClientError::ThreadResolution(address.to_string()));
        }
        let mut tables = self.tables.write().await;
        Ok(tables.thread_for(address))
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn lookup_by_number(&self, number: &str) -> Result<Option<ContactRow>> {
        let key = normalize_number(number);
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .iter()
            .find(|c| normalize_number(&c.phone_number) == key)
            .map(|c| ContactRow {
                display_name: Some(c.display_name.clone()),
                lookup_key: Some(c.lookup_key.clone()),
                id: Some(c.id),
                photo_thumbnail_uri: c.photo_thumbnail_uri.clone(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_one_thread_per_address() {
        let store = MemoryStore::new();
        let a = store.insert_outbox("+15550001", "hi", 1_000).await.unwrap();
        let b = store.insert_outbox("+15550001", "again", 2_000).await.unwrap();
        let c = store.insert_outbox("+15550002", "other", 3_000).await.unwrap();
        assert_ne!(a, b);

        let rows = store.conversation_rows().await.unwrap();
        let thread_of = |loc: &MessageLocator| {
            rows.iter()
                .find(|r| r.id == Some(loc.row_id))
                .and_then(|r| r.thread_id)
                .unwrap()
        };
        assert_eq!(thread_of(&a), thread_of(&b));
        assert_ne!(thread_of(&a), thread_of(&c));
    }

    #[tokio::test]
    async fn test_mark_thread_read_counts_rows() {
        let store = MemoryStore::new();
        store.insert_inbox("+15550001", "one", 1_000).await.unwrap();
        store.insert_inbox("+15550001", "two", 2_000).await.unwrap();
        let thread = store.thread_id_for_address("+15550001").await.unwrap();

        assert_eq!(store.mark_thread_read(thread).await.unwrap(), 2);
        assert_eq!(store.mark_thread_read(thread).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_message_box_reports_missing_row() {
        let store = MemoryStore::new();
        let matched = store
            .set_message_box(&MessageLocator::sms(999), MessageBox::Sent)
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_writes_publish_messages_topic() {
        let store = MemoryStore::new();
        let mut rx = store.notifier().subscribe();
        store.insert_inbox("+15550001", "hello", 1_000).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), ChangeTopic::Messages);
    }

    #[tokio::test]
    async fn test_read_part_missing_is_error() {
        let store = MemoryStore::new();
        let err = store.read_part("content://mms/part/404").await.unwrap_err();
        assert!(matches!(err, ClientError::PartNotFound(_)));
    }

    #[tokio::test]
    async fn test_mms_only_address_keeps_its_thread() {
        let store = MemoryStore::new();
        store
            .insert_raw_mms(
                MmsRecord {
                    id: 50,
                    thread_id: 9,
                    date: 1_600_000_000,
                    msg_box: 1,
                    read: 0,
                    ct_t: "application/vnd.wap.multipart.related".into(),
                },
                Vec::new(),
                Some("+15550007".into()),
            )
            .await;

        // A reply to a correspondent seen only via MMS must land in the
        // same thread, both on the live store and on a restored snapshot.
        assert_eq!(store.thread_id_for_address("+15550007").await.unwrap(), 9);

        let restored = MemoryStore::from_snapshot(store.snapshot().await);
        assert_eq!(restored.thread_id_for_address("+1 555 0007").await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let store = MemoryStore::new();
        store.insert_inbox("+15550001", "hello", 1_000).await.unwrap();
        store
            .insert_contact(ContactRecord {
                id: 1,
                display_name: "Ada".into(),
                lookup_key: "k1".into(),
                phone_number: "+15550001".into(),
                photo_thumbnail_uri: None,
            })
            .await;

        let snapshot = store.snapshot().await;
        let restored = MemoryStore::from_snapshot(snapshot);
        let rows = restored.conversation_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        let contact = restored.lookup_by_number("+1 555 0001").await.unwrap();
        assert_eq!(contact.unwrap().display_name.as_deref(), Some("Ada"));
    }
}
