//! Message Grouper
//!
//! Clusters an ordered message list into visually grouped bubbles: runs of
//! consecutive messages from the same side, broken whenever the gap to a
//! neighbor reaches five minutes. The cluster position drives bubble
//! corner-rounding and the timestamp is shown only on the last bubble of a
//! cluster.
//!
//! The function is pure and deterministic: same input, same output, no
//! side effects, so callers may memoize by input identity.

use crate::model::Message;
use serde::{Deserialize, Serialize};

/// Neighbor gap at or beyond this splits a cluster.
pub const CLUSTER_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Where a message sits within its visual cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubblePosition {
    /// First of a multi-message cluster
    Start,
    /// Interior of a cluster
    Middle,
    /// Last of a multi-message cluster
    End,
    /// A cluster of one
    Single,
}

/// One message with its rendering decisions attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedMessage {
    pub message: Message,
    pub position: BubblePosition,
    /// Timestamp is rendered only under the last bubble of a cluster
    pub show_timestamp: bool,
}

/// Group an ordered message list for rendering.
///
/// Output is the same length and order as the input. Two neighbors belong
/// to the same cluster when they sit on the same side (both outgoing or
/// both not) and their date delta is strictly less than
/// [`CLUSTER_WINDOW_MS`] in magnitude, so an out-of-order input still
/// groups by actual closeness.
pub fn group_messages(messages: &[Message]) -> Vec<GroupedMessage> {
    let mut grouped = Vec::with_capacity(messages.len());

    for (i, current) in messages.iter().enumerate() {
        let prev = if i > 0 { messages.get(i - 1) } else { None };
        let next = messages.get(i + 1);

        let joins_prev = prev.is_some_and(|p| {
            p.box_type.is_outgoing() == current.box_type.is_outgoing()
                && (current.date - p.date).abs() < CLUSTER_WINDOW_MS
        });
        let joins_next = next.is_some_and(|n| {
            n.box_type.is_outgoing() == current.box_type.is_outgoing()
                && (n.date - current.date).abs() < CLUSTER_WINDOW_MS
        });

        let position = match (joins_prev, joins_next) {
            (false, false) => BubblePosition::Single,
            (false, true) => BubblePosition::Start,
            (true, false) => BubblePosition::End,
            (true, true) => BubblePosition::Middle,
        };

        grouped.push(GroupedMessage {
            message: current.clone(),
            position,
            show_timestamp: !joins_next,
        });
    }

    grouped
}
