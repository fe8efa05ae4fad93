//! Two-level message grouping: tool ID, then message-kind ID.
//!
//! Groups keep first-appearance order at both levels, and each group keeps
//! its messages in appearance order. Messages are referenced by their index
//! into the run's ordered message list.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::{Message, MessageKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindGroup {
    pub kind_id: u32,
    pub messages: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolGroup {
    pub tool_id: u32,
    /// Tool name of the first message seen with this ID.
    pub tool_name: String,
    pub kinds: Vec<KindGroup>,
}

impl ToolGroup {
    pub fn kind(&self, kind_id: u32) -> Option<&KindGroup> {
        self.kinds.iter().find(|k| k.kind_id == kind_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageIndex {
    tools: Vec<ToolGroup>,
    #[serde(skip)]
    positions: HashMap<MessageKind, (usize, usize)>,
}

impl MessageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message`, stored at position `index` of the run's message list.
    pub fn insert(&mut self, index: usize, message: &Message) {
        let kind = message.kind();
        if let Some(&(t, k)) = self.positions.get(&kind) {
            self.tools[t].kinds[k].messages.push(index);
            return;
        }

        let t = match self.tools.iter().position(|g| g.tool_id == kind.tool_id) {
            Some(t) => t,
            None => {
                self.tools.push(ToolGroup {
                    tool_id: kind.tool_id,
                    tool_name: message.tool_name.clone(),
                    kinds: Vec::new(),
                });
                self.tools.len() - 1
            }
        };
        let group = &mut self.tools[t];
        group.kinds.push(KindGroup {
            kind_id: kind.kind_id,
            messages: vec![index],
        });
        self.positions.insert(kind, (t, group.kinds.len() - 1));
    }

    /// Tool groups in first-appearance order.
    pub fn tools(&self) -> &[ToolGroup] {
        &self.tools
    }

    pub fn tool(&self, tool_id: u32) -> Option<&ToolGroup> {
        self.tools.iter().find(|g| g.tool_id == tool_id)
    }

    /// Message indices of one kind; empty when the kind never occurred.
    pub fn get(&self, kind: MessageKind) -> &[usize] {
        self.positions
            .get(&kind)
            .map(|&(t, k)| self.tools[t].kinds[k].messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, kind: MessageKind) -> bool {
        self.positions.contains_key(&kind)
    }

    pub fn tool_name(&self, tool_id: u32) -> Option<&str> {
        self.tool(tool_id).map(|g| g.tool_name.as_str())
    }

    pub fn tool_id(&self, tool_name: &str) -> Option<u32> {
        self.tools
            .iter()
            .find(|g| g.tool_name == tool_name)
            .map(|g| g.tool_id)
    }
}
