use serde::Serialize;
use std::io::Write;
use taskboard_domain::{Card, CardId, FocusRef};

/// Receives redraw notifications after each command.
///
/// The controller calls `redraw_column` once per column that changed, in
/// ascending column order, then `set_focus` once.
pub trait RenderSink {
    fn redraw_column(&mut self, index: usize, name: &str, cards: &[&Card]);
    fn set_focus(&mut self, focus: Option<FocusRef>);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    RedrawColumn {
        column: usize,
        name: String,
        cards: Vec<Card>,
    },
    Focus {
        focus: Option<FocusRef>,
    },
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<RenderEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last focus that was set, if any.
    pub fn last_focus(&self) -> Option<FocusRef> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::Focus { focus } => Some(*focus),
            RenderEvent::RedrawColumn { .. } => None,
        })?
    }

    /// Indices of redrawn columns, in notification order.
    pub fn redrawn_columns(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::RedrawColumn { column, .. } => Some(*column),
                RenderEvent::Focus { .. } => None,
            })
            .collect()
    }

    /// Card ids of the most recent redraw of `column`.
    pub fn column_ids(&self, column: usize) -> Option<Vec<CardId>> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::RedrawColumn {
                column: c, cards, ..
            } if *c == column => Some(cards.iter().map(|card| card.id).collect()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderSink for RecordingSink {
    fn redraw_column(&mut self, index: usize, name: &str, cards: &[&Card]) {
        self.events.push(RenderEvent::RedrawColumn {
            column: index,
            name: name.to_string(),
            cards: cards.iter().map(|card| (*card).clone()).collect(),
        });
    }

    fn set_focus(&mut self, focus: Option<FocusRef>) {
        self.events.push(RenderEvent::Focus { focus });
    }
}

/// Writes each notification as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a single line and flush.
    pub fn write_line(&mut self, line: &str) {
        let result = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write output line: {}", e);
        }
    }

    fn emit(&mut self, event: &RenderEvent) {
        match serde_json::to_string(event) {
            Ok(line) => self.write_line(&line),
            Err(e) => tracing::warn!("Failed to encode render event: {}", e),
        }
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn redraw_column(&mut self, index: usize, name: &str, cards: &[&Card]) {
        self.emit(&RenderEvent::RedrawColumn {
            column: index,
            name: name.to_string(),
            cards: cards.iter().map(|card| (*card).clone()).collect(),
        });
    }

    fn set_focus(&mut self, focus: Option<FocusRef>) {
        self.emit(&RenderEvent::Focus { focus });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_recording_sink_queries() {
        let first = Card::new(0, "a".into(), String::new(), 1, 0);
        let second = Card::new(1, "b".into(), String::new(), 1, 1);

        let mut sink = RecordingSink::new();
        sink.redraw_column(1, "TODO", &[&first, &second]);
        sink.redraw_column(2, "DOING", &[]);
        sink.set_focus(Some(FocusRef::new(1, 1)));

        assert_eq!(sink.redrawn_columns(), vec![1, 2]);
        assert_eq!(sink.column_ids(1), Some(vec![0, 1]));
        assert_eq!(sink.column_ids(2), Some(vec![]));
        assert_eq!(sink.column_ids(3), None);
        assert_eq!(sink.last_focus(), Some(FocusRef::new(1, 1)));

        sink.clear();
        assert_eq!(sink.last_focus(), None);
    }

    #[test]
    fn test_json_lines_sink_output() {
        let card = Card::new(7, "Ship".into(), "now".into(), 3, 0);
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.redraw_column(3, "DONE", &[&card]);
        sink.set_focus(None);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "redraw_column");
        assert_eq!(lines[0]["name"], "DONE");
        assert_eq!(lines[0]["cards"][0]["id"], 7);
        assert_eq!(lines[0]["cards"][0]["desc"], "now");
        assert_eq!(lines[1]["event"], "focus");
        assert!(lines[1]["focus"].is_null());
    }
}
