//! DialogStack - the ordered list of active frames.

use serde::{Deserialize, Serialize};

use super::frame::DialogFrame;
use crate::domain::booking::SlotBag;

/// Active frames, root first. Empty means the conversation is idle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogStack {
    frames: Vec<DialogFrame>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[DialogFrame] {
        &self.frames
    }

    pub fn push(&mut self, frame: DialogFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<DialogFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&DialogFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut DialogFrame> {
        self.frames.last_mut()
    }

    /// Swaps the top frame for `frame`; pushes when the stack is empty.
    pub fn replace_top(&mut self, frame: DialogFrame) -> Option<DialogFrame> {
        let previous = self.frames.pop();
        self.frames.push(frame);
        previous
    }

    /// Drops every frame, including the root and its slots.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn root(&self) -> Option<&DialogFrame> {
        self.frames.first()
    }

    /// Slots of the booking in progress, reachable through the root frame.
    pub fn slot_bag(&self) -> Option<&SlotBag> {
        self.root().and_then(DialogFrame::slot_bag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialog::frame::{BreakfastOptions, FrameOptions};

    fn booking_frame() -> DialogFrame {
        DialogFrame::begin(FrameOptions::Booking(SlotBag {
            guests: Some(2),
            ..SlotBag::default()
        }))
    }

    fn breakfast_frame() -> DialogFrame {
        DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions::default()))
    }

    #[test]
    fn push_and_pop_follow_lifo_order() {
        let mut stack = DialogStack::new();
        stack.push(booking_frame());
        stack.push(breakfast_frame());

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().unwrap(), breakfast_frame());
        assert_eq!(stack.top().unwrap(), &booking_frame());
    }

    #[test]
    fn replace_top_keeps_depth() {
        let mut stack = DialogStack::new();
        stack.push(booking_frame());
        stack.push(breakfast_frame());

        let mut replacement = breakfast_frame();
        replacement.step_index = 1;
        let previous = stack.replace_top(replacement.clone());

        assert_eq!(previous, Some(breakfast_frame()));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Some(&replacement));
    }

    #[test]
    fn clear_discards_slots() {
        let mut stack = DialogStack::new();
        stack.push(booking_frame());
        stack.push(breakfast_frame());
        assert_eq!(stack.slot_bag().and_then(|b| b.guests), Some(2));

        stack.clear();
        assert!(stack.is_empty());
        assert!(stack.slot_bag().is_none());
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut stack = DialogStack::new();
        stack.push(booking_frame());
        let json = serde_json::to_value(&stack).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["dialog_id"], "booking");
    }
}
