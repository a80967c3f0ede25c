//! Outgoing messages produced by a turn.

use serde::{Deserialize, Serialize};

use crate::domain::booking::ChoiceSet;

/// Hint to the channel about whether the bot now waits for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputHint {
    ExpectingInput,
    AcceptingInput,
    IgnoringInput,
}

/// A message to deliver to the user: text, optionally with a choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<ChoiceSet>,
    pub input_hint: InputHint,
}

impl OutgoingMessage {
    /// Informational text that expects no reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: None,
            input_hint: InputHint::IgnoringInput,
        }
    }

    /// A question awaiting the user's answer.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: None,
            input_hint: InputHint::ExpectingInput,
        }
    }

    /// A question offering a closed set of options.
    pub fn choice(text: impl Into<String>, choices: ChoiceSet) -> Self {
        Self {
            text: text.into(),
            choices: Some(choices),
            input_hint: InputHint::ExpectingInput,
        }
    }

    /// Text that may be answered but does not require it.
    pub fn accepting(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: None,
            input_hint: InputHint::AcceptingInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_omits_choices_when_serialized() {
        let json = serde_json::to_value(OutgoingMessage::text("hi")).unwrap();
        assert!(json.get("choices").is_none());
        assert_eq!(json["input_hint"], "ignoring_input");
    }

    #[test]
    fn choice_prompt_carries_set() {
        let msg = OutgoingMessage::choice("Pick", ChoiceSet::yes_no());
        assert_eq!(msg.input_hint, InputHint::ExpectingInput);
        assert_eq!(msg.choices.unwrap().options, vec!["Yes", "No"]);
    }
}
