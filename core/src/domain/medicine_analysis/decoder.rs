use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("fenced block pattern is valid")
});

/// Extracts the JSON document from a model reply.
///
/// Tries, in order: the whole text, the first fenced code block, then the
/// span from the first `{` to the last `}`. Returns `None` when every
/// attempt fails. Any JSON value is accepted, not only objects.
pub fn decode_model_reply(text: Option<&str>) -> Option<Value> {
    let text = text.filter(|t| !t.is_empty())?;

    parse_whole(text)
        .or_else(|| parse_fenced_block(text))
        .or_else(|| parse_brace_span(text))
}

fn parse_whole(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn parse_fenced_block(text: &str) -> Option<Value> {
    let captures = FENCED_BLOCK.captures(text)?;
    let block = captures.get(1)?.as_str().trim();
    serde_json::from_str(block).ok()
}

fn parse_brace_span(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "medicine_name": "Panadol",
            "not_medicine": false,
            "safety": { "status": "safe", "warnings_urdu": [] }
        })
    }

    #[test]
    fn test_absent_or_empty_input() {
        assert_eq!(decode_model_reply(None), None);
        assert_eq!(decode_model_reply(Some("")), None);
    }

    #[test]
    fn test_bare_json_round_trips() {
        let text = serde_json::to_string_pretty(&sample()).unwrap();
        assert_eq!(decode_model_reply(Some(&text)), Some(sample()));
    }

    #[test]
    fn test_fenced_json_block() {
        let text = format!(
            "Here is the analysis:\n```json\n  {}  \n```\nStay safe.",
            serde_json::to_string(&sample()).unwrap()
        );
        assert_eq!(decode_model_reply(Some(&text)), Some(sample()));
    }

    #[test]
    fn test_untagged_fence() {
        let text = format!("```\n{}\n```", serde_json::to_string(&sample()).unwrap());
        assert_eq!(decode_model_reply(Some(&text)), Some(sample()));
    }

    #[test]
    fn test_first_fence_wins() {
        let text = "```json\n{\"a\": 1}\n```\nand\n```json\n{\"a\": 2}\n```";
        assert_eq!(decode_model_reply(Some(text)), Some(json!({ "a": 1 })));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let text = format!(
            "Sure! {} Let me know if you need more.",
            serde_json::to_string(&sample()).unwrap()
        );
        assert_eq!(decode_model_reply(Some(&text)), Some(sample()));
    }

    #[test]
    fn test_malformed_fence_falls_through_to_brace_span() {
        // The fence holds broken JSON but the raw text still has a valid span
        // from the first `{` to the last `}`.
        let text = "Result: {\"medicine_name\": \"Brufen\", \"note\": \"```json nope```\"} done";
        assert_eq!(
            decode_model_reply(Some(text)),
            Some(json!({ "medicine_name": "Brufen", "note": "```json nope```" }))
        );
    }

    #[test]
    fn test_no_json_anywhere() {
        assert_eq!(
            decode_model_reply(Some("Sorry, I cannot process this image.")),
            None
        );
        assert_eq!(decode_model_reply(Some("} backwards {")), None);
        assert_eq!(decode_model_reply(Some("```json\n{broken\n```")), None);
        assert_eq!(decode_model_reply(Some("   ")), None);
    }

    #[test]
    fn test_non_object_json_is_returned_as_is() {
        assert_eq!(decode_model_reply(Some("[1, 2]")), Some(json!([1, 2])));
        assert_eq!(decode_model_reply(Some("42")), Some(json!(42)));
    }

    #[test]
    fn test_multibyte_text_around_object() {
        let text = "یہ رہا نتیجہ: {\"medicine_name\": \"Augmentin\"} شکریہ";
        assert_eq!(
            decode_model_reply(Some(text)),
            Some(json!({ "medicine_name": "Augmentin" }))
        );
    }
}
