use serde_json::json;

/// Returns the JSON schema for medicine analysis LLM responses
pub fn get_medicine_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "medicine_name": { "type": "string" },
            "extracted_text": { "type": "string" },
            "explanation_urdu": { "type": "string" },
            "authenticity": {
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": ["authentic", "suspicious", "counterfeit"]
                    },
                    "label_urdu": { "type": "string" },
                    "reasons_urdu": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "details": { "type": "string" }
                },
                "required": ["status", "label_urdu", "reasons_urdu", "details"]
            },
            "safety": {
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": ["safe", "warning", "danger"]
                    },
                    "label_urdu": { "type": "string" },
                    "warnings_urdu": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "details": { "type": "string" }
                },
                "required": ["status", "label_urdu", "warnings_urdu", "details"]
            },
            "dosage": {
                "type": "object",
                "properties": {
                    "recommendation_urdu": { "type": "string" },
                    "details": { "type": "string" }
                },
                "required": ["recommendation_urdu", "details"]
            },
            "not_medicine": { "type": "boolean" },
            "error_message_urdu": { "type": "string" }
        },
        "required": ["not_medicine"]
    })
}
