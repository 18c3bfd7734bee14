use crate::domain::medicine_analysis::entities::UserProfile;

pub const AUTHENTIC_LABEL_URDU: &str = "🟢 اصل لگتی ہے";
pub const SUSPICIOUS_LABEL_URDU: &str = "🟡 مزید تصدیق ضروری ہے";
pub const COUNTERFEIT_LABEL_URDU: &str = "🔴 جعلی ہونے کا شبہ ہے";

pub const SAFE_LABEL_URDU: &str = "🟢 آپ کے لیے محفوظ لگتی ہے";
pub const WARNING_LABEL_URDU: &str = "🟡 احتیاط ضروری ہے";
pub const DANGER_LABEL_URDU: &str = "🔴 آپ کے لیے خطرناک ہو سکتی ہے";

const DOCTOR_ADVICE_URDU: &str = "لیکن ڈاکٹر سے مشورہ ضروری ہے";

fn gender_urdu(gender: &str) -> &'static str {
    if gender == "male" { "مرد" } else { "عورت" }
}

fn yes_no_urdu(value: bool) -> &'static str {
    if value { "ہاں" } else { "نہیں" }
}

/// Builds the instruction sent with the medicine photo.
///
/// Pure function of the profile: the same profile always yields the same
/// text.
pub fn build_analysis_prompt(profile: &UserProfile) -> String {
    let allergies = if profile.allergies.is_empty() {
        "None reported"
    } else {
        profile.allergies.as_str()
    };

    format!(
        r#"You are a pharmaceutical analysis assistant serving rural Pakistani users with low literacy. Analyze the medicine shown in this image.

USER PROFILE:
- Age: {age} years
- Gender: {gender_urdu} ({gender})
- Weight: {weight} kg
- Pregnant: {pregnant_urdu} ({pregnant})
- Known Allergies: {allergies}

TASKS:
1. EXTRACT every piece of text visible on the packaging, strip, bottle or prescription.
2. IDENTIFY the medicine name and its active ingredients.
3. EXPLAIN what the medicine does in very simple Urdu, at most 2 short sentences, no medical jargon.
4. ASSESS AUTHENTICITY by checking:
   - spelling mistakes on the packaging
   - inconsistent fonts or poor print quality
   - presence of batch number and expiry date
   - manufacturer details and regulatory marks (DRAP for Pakistan)
   - barcode or QR code
   - overall packaging quality
5. CHECK SAFETY for this particular user:
   - is it appropriate for the age (children, elderly)?
   - gender-specific contraindications?
   - pregnancy category and risks (critical when the user is pregnant)?
   - conflicts with the known allergies?
   - weight-based dosing concerns?
6. GIVE general DOSAGE information (standard ranges only, never a prescription).

RULES:
- All Urdu text must use simple, everyday words.
- Keep explanations to 1-2 bullet points.
- Use a friendly, reassuring tone.
- If the image is not a medicine or is unreadable, set "not_medicine" to true.
- Be fair about authenticity: do not flag legitimate packaging as suspicious.
- Never prescribe. Only give general dosage ranges.
- Always recommend consulting a doctor.

Authenticity label, use EXACTLY one of:
- authentic: "{authentic}"
- suspicious: "{suspicious}"
- counterfeit: "{counterfeit}"

Safety label, use EXACTLY one of:
- safe: "{safe}"
- warning: "{warning}"
- danger: "{danger}"

Reply ONLY with valid JSON in exactly this structure (no markdown, no code fences):
{{
  "medicine_name": "Medicine name in English",
  "extracted_text": "All text extracted from the image",
  "explanation_urdu": "Simple 1-2 line Urdu explanation of what this medicine does",
  "authenticity": {{
    "status": "authentic OR suspicious OR counterfeit",
    "label_urdu": "Emoji + Urdu label from the list above",
    "reasons_urdu": ["Reason 1 in simple Urdu", "Reason 2 in simple Urdu"],
    "details": "Technical details in English for advanced users"
  }},
  "safety": {{
    "status": "safe OR warning OR danger",
    "label_urdu": "Emoji + Urdu label from the list above",
    "warnings_urdu": ["Warning 1 in simple Urdu if any"],
    "details": "Technical safety details in English"
  }},
  "dosage": {{
    "recommendation_urdu": "Dosage guidance in simple Urdu, always ending with: {doctor}",
    "details": "Technical dosage information in English"
  }},
  "not_medicine": false,
  "error_message_urdu": ""
}}"#,
        age = profile.age,
        gender_urdu = gender_urdu(&profile.gender),
        gender = profile.gender,
        weight = profile.weight,
        pregnant_urdu = yes_no_urdu(profile.pregnant),
        pregnant = profile.pregnant,
        allergies = allergies,
        authentic = AUTHENTIC_LABEL_URDU,
        suspicious = SUSPICIOUS_LABEL_URDU,
        counterfeit = COUNTERFEIT_LABEL_URDU,
        safe = SAFE_LABEL_URDU,
        warning = WARNING_LABEL_URDU,
        danger = DANGER_LABEL_URDU,
        doctor = DOCTOR_ADVICE_URDU,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            age: 25,
            gender: "female".to_string(),
            weight: 60.0,
            pregnant: true,
            allergies: "penicillin".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_profile() {
        let prompt = build_analysis_prompt(&profile());

        assert!(prompt.contains("- Age: 25 years"));
        assert!(prompt.contains("- Gender: عورت (female)"));
        assert!(prompt.contains("- Weight: 60 kg"));
        assert!(prompt.contains("- Pregnant: ہاں (true)"));
        assert!(prompt.contains("- Known Allergies: penicillin"));
    }

    #[test]
    fn test_prompt_defaults() {
        let prompt = build_analysis_prompt(&UserProfile {
            gender: "male".to_string(),
            ..Default::default()
        });

        assert!(prompt.contains("- Gender: مرد (male)"));
        assert!(prompt.contains("- Pregnant: نہیں (false)"));
        assert!(prompt.contains("- Known Allergies: None reported"));
    }

    #[test]
    fn test_prompt_is_deterministic_and_lists_labels() {
        let first = build_analysis_prompt(&profile());
        assert_eq!(first, build_analysis_prompt(&profile()));

        for label in [
            AUTHENTIC_LABEL_URDU,
            SUSPICIOUS_LABEL_URDU,
            COUNTERFEIT_LABEL_URDU,
            SAFE_LABEL_URDU,
            WARNING_LABEL_URDU,
            DANGER_LABEL_URDU,
        ] {
            assert!(first.contains(label));
        }
        assert!(first.contains("\"not_medicine\": false"));
    }
}
