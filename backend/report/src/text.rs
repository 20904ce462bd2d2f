//! Plain-text report for the CLI, same content rules as the HTML card.

use plantguard_core::DiagnosisRecord;

pub fn render_report_text(record: &DiagnosisRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Status:      {}\n", record.status));
    out.push_str(&format!("Issue:       {}\n", record.disease_name));
    out.push_str(&format!("Confidence:  {}%\n", record.confidence));
    out.push_str(&format!("Description: {}\n", record.description));

    if record.symptoms.is_empty() {
        out.push_str("Symptoms:    None listed\n");
    } else {
        out.push_str(&format!("Symptoms:    {}\n", record.symptoms.join(", ")));
    }

    if !record.treatment.is_empty() {
        out.push_str("\nTreatment / Cure:\n");
        for step in &record.treatment {
            out.push_str(&format!("  - {step}\n"));
        }
    }
    if !record.prevention.is_empty() {
        out.push_str("\nPrevention:\n");
        for tip in &record.prevention {
            out.push_str(&format!("  - {tip}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_only_when_present() {
        let record: DiagnosisRecord = serde_json::from_str(
            r#"{"status":"Healthy","diseaseName":"None","description":"Fine"}"#,
        )
        .unwrap();
        let text = render_report_text(&record);
        assert!(text.contains("Status:      Healthy"));
        assert!(text.contains("Symptoms:    None listed"));
        assert!(!text.contains("Treatment"));
    }

    #[test]
    fn renders_treatment_steps() {
        let record: DiagnosisRecord = serde_json::from_str(
            r#"{"status":"Diseased","diseaseName":"Rust",
                "treatment":["prune","spray"]}"#,
        )
        .unwrap();
        let text = render_report_text(&record);
        assert!(text.contains("  - prune"));
        assert!(text.contains("  - spray"));
    }
}
