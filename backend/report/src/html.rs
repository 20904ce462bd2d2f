//! HTML result card.
//!
//! Treatment and prevention sections are emitted only when their lists are
//! non-empty; all model-supplied text is escaped before it reaches the page.

use plantguard_core::{DiagnosisRecord, HealthStatus};

/// Render a diagnosis as the result-card markup the page injects.
pub fn render_report_html(record: &DiagnosisRecord) -> String {
    let status_class = match record.status {
        HealthStatus::Healthy => "healthy",
        _ => "diseased",
    };

    let symptoms = if record.symptoms.is_empty() {
        "None listed".to_string()
    } else {
        escape(&record.symptoms.join(", "))
    };

    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"result-card {status_class}\">\n\
         <div class=\"result-header\">\n\
         <h3 class=\"disease-name\">{}</h3>\n\
         <span class=\"status-badge {status_class}\">{}</span>\n\
         </div>\n<div class=\"result-body\">\n\
         <div class=\"info-group\"><h4>Description</h4><p>{}</p></div>\n\
         <div class=\"info-group\"><h4>Symptoms</h4><p>{symptoms}</p></div>\n",
        escape(&record.disease_name),
        record.status,
        escape(&record.description),
    ));

    if !record.treatment.is_empty() {
        out.push_str(&list_section("💊 Treatment / Cure", &record.treatment));
    }
    if !record.prevention.is_empty() {
        out.push_str(&list_section("🛡️ Prevention", &record.prevention));
    }

    out.push_str("</div>\n</div>");
    out
}

fn list_section(title: &str, items: &[String]) -> String {
    let lis: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<div class=\"recommendations\"><h4>{title}</h4><ul>{lis}</ul></div>\n")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> DiagnosisRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn healthy_report_omits_empty_sections() {
        let html = render_report_html(&record(
            r#"{"status":"Healthy","diseaseName":"None","symptoms":[],
                "treatment":[],"prevention":[],"description":"Looks good"}"#,
        ));
        assert!(html.contains("status-badge healthy"));
        assert!(html.contains("None listed"));
        assert!(!html.contains("Treatment"));
        assert!(!html.contains("Prevention"));
    }

    #[test]
    fn diseased_report_renders_lists() {
        let html = render_report_html(&record(
            r#"{"status":"Diseased","diseaseName":"Powdery mildew",
                "symptoms":["white spots"],"treatment":["apply fungicide"],
                "prevention":["improve airflow"],"description":"Fungal"}"#,
        ));
        assert!(html.contains("status-badge diseased"));
        assert!(html.contains("white spots"));
        assert!(html.contains("<li>apply fungicide</li>"));
        assert!(html.contains("<li>improve airflow</li>"));
    }

    #[test]
    fn model_text_is_escaped() {
        let html = render_report_html(&record(
            r#"{"status":"Diseased","diseaseName":"<script>alert(1)</script>",
                "description":"a & b"}"#,
        ));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }
}
