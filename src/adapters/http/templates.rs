use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads every template matching `glob`, e.g. `templates/**/*.html.tera`
  pub fn new(glob: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(glob)?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dashboard_renders_from_project_templates() {
    let engine = TemplateEngine::new("templates/**/*.html.tera").expect("templates load");

    let mut context = tera::Context::new();
    context.insert("invoices", &Vec::<serde_json::Value>::new());
    context.insert("total_count", &0);
    context.insert("paid_count", &0);
    context.insert("unpaid_count", &0);
    context.insert("filter", &serde_json::json!({}));
    context.insert("error", &Option::<String>::None);

    let html = engine
      .render("pages/dashboard.html.tera", &context)
      .expect("dashboard renders");
    assert!(html.contains("No invoices yet"));
  }

  #[test]
  fn test_user_input_is_escaped() {
    let engine = TemplateEngine::new("templates/**/*.html.tera").expect("templates load");

    let mut context = tera::Context::new();
    context.insert(
      "invoices",
      &vec![serde_json::json!({
        "id": 1,
        "customerName": "<script>alert(1)</script>",
        "invoiceNumber": "INV-1",
        "totalAmount": 10.0,
        "paymentStatus": "paid",
        "dateCreated": "2024-01-01T00:00:00Z",
        "files": []
      })],
    );
    context.insert("total_count", &1);
    context.insert("paid_count", &1);
    context.insert("unpaid_count", &0);
    context.insert("filter", &serde_json::json!({}));
    context.insert("error", &Option::<String>::None);

    let html = engine
      .render("pages/dashboard.html.tera", &context)
      .expect("dashboard renders");
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
  }

  #[test]
  fn test_only_web_and_absolute_paths_become_links() {
    let engine = TemplateEngine::new("templates/**/*.html.tera").expect("templates load");

    let mut context = tera::Context::new();
    context.insert(
      "invoices",
      &vec![serde_json::json!({
        "id": 1,
        "customerName": "Acme",
        "invoiceNumber": "INV-1",
        "totalAmount": 10.0,
        "paymentStatus": "paid",
        "dateCreated": "2024-01-01T00:00:00Z",
        "files": [
          {"id": 1, "invoiceId": 1, "fileName": "evil", "filePath": "javascript:alert(1)"},
          {"id": 2, "invoiceId": 1, "fileName": "remote", "filePath": "https://example.com/a.pdf"},
          {"id": 3, "invoiceId": 1, "fileName": "local", "filePath": "/files/b.pdf"}
        ]
      })],
    );
    context.insert("total_count", &1);
    context.insert("paid_count", &1);
    context.insert("unpaid_count", &0);
    context.insert("filter", &serde_json::json!({}));
    context.insert("error", &Option::<String>::None);

    let html = engine
      .render("pages/dashboard.html.tera", &context)
      .expect("dashboard renders");
    assert!(!html.contains("href=\"javascript:"));
    assert!(html.contains("evil (javascript:alert(1))"));
    assert!(html.contains("href=\"https:&#x2F;&#x2F;example.com&#x2F;a.pdf\""));
    assert!(html.contains("href=\"&#x2F;files&#x2F;b.pdf\""));
  }
}
