//! Output formatting for describe command results.

use super::execute::DescribeResult;
use crate::output::Outputable;

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Catalog queries ({}, {}):", self.engine, self.queries.len()));
        lines.push(String::new());

        for q in &self.queries {
            lines.push(format!("  {}({})", q.name, q.params.join(", ")));
            if let Some(doc) = &q.doc {
                for doc_line in doc.lines() {
                    lines.push(format!("      {}", doc_line));
                }
            }
            if self.detailed {
                lines.push(String::new());
                for text_line in q.text.lines() {
                    lines.push(format!("    {}", text_line));
                }
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }
}
