// ── HTML report rendering ──
//
// Turns a loaded list snapshot into a standalone HTML table, the input
// handed to a PDF printer or saved as-is. Everything interpolated from
// records is escaped.

use std::sync::Arc;

use serde_json::Value;

use crate::filter::{DATE_FORMAT, FilterCriteria};
use crate::model::{Record, display_value};
use crate::store::ListState;

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;font-size:12px;margin:24px}\
h1{font-size:18px;margin:0 0 4px}\
p.filters{color:#555;margin:0 0 12px}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:4px 6px;text-align:left}\
th{background:#f2f2f2}\
tfoot td{font-weight:bold}";

/// A column: the record field it reads and its header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Column whose header is derived from the key: `paid_amount` → `Paid Amount`.
    pub fn from_key(key: &str) -> Self {
        Self::new(key, title_case(key))
    }
}

/// Report layout: title, optional filter summary, columns.
#[derive(Debug, Clone, Default)]
pub struct HtmlReport {
    title: String,
    filters: Vec<(String, String)>,
    columns: Vec<Column>,
}

impl HtmlReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Print the applied filters under the title.
    pub fn with_filters(mut self, criteria: &FilterCriteria) -> Self {
        self.filters = describe_filters(criteria);
        self
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Render `state.items` and `state.totals`.
    ///
    /// Without explicit columns, the first record's fields are used.
    pub fn render(&self, state: &ListState<Record>) -> String {
        self.render_items(&state.items, state.totals.as_ref())
    }

    pub fn render_items(&self, items: &[Arc<Record>], totals: Option<&Value>) -> String {
        let columns = if self.columns.is_empty() {
            items
                .first()
                .map(|r| r.field_names().iter().map(|k| Column::from_key(k)).collect())
                .unwrap_or_default()
        } else {
            self.columns.clone()
        };

        let mut html = String::with_capacity(1024 + items.len() * 128);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
        html.push_str(&format!("<h1>{}</h1>\n", escape(&self.title)));

        if !self.filters.is_empty() {
            let summary: Vec<String> = self
                .filters
                .iter()
                .map(|(label, value)| format!("{}: {}", escape(label), escape(value)))
                .collect();
            html.push_str(&format!("<p class=\"filters\">{}</p>\n", summary.join(" | ")));
        }

        html.push_str("<table>\n<thead><tr>");
        for column in &columns {
            html.push_str(&format!("<th>{}</th>", escape(&column.label)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        if items.is_empty() {
            html.push_str(&format!(
                "<tr><td colspan=\"{}\">No records</td></tr>\n",
                columns.len().max(1)
            ));
        }
        for record in items {
            html.push_str("<tr>");
            for column in &columns {
                html.push_str(&format!("<td>{}</td>", escape(&record.display_field(&column.key))));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n");

        if let Some(Value::Object(totals)) = totals {
            html.push_str(&totals_footer(&columns, totals));
        }
        html.push_str("</table>\n");

        if let Some(Value::Object(totals)) = totals {
            let extra: Vec<_> = totals
                .iter()
                .filter(|(k, _)| !columns.iter().any(|c| &c.key == *k))
                .collect();
            if !extra.is_empty() {
                html.push_str("<table class=\"totals\">\n");
                for (key, value) in extra {
                    html.push_str(&format!(
                        "<tr><th>{}</th><td>{}</td></tr>\n",
                        escape(&title_case(key)),
                        escape(&display_value(value))
                    ));
                }
                html.push_str("</table>\n");
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Totals row aligned under the matching columns; empty when none match.
fn totals_footer(columns: &[Column], totals: &serde_json::Map<String, Value>) -> String {
    if !columns.iter().any(|c| totals.contains_key(&c.key)) {
        return String::new();
    }
    let mut row = String::from("<tfoot><tr>");
    for (i, column) in columns.iter().enumerate() {
        let cell = match totals.get(&column.key) {
            Some(value) => escape(&display_value(value)),
            None if i == 0 => "Total".to_owned(),
            None => String::new(),
        };
        row.push_str(&format!("<td>{cell}</td>"));
    }
    row.push_str("</tr></tfoot>\n");
    row
}

fn describe_filters(criteria: &FilterCriteria) -> Vec<(String, String)> {
    let text = [
        ("Hotel", criteria.hotel()),
        ("Employee", criteria.employee()),
        ("Material", criteria.material()),
        ("Platform", criteria.platform()),
        ("Type", criteria.selected_mode()),
        ("Search", criteria.search_text()),
    ];
    let mut out: Vec<(String, String)> = text
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| (label.to_owned(), value.to_owned()))
        })
        .collect();
    if let Some(from) = criteria.date_from() {
        out.push(("From".into(), from.format(DATE_FORMAT).to_string()));
    }
    if let Some(to) = criteria.date_to() {
        out.push(("To".into(), to.format(DATE_FORMAT).to_string()));
    }
    out
}

fn title_case(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
