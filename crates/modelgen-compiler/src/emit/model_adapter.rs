//! Model-adapter source writer.

use super::{GENERATED_HEADER, SourceWriter, rust_string_literal};
use crate::element::{ColumnElement, ModelAdapterElement};
use crate::registry::Registry;
use std::fmt::Write as _;

/// Full CREATE TABLE statement for a model.
///
/// Column definition fragments come first in field-declaration order, then
/// the table-level FOREIGN KEY clauses, all joined by `", "`. Columns whose
/// type failed resolution are absent by construction: the model step rejects
/// the whole model before emission.
#[must_use]
pub fn create_table_sql(table_name: &str, columns: &[ColumnElement]) -> String {
    let mut defs: Vec<String> = columns.iter().filter_map(ColumnElement::schema).collect();
    defs.extend(columns.iter().filter_map(ColumnElement::foreign_key_clause));

    let sql = format!("CREATE TABLE IF NOT EXISTS {table_name} ({})", defs.join(", "));
    tracing::debug!(table = table_name, sql = %sql, "generated table DDL");
    sql
}

/// Emits one `<Model>$$ModelAdapter` artifact: a unit struct implementing
/// `modelgen_core::ModelAdapter` with the model's literal schema baked in.
pub struct ModelAdapterWriter<'a> {
    registry: &'a Registry,
}

impl<'a> ModelAdapterWriter<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }
}

impl SourceWriter for ModelAdapterWriter<'_> {
    type Element = ModelAdapterElement;

    fn source_name(&self, element: &ModelAdapterElement) -> String {
        element.artifact_name()
    }

    fn write_source(&self, out: &mut String, element: &ModelAdapterElement) {
        let ident = element.type_ident();
        let columns = self.registry.columns(element.model_qualified_name());
        let sql = create_table_sql(element.table_name(), columns);

        out.push_str(GENERATED_HEADER);
        out.push('\n');
        let _ = writeln!(out, "pub struct {ident};");
        out.push('\n');
        let _ = writeln!(out, "impl modelgen_core::ModelAdapter for {ident} {{");
        let _ = writeln!(out, "    fn model_type(&self) -> &'static str {{");
        let _ = writeln!(
            out,
            "        {}",
            rust_string_literal(element.model_qualified_name())
        );
        out.push_str("    }\n\n");
        let _ = writeln!(out, "    fn table_name(&self) -> &'static str {{");
        let _ = writeln!(out, "        {}", rust_string_literal(element.table_name()));
        out.push_str("    }\n\n");
        let _ = writeln!(out, "    fn schema(&self) -> &'static str {{");
        let _ = writeln!(out, "        {}", rust_string_literal(&sql));
        out.push_str("    }\n");
        out.push_str("}\n");
    }
}
