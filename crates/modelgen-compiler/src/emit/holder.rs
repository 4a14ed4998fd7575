//! Adapter-holder source writer.

use super::{GENERATED_HEADER, SourceWriter, rust_string_literal};
use crate::registry::Registry;
use modelgen_core::HOLDER_IMPL_NAME;
use std::fmt::Write as _;

/// Emits the single `AdapterHolderImpl` artifact tying a round together:
/// every migration, model adapter, and type-adapter entry the registry
/// collected, in deterministic order.
pub struct AdapterHolderWriter;

impl SourceWriter for AdapterHolderWriter {
    type Element = Registry;

    fn source_name(&self, _registry: &Registry) -> String {
        HOLDER_IMPL_NAME.to_string()
    }

    fn write_source(&self, out: &mut String, registry: &Registry) {
        out.push_str(GENERATED_HEADER);
        out.push('\n');
        let _ = writeln!(out, "pub struct {HOLDER_IMPL_NAME} {{");
        out.push_str("    migrations: Vec<Box<dyn modelgen_core::Migration>>,\n");
        out.push_str("    model_adapters: Vec<Box<dyn modelgen_core::ModelAdapter>>,\n");
        out.push_str("    type_adapters: Vec<modelgen_core::TypeAdapterEntry>,\n");
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl {HOLDER_IMPL_NAME} {{");
        out.push_str("    #[must_use]\n");
        out.push_str("    pub fn new() -> Self {\n");

        // Migrations, version order. An empty list is a valid holder.
        out.push_str("        let migrations: Vec<Box<dyn modelgen_core::Migration>> = vec![\n");
        for migration in registry.migrations() {
            let _ = writeln!(
                out,
                "            Box::new({}::default()),",
                migration.qualified_name()
            );
        }
        out.push_str("        ];\n");

        // Model adapters, model-name order. The generated adapter structs
        // live in the same module as the holder.
        out.push_str("        let model_adapters: Vec<Box<dyn modelgen_core::ModelAdapter>> = vec![\n");
        for adapter in registry.model_adapters() {
            let _ = writeln!(out, "            Box::new({}),", adapter.type_ident());
        }
        out.push_str("        ];\n");

        // Type adapters, deserialized-type order.
        out.push_str("        let type_adapters: Vec<modelgen_core::TypeAdapterEntry> = vec![\n");
        for adapter in registry.type_adapters() {
            let _ = writeln!(
                out,
                "            modelgen_core::TypeAdapterEntry {{ deserialized: {}, serialized: {} }},",
                rust_string_literal(adapter.deserialized()),
                rust_string_literal(adapter.serialized())
            );
        }
        out.push_str("        ];\n");

        out.push_str("        Self { migrations, model_adapters, type_adapters }\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl Default for {HOLDER_IMPL_NAME} {{");
        out.push_str("    fn default() -> Self {\n");
        out.push_str("        Self::new()\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl modelgen_core::AdapterHolder for {HOLDER_IMPL_NAME} {{");
        out.push_str("    fn migrations(&self) -> &[Box<dyn modelgen_core::Migration>] {\n");
        out.push_str("        &self.migrations\n");
        out.push_str("    }\n\n");
        out.push_str(
            "    fn model_adapter(&self, model_type: &str) -> Option<&dyn modelgen_core::ModelAdapter> {\n",
        );
        out.push_str("        self.model_adapters\n");
        out.push_str("            .iter()\n");
        out.push_str("            .find(|adapter| adapter.model_type() == model_type)\n");
        out.push_str("            .map(AsRef::as_ref)\n");
        out.push_str("    }\n\n");
        out.push_str("    fn model_adapters(&self) -> &[Box<dyn modelgen_core::ModelAdapter>] {\n");
        out.push_str("        &self.model_adapters\n");
        out.push_str("    }\n\n");
        out.push_str("    fn type_adapters(&self) -> &[modelgen_core::TypeAdapterEntry] {\n");
        out.push_str("        &self.type_adapters\n");
        out.push_str("    }\n");
        out.push_str("}\n");
    }
}
