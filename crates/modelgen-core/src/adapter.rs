//! Runtime contracts implemented by generated sources, plus the built-in
//! type adapters the generator seeds into every round.
//!
//! The compiler emits source artifacts that implement these traits; the
//! storage layer consumes them through [`AdapterHolder`] without knowing
//! which models exist at its own compile time.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Simple name of the generated aggregate holder type.
pub const HOLDER_IMPL_NAME: &str = "AdapterHolderImpl";

/// Well-known fully-qualified path of the generated aggregate holder.
pub const HOLDER_IMPL_PATH: &str = "modelgen::generated::AdapterHolderImpl";

/// One versioned schema-change step.
///
/// Migrations are registered by the generator and ordered by version; this
/// crate never executes them.
pub trait Migration {
    /// Schema version this migration upgrades to.
    fn version(&self) -> i64;

    /// SQL statements to apply, in order.
    fn up(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Generated per-model adapter: identity, table name, and table schema.
pub trait ModelAdapter {
    /// Qualified path of the model type this adapter serves.
    fn model_type(&self) -> &'static str;

    /// Declared table name.
    fn table_name(&self) -> &'static str;

    /// Full `CREATE TABLE IF NOT EXISTS ...` DDL for the model.
    fn schema(&self) -> &'static str;
}

/// Two-way conversion between a declared field type and a SQL-storable type.
pub trait TypeAdapter {
    /// The declared ("deserialized") type.
    type Deserialized;
    /// The SQL-storable ("serialized") type.
    type Serialized;

    fn serialize(&self, value: Self::Deserialized) -> Self::Serialized;
    fn deserialize(&self, value: Self::Serialized) -> Self::Deserialized;
}

/// One type-adapter registration in a generated holder: the
/// (deserialized, serialized) pair the adapter converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeAdapterEntry {
    /// Canonical name of the declared ("deserialized") type.
    pub deserialized: &'static str,
    /// Canonical name of the SQL-storable ("serialized") type.
    pub serialized: &'static str,
}

/// The aggregate registry a generated holder implements: every migration,
/// model adapter, and type adapter discovered in one generation session.
pub trait AdapterHolder {
    /// All migrations, ordered by version. An empty slice is valid.
    fn migrations(&self) -> &[Box<dyn Migration>];

    /// Model adapter for a model path, if one was generated.
    fn model_adapter(&self, model_type: &str) -> Option<&dyn ModelAdapter>;

    /// All model adapters, ordered by model path.
    fn model_adapters(&self) -> &[Box<dyn ModelAdapter>];

    /// Type adapter registrations, ordered by deserialized type.
    fn type_adapters(&self) -> &[TypeAdapterEntry];

    /// Registration for a deserialized type, if an adapter was generated.
    fn type_adapter(&self, deserialized: &str) -> Option<&TypeAdapterEntry> {
        self.type_adapters()
            .iter()
            .find(|entry| entry.deserialized == deserialized)
    }
}

/// Built-in adapter: `bool` stored as `0`/`1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolAdapter;

impl TypeAdapter for BoolAdapter {
    type Deserialized = bool;
    type Serialized = i64;

    fn serialize(&self, value: bool) -> i64 {
        i64::from(value)
    }

    fn deserialize(&self, value: i64) -> bool {
        value != 0
    }
}

/// Built-in adapter: naive timestamps stored as epoch milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveDateTimeAdapter;

impl TypeAdapter for NaiveDateTimeAdapter {
    type Deserialized = NaiveDateTime;
    type Serialized = i64;

    fn serialize(&self, value: NaiveDateTime) -> i64 {
        value.and_utc().timestamp_millis()
    }

    fn deserialize(&self, value: i64) -> NaiveDateTime {
        DateTime::<Utc>::from_timestamp_millis(value)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    }
}

/// Built-in adapter: UTC timestamps stored as epoch milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeUtcAdapter;

impl TypeAdapter for DateTimeUtcAdapter {
    type Deserialized = DateTime<Utc>;
    type Serialized = i64;

    fn serialize(&self, value: DateTime<Utc>) -> i64 {
        value.timestamp_millis()
    }

    fn deserialize(&self, value: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(value).unwrap_or_default()
    }
}

/// Built-in adapter: `SystemTime` stored as epoch milliseconds.
///
/// Times before the epoch clamp to zero; millisecond counts are saturating.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeAdapter;

impl TypeAdapter for SystemTimeAdapter {
    type Deserialized = SystemTime;
    type Serialized = i64;

    fn serialize(&self, value: SystemTime) -> i64 {
        value
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    fn deserialize(&self, value: i64) -> SystemTime {
        let millis = u64::try_from(value).unwrap_or(0);
        UNIX_EPOCH + std::time::Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_adapter_round_trip() {
        let adapter = BoolAdapter;
        assert_eq!(adapter.serialize(true), 1);
        assert_eq!(adapter.serialize(false), 0);
        assert!(adapter.deserialize(1));
        assert!(!adapter.deserialize(0));
        // Any nonzero value reads back as true.
        assert!(adapter.deserialize(-7));
    }

    #[test]
    fn test_naive_datetime_adapter_round_trip() {
        let adapter = NaiveDateTimeAdapter;
        let dt = DateTime::<Utc>::from_timestamp_millis(1_400_000_000_123)
            .unwrap()
            .naive_utc();
        let millis = adapter.serialize(dt);
        assert_eq!(millis, 1_400_000_000_123);
        assert_eq!(adapter.deserialize(millis), dt);
    }

    #[test]
    fn test_datetime_utc_adapter_round_trip() {
        let adapter = DateTimeUtcAdapter;
        let dt = DateTime::<Utc>::from_timestamp_millis(86_400_000).unwrap();
        assert_eq!(adapter.deserialize(adapter.serialize(dt)), dt);
    }

    #[test]
    fn test_system_time_adapter_round_trip() {
        let adapter = SystemTimeAdapter;
        let t = UNIX_EPOCH + std::time::Duration::from_millis(123_456);
        assert_eq!(adapter.serialize(t), 123_456);
        assert_eq!(adapter.deserialize(123_456), t);
    }

    #[test]
    fn test_system_time_adapter_clamps_pre_epoch() {
        let adapter = SystemTimeAdapter;
        let before = UNIX_EPOCH - std::time::Duration::from_secs(10);
        assert_eq!(adapter.serialize(before), 0);
        assert_eq!(adapter.deserialize(-5), UNIX_EPOCH);
    }

    #[test]
    fn test_holder_constants() {
        assert_eq!(HOLDER_IMPL_NAME, "AdapterHolderImpl");
        assert!(HOLDER_IMPL_PATH.ends_with(HOLDER_IMPL_NAME));
    }
}
