use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Todo registro do backend é identificado por um UUID
/// embrulhado em um newtype próprio do agregado.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Representação usada nas URLs e nos DTOs de formulário
    fn as_string(&self) -> String;

    /// Lê o id vindo de uma URL ou de um DTO
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Declara o newtype de id de um agregado com as impls padrão.
///
/// ```rust,ignore
/// uuid_aggregate_id!(AccountPayableId);
/// ```
#[macro_export]
macro_rules! uuid_aggregate_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new(value: uuid::Uuid) -> Self {
                Self(value)
            }

            pub fn new_v4() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn value(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.to_string()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s.trim())
                    .map($name::new)
                    .map_err(|e| format!("UUID inválido: {}", e))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::AggregateId;

    uuid_aggregate_id!(SampleId);

    #[test]
    fn parses_and_prints_the_same_uuid() {
        let id = SampleId::new_v4();
        let parsed = SampleId::from_string(&id.as_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        let err = SampleId::from_string("não-é-uuid").unwrap_err();
        assert!(err.starts_with("UUID inválido"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SampleId::new_v4();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_string()));
    }
}
