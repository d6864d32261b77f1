//! Enums compartilhados entre agregados

pub mod payment_method;

pub use payment_method::PaymentMethod;

/// Declara um enum cujo código é a chave do backend e cujo rótulo vem da
/// tabela de tradução (`shared::i18n`), no grupo informado.
///
/// ```rust,ignore
/// labeled_enum! {
///     /// Status da conta
///     PayableStatus, "payable_status" {
///         Pending => "pending",
///         Paid => "paid",
///     }
/// }
/// ```
#[macro_export]
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $group:literal {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Chave usada pelo backend
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Rótulo em pt-BR
            pub fn label(&self) -> &'static str {
                $crate::shared::i18n::label($group, self.code())
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
